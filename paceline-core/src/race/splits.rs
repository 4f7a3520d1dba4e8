use std::time::Instant;

use crate::error::Result;
use crate::{BibNumber, GLOBAL_CONFIG};

use super::Race;

/// One ranked neighbor of a queried racer. Race times are milliseconds of
/// offset-normalized elapsed time; a negative split means this racer
/// finished ahead of the queried one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitEntry {
    pub number: BibNumber,
    pub name: String,
    pub absolute_time: Instant,
    pub race_time_ms: i64,
    pub split_ms: i64,
}

impl Race {
    /// Ranks every checkpointed racer by normalized race time, slowest
    /// first, and returns up to `context` entries on each side of the
    /// queried racer's rank. The slice bounds come from the racer's rank
    /// before its own entry is removed from the ranking. A racer with no
    /// checkpoint yet gets an empty result.
    pub fn get_splits(&self, number: BibNumber, context: Option<usize>) -> Result<Vec<SplitEntry>> {
        let context = context.unwrap_or(GLOBAL_CONFIG.default_context);
        let target_at = match self.checkpoint_times.get(&number) {
            Some(at) => *at,
            None => return Ok(Vec::new()),
        };

        // Instants only subtract forwards, so measure everything from the
        // earliest checkpoint. Only differences are observable.
        let anchor = self
            .checkpoint_times
            .values()
            .min()
            .copied()
            .unwrap_or(target_at);
        let race_time_ms = |at: Instant, offset_secs: u64| -> i64 {
            at.duration_since(anchor).as_millis() as i64 - offset_secs as i64 * 1000
        };
        let target_race_time = race_time_ms(target_at, self.start_list.offset(number)?);

        let mut sorted = Vec::with_capacity(self.checkpoint_times.len());
        for (&n, &at) in &self.checkpoint_times {
            let race_time = race_time_ms(at, self.start_list.offset(n)?);
            sorted.push(SplitEntry {
                number: n,
                name: self.start_list.name(n)?.to_string(),
                absolute_time: at,
                race_time_ms: race_time,
                split_ms: race_time - target_race_time,
            });
        }
        sorted.sort_by(|a, b| b.race_time_ms.cmp(&a.race_time_ms));

        let index = sorted
            .iter()
            .position(|entry| entry.number == number)
            .unwrap_or(0);
        sorted.remove(index);
        let lo = index.saturating_sub(context);
        let hi = (index + context).min(sorted.len());
        Ok(sorted[lo..hi].to_vec())
    }

    /// Formats `get_splits` output one neighbor per line:
    /// `bib,<tab>name,<tab>split` with the split in whole seconds,
    /// truncated toward zero, `+`-prefixed only when strictly positive.
    pub fn format_splits(&self, number: BibNumber, context: Option<usize>) -> Result<String> {
        let lines: Vec<String> = self
            .get_splits(number, context)?
            .iter()
            .map(|entry| {
                let sign = if entry.split_ms > 0 { "+" } else { "" };
                format!(
                    "{},\t{},\t{}{}",
                    entry.number,
                    entry.name,
                    sign,
                    entry.split_ms / 1000
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }
}
