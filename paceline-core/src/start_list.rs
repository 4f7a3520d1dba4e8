use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::time::{format_time, parse_time};
use crate::{BibNumber, GLOBAL_CONFIG};

const CSV_HEADER: &str = "#bib,\tname,\t\ttrack?,\tstart";

/// A registered racer. The bib number lives in the roster key, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Racer {
    pub name: String,
    pub track: bool,
    pub offset_secs: u64,
}

/// A racer together with its bib number, built when listing the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RacerEntry {
    pub number: BibNumber,
    pub name: String,
    pub track: bool,
    pub offset_secs: u64,
}

/// Start offset as callers supply it: already in whole seconds, or "mm:ss"
/// text parsed at registration time. Only seconds are ever stored.
#[derive(Debug, Clone)]
pub enum StartOffset {
    Seconds(u64),
    Formatted(String),
}

impl From<u64> for StartOffset {
    fn from(secs: u64) -> Self {
        StartOffset::Seconds(secs)
    }
}

impl From<&str> for StartOffset {
    fn from(text: &str) -> Self {
        StartOffset::Formatted(text.to_string())
    }
}

impl From<String> for StartOffset {
    fn from(text: String) -> Self {
        StartOffset::Formatted(text)
    }
}

impl StartOffset {
    fn into_secs(self) -> Result<u64> {
        match self {
            StartOffset::Seconds(secs) => Ok(secs),
            StartOffset::Formatted(text) => parse_time(&text),
        }
    }
}

/// The authoritative roster: bib number -> racer, plus the watermark used
/// to hand out sequential bibs for bulk-added placeholders. The watermark
/// tracks the highest bib ever assigned, not the highest currently present.
#[derive(Debug, Clone, Default)]
pub struct StartList {
    racers: BTreeMap<BibNumber, Racer>,
    highest_num: BibNumber,
}

impl StartList {
    pub fn new() -> StartList {
        StartList::default()
    }

    /// Registers a racer, overwriting any existing record for the bib.
    pub fn add_racer(
        &mut self,
        number: BibNumber,
        name: &str,
        track: bool,
        offset: impl Into<StartOffset>,
    ) -> Result<()> {
        let offset_secs = offset.into().into_secs()?;
        self.insert(number, name.to_string(), track, offset_secs);
        Ok(())
    }

    fn insert(&mut self, number: BibNumber, name: String, track: bool, offset_secs: u64) {
        self.highest_num = self.highest_num.max(number);
        self.racers.insert(
            number,
            Racer {
                name,
                track,
                offset_secs,
            },
        );
    }

    /// Appends `n` placeholder racers on the default staggered-start
    /// schedule: sequential bibs after the watermark, offsets counting up
    /// from zero in `default_interval_secs` steps.
    pub fn add_some_racers(&mut self, n: u32) {
        let first = self.highest_num + 1;
        for i in 0..n {
            self.insert(
                first + i,
                GLOBAL_CONFIG.placeholder_name.clone(),
                false,
                u64::from(i) * GLOBAL_CONFIG.default_interval_secs,
            );
        }
    }

    fn racer(&self, number: BibNumber) -> Result<&Racer> {
        self.racers.get(&number).ok_or(Error::UnknownBib(number))
    }

    pub fn track(&mut self, number: BibNumber) -> Result<()> {
        let racer = self
            .racers
            .get_mut(&number)
            .ok_or(Error::UnknownBib(number))?;
        racer.track = true;
        Ok(())
    }

    pub fn is_tracked(&self, number: BibNumber) -> Result<bool> {
        Ok(self.racer(number)?.track)
    }

    pub fn offset(&self, number: BibNumber) -> Result<u64> {
        Ok(self.racer(number)?.offset_secs)
    }

    pub fn name(&self, number: BibNumber) -> Result<&str> {
        Ok(self.racer(number)?.name.as_str())
    }

    pub fn contains(&self, number: BibNumber) -> bool {
        self.racers.contains_key(&number)
    }

    /// Raises the watermark to cover every bib currently present, so later
    /// bulk-adds allocate fresh bibs. `load_csv` itself never touches the
    /// watermark; whoever swaps rosters calls this.
    pub(crate) fn reconcile_watermark(&mut self) {
        if let Some(&max) = self.racers.keys().next_back() {
            self.highest_num = self.highest_num.max(max);
        }
    }

    pub fn highest_num(&self) -> BibNumber {
        self.highest_num
    }

    pub fn len(&self) -> usize {
        self.racers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.racers.is_empty()
    }

    pub fn numbers(&self) -> Vec<BibNumber> {
        self.racers.keys().copied().collect()
    }

    /// Lists the roster in ascending bib order.
    pub fn to_list(&self) -> Vec<RacerEntry> {
        self.racers
            .iter()
            .map(|(&number, racer)| RacerEntry {
                number,
                name: racer.name.clone(),
                track: racer.track,
                offset_secs: racer.offset_secs,
            })
            .collect()
    }

    /// Serializes the roster: a `#`-prefixed header line, then one line per
    /// racer in `to_list` order. No trailing newline.
    pub fn to_csv(&self) -> String {
        let mut lines = vec![CSV_HEADER.to_string()];
        for entry in self.to_list() {
            let track = if entry.track { 'y' } else { 'n' };
            lines.push(format!(
                "{},\t{},\t\t{},\t{}",
                entry.number,
                entry.name,
                track,
                format_time(entry.offset_secs)
            ));
        }
        lines.join("\n")
    }

    /// Replaces the whole roster from CSV text; nothing is merged. On any
    /// parse error the previous roster is left untouched. Blank lines and
    /// lines starting with `#` are skipped, which is how the header goes
    /// ignored. The watermark is deliberately not rebuilt from the rows.
    pub fn load_csv(&mut self, csv: &str) -> Result<()> {
        let mut racers = BTreeMap::new();
        for (idx, line) in csv.split('\n').enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != 4 {
                return Err(Error::Csv {
                    line: idx + 1,
                    reason: format!("expected 4 fields, found {}", fields.len()),
                });
            }
            let number: BibNumber = fields[0].parse().map_err(|_| Error::Csv {
                line: idx + 1,
                reason: format!("invalid bib number {:?}", fields[0]),
            })?;
            let offset_secs = parse_time(fields[3]).map_err(|_| Error::Csv {
                line: idx + 1,
                reason: format!("invalid start time {:?}", fields[3]),
            })?;
            racers.insert(
                number,
                Racer {
                    name: fields[1].to_string(),
                    track: fields[2] == "y",
                    offset_secs,
                },
            );
        }
        self.racers = racers;
        Ok(())
    }
}
