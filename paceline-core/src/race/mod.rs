use std::collections::HashMap;
use std::time::Instant;

use crate::error::Result;
use crate::start_list::{RacerEntry, StartList, StartOffset};
use crate::BibNumber;

mod splits;
#[cfg(test)]
mod tests;

pub use splits::SplitEntry;

/// One timed race over an owned start list. Checkpoints are stored as
/// absolute instants; each racer's start offset is subtracted only when
/// splits are computed, so the gun time never enters the math.
pub struct Race {
    pub name: String,
    start_list: StartList,
    start_time: Option<Instant>,
    checkpoint_times: HashMap<BibNumber, Instant>,
}

impl Race {
    pub fn new(name: &str) -> Race {
        Race {
            name: name.to_string(),
            start_list: StartList::new(),
            start_time: None,
            checkpoint_times: HashMap::new(),
        }
    }

    pub fn add_racer(
        &mut self,
        number: BibNumber,
        name: &str,
        track: bool,
        offset: impl Into<StartOffset>,
    ) -> Result<()> {
        self.start_list.add_racer(number, name, track, offset)
    }

    pub fn add_some_racers(&mut self, n: u32) {
        self.start_list.add_some_racers(n);
    }

    /// Re-registers a batch of listed racers, overwriting by bib.
    pub fn update_racers(&mut self, racers: &[RacerEntry]) -> Result<()> {
        for racer in racers {
            self.start_list
                .add_racer(racer.number, &racer.name, racer.track, racer.offset_secs)?;
        }
        Ok(())
    }

    pub fn racers(&self) -> Vec<RacerEntry> {
        self.start_list.to_list()
    }

    pub fn numbers(&self) -> Vec<BibNumber> {
        self.start_list.numbers()
    }

    pub fn track(&mut self, number: BibNumber) -> Result<()> {
        self.start_list.track(number)
    }

    pub fn is_tracked(&self, number: BibNumber) -> Result<bool> {
        self.start_list.is_tracked(number)
    }

    pub fn start_list(&self) -> &StartList {
        &self.start_list
    }

    /// Marks the gun time. Calling again just moves it; checkpoints taken
    /// before the gun stay valid since split math never reads it.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    pub fn checkpoint(&mut self, number: BibNumber) -> Result<()> {
        self.checkpoint_at(number, Instant::now())
    }

    /// Records a checkpoint at an explicit instant, overwriting any earlier
    /// one for the same bib. The bib must be registered.
    pub fn checkpoint_at(&mut self, number: BibNumber, at: Instant) -> Result<()> {
        self.start_list.offset(number)?;
        self.checkpoint_times.insert(number, at);
        Ok(())
    }

    pub fn has_checkpointed(&self, number: BibNumber) -> bool {
        self.checkpoint_times.contains_key(&number)
    }

    /// Drops the bib's checkpoint, restoring "not finished". No-op when
    /// none was recorded.
    pub fn undo_checkpoint(&mut self, number: BibNumber) {
        self.checkpoint_times.remove(&number);
    }

    /// Clears every checkpoint; the roster and gun time stay.
    pub fn reset(&mut self) {
        self.checkpoint_times.clear();
    }

    pub fn to_csv(&self) -> String {
        self.start_list.to_csv()
    }

    /// Swaps in a roster from CSV text, dropping checkpoints whose bib is
    /// no longer registered so split queries never see an orphan entry,
    /// and raising the bib watermark past the loaded bibs so a later
    /// bulk-add cannot clobber them.
    pub fn load_csv(&mut self, csv: &str) -> Result<()> {
        self.start_list.load_csv(csv)?;
        self.start_list.reconcile_watermark();
        let start_list = &self.start_list;
        self.checkpoint_times
            .retain(|&number, _| start_list.contains(number));
        Ok(())
    }
}
