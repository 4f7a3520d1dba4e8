use std::collections::{BTreeMap, HashMap};

use log::info;

use crate::error::{Error, Result};
use crate::race::Race;
use crate::GLOBAL_CONFIG;

/// Opaque blob channel the registry persists through. Implementations live
/// outside the core: a directory of files, a key-value endpoint, whatever
/// can get and put named text.
pub trait Storage {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, text: &str) -> Result<()>;
}

/// All known races by name.
#[derive(Default)]
pub struct RaceRegistry {
    races: HashMap<String, Race>,
}

impl RaceRegistry {
    pub fn new() -> RaceRegistry {
        RaceRegistry::default()
    }

    pub fn add_race(&mut self, name: &str) -> Result<&mut Race> {
        if self.races.contains_key(name) {
            return Err(Error::DuplicateRace(name.to_string()));
        }
        Ok(self
            .races
            .entry(name.to_string())
            .or_insert_with(|| Race::new(name)))
    }

    pub fn remove_race(&mut self, name: &str) -> Result<Race> {
        self.races
            .remove(name)
            .ok_or_else(|| Error::UnknownRace(name.to_string()))
    }

    pub fn race(&self, name: &str) -> Option<&Race> {
        self.races.get(name)
    }

    pub fn race_mut(&mut self, name: &str) -> Option<&mut Race> {
        self.races.get_mut(name)
    }

    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.races.keys().cloned().collect();
        names.sort();
        names
    }

    /// Serializes every roster into one JSON blob of race name -> CSV text.
    /// Live timing state (checkpoints, gun time) is not persisted.
    pub fn to_bundle(&self) -> Result<String> {
        let rosters: BTreeMap<&str, String> = self
            .races
            .iter()
            .map(|(name, race)| (name.as_str(), race.to_csv()))
            .collect();
        serde_json::to_string(&rosters).map_err(|e| Error::Bundle(e.to_string()))
    }

    /// Replaces the race set from a bundle produced by `to_bundle`. A bad
    /// bundle leaves the current races untouched.
    pub fn apply_bundle(&mut self, bundle: &str) -> Result<()> {
        let rosters: BTreeMap<String, String> =
            serde_json::from_str(bundle).map_err(|e| Error::Bundle(e.to_string()))?;
        let mut races = HashMap::new();
        for (name, csv) in rosters {
            let mut race = Race::new(&name);
            race.load_csv(&csv)?;
            races.insert(name, race);
        }
        self.races = races;
        Ok(())
    }

    /// Persists the bundle under the configured storage key.
    pub fn store(&self, storage: &mut dyn Storage) -> Result<()> {
        storage.save(&GLOBAL_CONFIG.storage_key, &self.to_bundle()?)?;
        info!("stored {} race(s)", self.races.len());
        Ok(())
    }

    /// Pulls the bundle from storage; a missing blob is not an error.
    pub fn load(&mut self, storage: &dyn Storage) -> Result<bool> {
        match storage.load(&GLOBAL_CONFIG.storage_key)? {
            Some(bundle) => {
                self.apply_bundle(&bundle)?;
                info!("loaded {} race(s)", self.races.len());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
