use thiserror::Error;

use crate::BibNumber;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything here is recoverable; callers report and carry on.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no racer with bib number {0}")]
    UnknownBib(BibNumber),
    #[error("invalid time {0:?}: expected mm:ss")]
    InvalidTime(String),
    #[error("csv line {line}: {reason}")]
    Csv { line: usize, reason: String },
    #[error("race {0:?} already exists")]
    DuplicateRace(String),
    #[error("no race named {0:?}")]
    UnknownRace(String),
    #[error("invalid race bundle: {0}")]
    Bundle(String),
    #[error("storage error: {0}")]
    Storage(String),
}
