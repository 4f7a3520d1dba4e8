//! Timing and ranking engine for staggered-start races.

pub mod error;
pub mod race;
pub mod registry;
pub mod start_list;
pub mod time;
mod settings;

pub use settings::GLOBAL_CONFIG;

pub type BibNumber = u32;
