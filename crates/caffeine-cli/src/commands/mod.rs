pub mod config;
pub mod curve;
pub mod dose;

use std::path::PathBuf;

use caffeine_core::DoseStore;

/// Dose store at `path`, or in the data directory when none is given.
pub fn dose_store(path: Option<PathBuf>) -> Result<DoseStore, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(DoseStore::at(path)),
        None => Ok(DoseStore::open()?),
    }
}
