//! JSON-backed dose log storage.
//!
//! The log is kept at `~/.config/caffeine/doses.json` unless an explicit
//! path is given.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::log::DoseLog;
use crate::error::Result;
use crate::storage::data_dir;

/// Loads and saves a [`DoseLog`] at a fixed path.
#[derive(Debug, Clone)]
pub struct DoseStore {
    path: PathBuf,
}

impl DoseStore {
    /// Store in the default data directory.
    pub fn open() -> Result<Self> {
        Ok(Self::at(data_dir()?.join("doses.json")))
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the log. A missing file is an empty log.
    pub fn load(&self) -> Result<DoseLog> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let log: DoseLog = serde_json::from_str(&content)?;
                tracing::debug!(path = %self.path.display(), doses = log.len(), "loaded dose log");
                Ok(DoseLog::from_doses(log.doses().to_vec()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(DoseLog::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the log, creating parent directories as needed.
    pub fn save(&self, log: &DoseLog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(log)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), doses = log.len(), "saved dose log");
        Ok(())
    }
}
