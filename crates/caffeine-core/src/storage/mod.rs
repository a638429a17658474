mod config;

pub use config::{Config, DisplayConfig, ModelConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/caffeine[-dev]/` based on CAFFEINE_ENV.
///
/// Set CAFFEINE_ENV=dev to use the development data directory, or
/// CAFFEINE_DATA_DIR to use an explicit directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("CAFFEINE_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("CAFFEINE_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("caffeine-dev")
            } else {
                base_dir.join("caffeine")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
