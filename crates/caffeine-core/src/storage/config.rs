//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Decay model parameters (half-life, sample resolution, horizon)
//! - Display unit (cups or milligrams)
//! - Text chart dimensions and legend limit
//!
//! Configuration is stored at `~/.config/caffeine/config.toml`.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::chart::{AsciiChartOptions, DEFAULT_LEGEND_LIMIT};
use crate::error::{ConfigError, CoreError, Result};
use crate::format::DisplayUnit;
use crate::model::DecayParams;

/// Decay model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_half_life")]
    pub half_life_hours: f64,
    #[serde(default = "default_resolution")]
    pub resolution_hours: f64,
    #[serde(default = "default_horizon")]
    pub horizon_hours: f64,
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub unit: DisplayUnit,
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
    #[serde(default = "default_chart_height")]
    pub chart_height: usize,
    /// Dose curves appear in the legend only up to this many doses
    #[serde(default = "default_max_dose_curves")]
    pub max_dose_curves: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/caffeine/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

// Default functions
fn default_half_life() -> f64 {
    DecayParams::default().half_life_hours
}
fn default_resolution() -> f64 {
    DecayParams::default().resolution_hours
}
fn default_horizon() -> f64 {
    DecayParams::default().horizon_hours
}
fn default_chart_width() -> usize {
    AsciiChartOptions::default().width
}
fn default_chart_height() -> usize {
    AsciiChartOptions::default().height
}
fn default_max_dose_curves() -> usize {
    DEFAULT_LEGEND_LIMIT
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            half_life_hours: default_half_life(),
            resolution_hours: default_resolution(),
            horizon_hours: default_horizon(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            unit: DisplayUnit::default(),
            chart_width: default_chart_width(),
            chart_height: default_chart_height(),
            max_dose_curves: default_max_dose_curves(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown().into());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(n) if n.is_u64() => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?,
                    serde_json::Value::Number(_) => value
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot set a whole section".to_string()).into());
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown().into())
    }

    /// Location of `config.toml` inside the data directory.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(cfg)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key in memory. Returns error if key is unknown
    /// or the resulting configuration is invalid.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Check that the model parameters are usable.
    pub fn validate(&self) -> Result<()> {
        self.decay_params()?;
        if self.display.chart_width == 0 || self.display.chart_height == 0 {
            return Err(ConfigError::InvalidValue {
                key: "display".to_string(),
                message: "chart dimensions must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Validated decay parameters.
    pub fn decay_params(&self) -> Result<DecayParams> {
        DecayParams::new(
            self.model.half_life_hours,
            self.model.resolution_hours,
            self.model.horizon_hours,
        )
        .map_err(CoreError::from)
    }

    pub fn chart_options(&self) -> AsciiChartOptions {
        AsciiChartOptions {
            width: self.display.chart_width,
            height: self.display.chart_height,
            marker_hour: None,
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.model.half_life_hours, 5.0);
        assert_eq!(parsed.display.unit, DisplayUnit::Cups);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[model]\nhalf_life_hours = 3.0\n").unwrap();
        assert_eq!(parsed.model.half_life_hours, 3.0);
        assert_eq!(parsed.model.resolution_hours, 0.1);
        assert_eq!(parsed.display.chart_width, 72);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("model.half_life_hours").as_deref(), Some("5.0"));
        assert_eq!(cfg.get("display.unit").as_deref(), Some("cups"));
        assert_eq!(cfg.get("display.max_dose_curves").as_deref(), Some("6"));
        assert!(cfg.get("model.missing_key").is_none());
        assert!(cfg.get("model").is_none());
    }

    #[test]
    fn apply_updates_float() {
        let mut cfg = Config::default();
        cfg.apply("model.half_life_hours", "6.5").unwrap();
        assert_eq!(cfg.model.half_life_hours, 6.5);
    }

    #[test]
    fn apply_updates_integer_and_unit() {
        let mut cfg = Config::default();
        cfg.apply("display.chart_width", "40").unwrap();
        cfg.apply("display.unit", "mg").unwrap();
        assert_eq!(cfg.display.chart_width, 40);
        assert_eq!(cfg.display.unit, DisplayUnit::Mg);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.apply("model.nonexistent_key", "1").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));
        assert!(cfg.apply("", "1").is_err());
    }

    #[test]
    fn apply_rejects_invalid_values() {
        let mut cfg = Config::default();
        assert!(cfg.apply("model.half_life_hours", "soon").is_err());
        assert!(cfg.apply("display.unit", "liters").is_err());
        assert!(cfg.apply("display.chart_width", "-3").is_err());
        assert!(cfg.apply("model", "1").is_err());
        assert_eq!(cfg.model.half_life_hours, 5.0);
        assert_eq!(cfg.display.unit, DisplayUnit::Cups);
    }

    #[test]
    fn apply_rejects_non_positive_half_life() {
        let mut cfg = Config::default();
        let err = cfg.apply("model.half_life_hours", "0").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(cfg.model.half_life_hours, 5.0);
    }

    #[test]
    fn load_from_missing_path_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.model.half_life_hours, 5.0);
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.apply("model.half_life_hours", "4.0").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.model.half_life_hours, 4.0);
    }

    #[test]
    fn load_from_rejects_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[model]\nhalf_life_hours = -1.0\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::LoadFailed { .. }))
        ));
    }

    #[test]
    fn decay_params_reflect_model_section() {
        let mut cfg = Config::default();
        cfg.model.half_life_hours = 7.0;
        let params = cfg.decay_params().unwrap();
        assert_eq!(params.half_life_hours, 7.0);
        assert_eq!(params.sample_count(), Ok(241));
    }
}
