//! Configuration commands for the model and display settings.

use clap::Subcommand;
use caffeine_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting (e.g. "model.half_life_hours", "display.unit")
    Get { key: String },
    /// Change one setting; the whole config is validated before saving
    Set { key: String, value: String },
    /// Print every setting as JSON
    List,
    /// Print the location of config.toml, creating it with defaults if missing
    Path,
    /// Restore the default half-life, grid and display settings
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or_else(|| format!("unknown config key: {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            Config::load()?;
            println!("{}", Config::path()?.display());
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            let params = Config::default().decay_params()?;
            println!(
                "Config reset: half-life {} h, resolution {} h, horizon {} h",
                params.half_life_hours, params.resolution_hours, params.horizon_hours
            );
        }
    }
    Ok(())
}
