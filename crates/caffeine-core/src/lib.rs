//! # Caffeine Core Library
//!
//! This library models caffeine concentration over a day. Every dose decays
//! exponentially with a configurable half-life and the total level is the
//! sum of all doses. The CLI binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Model**: the decay model evaluator, a pure function from doses and
//!   grid parameters to sampled total and per-dose curves
//! - **Doses**: the ordered dose log and its JSON store
//! - **Chart**: unit-scaled datasets, CSV export and a text chart renderer
//! - **Storage**: data directory and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`evaluate`]: Decay model evaluator
//! - [`DoseLog`]: Ordered, owned list of doses
//! - [`ChartData`]: Labelled datasets for plotting
//! - [`Config`]: Application configuration management

pub mod chart;
pub mod doses;
pub mod error;
pub mod format;
pub mod model;
pub mod storage;

pub use chart::{render_ascii, AsciiChartOptions, ChartData, Dataset, DatasetKind};
pub use doses::{parse_hours, DoseLog, DoseStore};
pub use error::{ConfigError, CoreError, ValidationError};
pub use format::{format_amount, format_hour, format_y_value, DisplayUnit};
pub use model::{
    evaluate, CaffeineLevels, DecayParams, Dose, DoseAmount, SampleGrid, MAX_SAMPLES, MG_PER_CUP,
};
pub use storage::{Config, DisplayConfig, ModelConfig};
