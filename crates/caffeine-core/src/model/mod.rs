//! Caffeine decay model.
//!
//! Each dose decays exponentially from the hour it was taken; the total
//! concentration at any time is the sum of every dose's contribution.

mod dose;
mod evaluator;
mod params;

pub use dose::{Dose, DoseAmount, MG_PER_CUP};
pub use evaluator::{evaluate, CaffeineLevels, SampleGrid};
pub use params::{DecayParams, MAX_SAMPLES};
