//! Decay model evaluator.
//!
//! Samples every dose on a fixed time grid and sums the contributions.
//! Decay is computed from the exact sample time `i * resolution`; only the
//! time points handed back to callers are rounded to two decimals. Onset is
//! judged on those rounded time points.

use serde::{Deserialize, Serialize};

use super::dose::Dose;
use super::params::DecayParams;
use crate::error::ValidationError;

/// Evenly spaced sample times from 0 to the horizon inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    resolution_hours: f64,
    len: usize,
}

impl SampleGrid {
    pub fn new(params: &DecayParams) -> Result<Self, ValidationError> {
        Ok(Self {
            resolution_hours: params.resolution_hours,
            len: params.sample_count()?,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exact sample time used for the decay computation.
    pub fn time(&self, index: usize) -> f64 {
        index as f64 * self.resolution_hours
    }

    /// Sample time rounded to two decimals for presentation.
    pub fn display_time(&self, index: usize) -> f64 {
        round_to_hundredths(self.time(index))
    }

    /// Index of the sample nearest to `hour`, clamped to the grid.
    pub fn nearest_index(&self, hour: f64) -> usize {
        if self.len == 0 || !hour.is_finite() || hour <= 0.0 {
            return 0;
        }
        let index = (hour / self.resolution_hours).round() as usize;
        index.min(self.len - 1)
    }
}

/// Sampled concentration curves for a set of doses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaffeineLevels {
    /// Sample times, rounded to two decimals
    pub time_points: Vec<f64>,
    /// Sum of every dose's curve at each sample
    pub total: Vec<f64>,
    /// One curve per dose, in the order the doses were given
    pub per_dose: Vec<Vec<f64>>,
    /// Spacing of the sample grid
    pub resolution_hours: f64,
}

impl CaffeineLevels {
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    /// Grid these levels were sampled on.
    pub fn grid(&self) -> SampleGrid {
        SampleGrid {
            resolution_hours: self.resolution_hours,
            len: self.len(),
        }
    }

    /// Index of the sample nearest to `hour`, clamped to the grid.
    pub fn sample_index(&self, hour: f64) -> Option<usize> {
        if self.is_empty() || !hour.is_finite() {
            return None;
        }
        Some(self.grid().nearest_index(hour))
    }

    /// Total concentration at the sample nearest to `hour`.
    pub fn value_at(&self, hour: f64) -> Option<f64> {
        self.sample_index(hour).map(|i| self.total[i])
    }

    /// Time and value of the highest total sample. The first sample wins ties.
    pub fn peak(&self) -> Option<(f64, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &value) in self.total.iter().enumerate() {
            match best {
                Some((_, current)) if value <= current => {}
                _ => best = Some((i, value)),
            }
        }
        best.map(|(i, value)| (self.time_points[i], value))
    }
}

/// Evaluate the decay model for `doses` on the grid described by `params`.
///
/// Returns `InvalidParameter` when the half-life, resolution or horizon is
/// not strictly positive, and `TooManySamples` when the grid would exceed
/// [`MAX_SAMPLES`](super::params::MAX_SAMPLES). Dose hours are not range-checked.
pub fn evaluate(doses: &[Dose], params: &DecayParams) -> Result<CaffeineLevels, ValidationError> {
    let grid = SampleGrid::new(params)?;
    let n = grid.len();

    let time_points: Vec<f64> = (0..n).map(|i| grid.display_time(i)).collect();
    let mut total = vec![0.0; n];
    let mut per_dose = Vec::with_capacity(doses.len());

    for dose in doses {
        let curve: Vec<f64> = (0..n)
            .map(|i| {
                dose.sampled_concentration(
                    time_points[i],
                    grid.time(i),
                    params.half_life_hours,
                )
            })
            .collect();
        for (sum, value) in total.iter_mut().zip(&curve) {
            *sum += value;
        }
        per_dose.push(curve);
    }

    tracing::debug!(
        doses = doses.len(),
        samples = n,
        half_life_hours = params.half_life_hours,
        "evaluated caffeine levels"
    );

    Ok(CaffeineLevels {
        time_points,
        total,
        per_dose,
        resolution_hours: params.resolution_hours,
    })
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
