//! Dose types.

use serde::{Deserialize, Serialize};
use std::f64::consts::LN_2;

use crate::error::ValidationError;

/// Milligrams of caffeine in one cup of brewed coffee.
pub const MG_PER_CUP: f64 = 95.0;

/// Sample times closer than this to a dose hour count as the dose hour.
const ONSET_EPSILON: f64 = 1e-9;

/// A single intake event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dose {
    /// Hour of day the dose was taken (0-24)
    pub hour: f64,
    /// Amount of caffeine in milligrams
    pub amount_mg: f64,
}

impl Dose {
    pub fn new(hour: f64, amount_mg: f64) -> Self {
        Self { hour, amount_mg }
    }

    /// Concentration contributed by this dose at time `t` (hours).
    ///
    /// Zero before the dose is taken, `amount_mg` at the dose hour, halving
    /// every `half_life_hours` afterwards.
    pub fn concentration_at(&self, t: f64, half_life_hours: f64) -> f64 {
        if t - self.hour < -ONSET_EPSILON {
            return 0.0;
        }
        self.decayed(t, half_life_hours)
    }

    /// Concentration at a grid sample.
    ///
    /// Onset is decided on `reported_t`, the rounded time callers see, so a
    /// sample reported before the dose hour is always zero. The decay itself
    /// uses the unrounded `exact_t`.
    pub fn sampled_concentration(
        &self,
        reported_t: f64,
        exact_t: f64,
        half_life_hours: f64,
    ) -> f64 {
        if reported_t < self.hour {
            return 0.0;
        }
        self.decayed(exact_t, half_life_hours)
    }

    fn decayed(&self, t: f64, half_life_hours: f64) -> f64 {
        let elapsed = (t - self.hour).max(0.0);
        if elapsed <= ONSET_EPSILON {
            return self.amount_mg;
        }
        self.amount_mg * (-LN_2 * elapsed / half_life_hours).exp()
    }
}

/// Amount entered by the user, either in cups or milligrams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoseAmount {
    Cups(f64),
    Milligrams(f64),
}

impl DoseAmount {
    /// Convert to milligrams, rejecting zero, negative and non-finite amounts.
    pub fn to_mg(self) -> Result<f64, ValidationError> {
        let (raw, mg) = match self {
            DoseAmount::Cups(cups) => (cups, cups * MG_PER_CUP),
            DoseAmount::Milligrams(mg) => (mg, mg),
        };
        if !raw.is_finite() || raw <= 0.0 {
            return Err(ValidationError::InvalidAmount { value: raw });
        }
        Ok(mg)
    }
}

impl Default for DoseAmount {
    fn default() -> Self {
        DoseAmount::Cups(1.0)
    }
}
