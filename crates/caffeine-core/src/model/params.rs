use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest sample grid the evaluator will allocate.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Parameters of the decay model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayParams {
    /// Time for the concentration of a dose to halve
    pub half_life_hours: f64,
    /// Spacing between samples
    pub resolution_hours: f64,
    /// Last sample time; samples run from 0 to this inclusive
    pub horizon_hours: f64,
}

impl Default for DecayParams {
    fn default() -> Self {
        Self {
            half_life_hours: 5.0,
            resolution_hours: 0.1,
            horizon_hours: 24.0,
        }
    }
}

impl DecayParams {
    /// Build validated parameters.
    pub fn new(
        half_life_hours: f64,
        resolution_hours: f64,
        horizon_hours: f64,
    ) -> Result<Self, ValidationError> {
        let params = Self {
            half_life_hours,
            resolution_hours,
            horizon_hours,
        };
        params.validate()?;
        Ok(params)
    }

    /// Default parameters with a different half-life.
    pub fn with_half_life(half_life_hours: f64) -> Result<Self, ValidationError> {
        let defaults = Self::default();
        Self::new(half_life_hours, defaults.resolution_hours, defaults.horizon_hours)
    }

    /// Every parameter must be strictly positive and finite, and the grid
    /// must fit within [`MAX_SAMPLES`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.sample_count().map(|_| ())
    }

    /// Number of samples on the grid: `round(horizon / resolution) + 1`.
    pub fn sample_count(&self) -> Result<usize, ValidationError> {
        check_positive("half_life_hours", self.half_life_hours)?;
        check_positive("resolution_hours", self.resolution_hours)?;
        check_positive("horizon_hours", self.horizon_hours)?;

        // Compared as a float so the cast below can neither saturate nor overflow.
        let intervals = (self.horizon_hours / self.resolution_hours).round();
        if !intervals.is_finite() || intervals >= MAX_SAMPLES as f64 {
            return Err(ValidationError::TooManySamples {
                samples: intervals + 1.0,
                max: MAX_SAMPLES,
            });
        }
        Ok(intervals as usize + 1)
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_calculator_page() {
        let params = DecayParams::default();
        assert_eq!(params.half_life_hours, 5.0);
        assert_eq!(params.resolution_hours, 0.1);
        assert_eq!(params.horizon_hours, 24.0);
        assert_eq!(params.sample_count(), Ok(241));
    }

    #[test]
    fn rejects_non_positive_parameters() {
        assert_eq!(
            DecayParams::new(0.0, 0.1, 24.0),
            Err(ValidationError::InvalidParameter {
                name: "half_life_hours",
                value: 0.0
            })
        );
        assert!(matches!(
            DecayParams::new(5.0, -0.1, 24.0),
            Err(ValidationError::InvalidParameter { name: "resolution_hours", .. })
        ));
        assert!(matches!(
            DecayParams::new(5.0, 0.1, 0.0),
            Err(ValidationError::InvalidParameter { name: "horizon_hours", .. })
        ));
    }

    #[test]
    fn rejects_non_finite_parameters() {
        assert!(DecayParams::new(f64::NAN, 0.1, 24.0).is_err());
        assert!(DecayParams::new(5.0, f64::INFINITY, 24.0).is_err());
    }

    #[test]
    fn oversized_grids_are_rejected() {
        let params = DecayParams {
            half_life_hours: 5.0,
            resolution_hours: 1e-5,
            horizon_hours: 1e15,
        };
        assert!(matches!(
            params.sample_count(),
            Err(ValidationError::TooManySamples { max: MAX_SAMPLES, .. })
        ));
        assert!(DecayParams::new(5.0, 1e-15, 24.0).is_err());
        assert!(DecayParams::new(5.0, 1e-12, 24.0).is_err());
        assert!(DecayParams::new(5.0, f64::MIN_POSITIVE, f64::MAX).is_err());
    }

    #[test]
    fn grid_at_the_limit_is_accepted() {
        let params = DecayParams::new(5.0, 1.0, (MAX_SAMPLES - 1) as f64).unwrap();
        assert_eq!(params.sample_count(), Ok(MAX_SAMPLES));
        assert!(DecayParams::new(5.0, 1.0, MAX_SAMPLES as f64).is_err());
    }

    #[test]
    fn with_half_life_keeps_grid_defaults() {
        let params = DecayParams::with_half_life(3.5).unwrap();
        assert_eq!(params.half_life_hours, 3.5);
        assert_eq!(params.sample_count(), Ok(241));
    }
}
