use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::{evaluate, CaffeineLevels, DecayParams, Dose, DoseAmount};

/// Doses kept in ascending hour order.
///
/// Doses taken at the same hour keep the order they were added in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoseLog {
    doses: Vec<Dose>,
}

impl DoseLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from arbitrary doses, sorting them by hour.
    pub fn from_doses(doses: Vec<Dose>) -> Self {
        let mut log = Self { doses };
        log.sort();
        log
    }

    pub fn doses(&self) -> &[Dose] {
        &self.doses
    }

    pub fn len(&self) -> usize {
        self.doses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doses.is_empty()
    }

    /// Add one dose of `amount` at each of `hours`.
    ///
    /// Returns the number of doses added. Nothing is added if the amount
    /// is invalid.
    pub fn add(&mut self, hours: &[u8], amount: DoseAmount) -> Result<usize, ValidationError> {
        let amount_mg = amount.to_mg()?;
        self.doses
            .extend(hours.iter().map(|&hour| Dose::new(f64::from(hour), amount_mg)));
        self.sort();
        Ok(hours.len())
    }

    /// Remove the dose at `index` (position in hour order).
    pub fn remove(&mut self, index: usize) -> Result<Dose, ValidationError> {
        if index >= self.doses.len() {
            return Err(ValidationError::OutOfBounds {
                collection: "dose log".to_string(),
                index,
                len: self.doses.len(),
            });
        }
        Ok(self.doses.remove(index))
    }

    pub fn clear(&mut self) {
        self.doses.clear();
    }

    /// Total milligrams across all doses.
    pub fn total_mg(&self) -> f64 {
        self.doses.iter().map(|d| d.amount_mg).sum()
    }

    /// Evaluate the decay model over this log.
    pub fn levels(&self, params: &DecayParams) -> Result<CaffeineLevels, ValidationError> {
        evaluate(&self.doses, params)
    }

    fn sort(&mut self) {
        self.doses.sort_by(|a, b| a.hour.total_cmp(&b.hour));
    }
}
