//! Display units and human-readable labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::model::MG_PER_CUP;

/// Unit used when presenting amounts and curves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    /// Cups of coffee (95 mg each)
    #[default]
    Cups,
    /// Milligrams of caffeine
    Mg,
}

impl DisplayUnit {
    /// Factor converting milligrams into this unit.
    pub fn scale(self) -> f64 {
        match self {
            DisplayUnit::Cups => 1.0 / MG_PER_CUP,
            DisplayUnit::Mg => 1.0,
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            DisplayUnit::Cups => "Cups of coffee in your system",
            DisplayUnit::Mg => "Caffeine (mg)",
        }
    }

    pub fn total_label(self) -> &'static str {
        match self {
            DisplayUnit::Cups => "Total caffeine (cups equivalent)",
            DisplayUnit::Mg => "Total caffeine (mg)",
        }
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayUnit::Cups => write!(f, "cups"),
            DisplayUnit::Mg => write!(f, "mg"),
        }
    }
}

impl FromStr for DisplayUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cups" | "cup" => Ok(DisplayUnit::Cups),
            "mg" | "milligrams" => Ok(DisplayUnit::Mg),
            other => Err(ValidationError::InvalidValue {
                field: "unit".to_string(),
                message: format!("'{other}' is not one of: cups, mg"),
            }),
        }
    }
}

/// 12-hour clock label for an hour of day, e.g. `12 AM`, `3 PM`.
pub fn format_hour(hour: f64) -> String {
    let hour24 = (hour.floor() as i64).rem_euclid(24);
    let suffix = if hour24 >= 12 { "PM" } else { "AM" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12} {suffix}")
}

/// Label for a dose amount.
pub fn format_amount(amount_mg: f64, unit: DisplayUnit) -> String {
    match unit {
        DisplayUnit::Mg => format!("{} mg", amount_mg.round()),
        DisplayUnit::Cups => {
            let cups = amount_mg / MG_PER_CUP;
            if cups == 1.0 {
                "1 cup".to_string()
            } else if cups.fract() == 0.0 {
                format!("{cups:.0} cups")
            } else {
                format!("{cups:.2} cups")
            }
        }
    }
}

/// Label for a value on the concentration axis.
pub fn format_y_value(amount_mg: f64, unit: DisplayUnit) -> String {
    match unit {
        DisplayUnit::Mg => format!("{} mg", amount_mg.round()),
        DisplayUnit::Cups => format!("{:.1}", amount_mg / MG_PER_CUP),
    }
}

/// Tooltip line for a dataset value already scaled to `unit`.
pub fn format_tooltip(label: &str, value: f64, unit: DisplayUnit) -> String {
    match unit {
        DisplayUnit::Mg => format!(" {label}: {} mg", value.round()),
        DisplayUnit::Cups => format!(" {label}: {value:.2} cups"),
    }
}
