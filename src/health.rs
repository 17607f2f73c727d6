//! Body-mass index and its display classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// BMI = weight / (height in meters)², rounded half-up to one decimal.
///
/// Returns `None` ("unavailable") when either input is missing from the
/// caller's point of view: zero, negative, NaN or infinite.
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    let usable = |x: f64| x.is_finite() && x > 0.0;
    if !usable(height_cm) || !usable(weight_kg) {
        return None;
    }
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    if !bmi.is_finite() {
        return None;
    }
    Some(round_half_up(bmi, 1))
}

/// Round a non-negative value half-up to `decimals` places.
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale + 0.5).floor() / scale
}

// ---------------------------------------------------------------------------
// BmiCategory
// ---------------------------------------------------------------------------

/// Presentation bands. Classification never feeds back into stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obesity,
}

impl BmiCategory {
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obesity
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obesity => "Obesity",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
