use serde::{Deserialize, Serialize};

use super::lenient_optional;
use crate::health;

// ---------------------------------------------------------------------------
// Profile: `/user/profile`
// ---------------------------------------------------------------------------

/// User profile as held by the backend.
///
/// Every field is optional; only present fields are sent on save. Numeric
/// fields accept numbers or numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Height in centimeters.
    #[serde(
        default,
        deserialize_with = "lenient_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<f64>,
    /// Weight in kilograms.
    #[serde(
        default,
        deserialize_with = "lenient_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_diabetic: Option<bool>,
}

impl Profile {
    /// BMI from this profile's height and weight, if both are usable.
    pub fn bmi(&self) -> Option<f64> {
        health::compute_bmi(self.height?, self.weight?)
    }
}
