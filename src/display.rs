//! Presentation helpers: whole-unit amounts, BMI text and weekly colours.

use crate::health::BmiCategory;
use crate::models::{Nutrient, WeeklyStatus};

/// Amount rounded to the nearest whole unit with its unit, e.g. `"173 kcal"`.
pub fn format_amount(nutrient: Nutrient, value: f64) -> String {
    let whole = if value.is_finite() { value.round().max(0.0) } else { 0.0 };
    format!("{} {}", whole as u64, nutrient.unit())
}

/// `"24.2 (Normal)"`, or `"N/A"` when BMI is unavailable.
pub fn format_bmi(bmi: Option<f64>) -> String {
    match bmi {
        Some(value) => format!("{:.1} ({})", value, BmiCategory::classify(value)),
        None => "N/A".to_string(),
    }
}

/// Progress percentage as a whole number, e.g. `"45%"`.
pub fn format_percent(percent: f64) -> String {
    let clamped = if percent.is_finite() { percent.clamp(0.0, 100.0) } else { 0.0 };
    format!("{}%", clamped.round() as u64)
}

pub fn weekly_status_color(status: WeeklyStatus) -> &'static str {
    match status {
        WeeklyStatus::Achieved => "#90be6d",
        WeeklyStatus::NotAchieved => "#f94144",
        WeeklyStatus::NoData => "#d3d3d3",
    }
}
