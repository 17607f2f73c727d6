use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::{lenient_amount, lenient_string};

// ---------------------------------------------------------------------------
// Nutrient: the six tracked quantities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fat,
    Sugar,
    Fiber,
}

impl Nutrient {
    pub const ALL: [Nutrient; 6] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fat,
        Nutrient::Sugar,
        Nutrient::Fiber,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::Protein => "Protein",
            Nutrient::Carbs => "Carbohydrate",
            Nutrient::Fat => "Fat",
            Nutrient::Sugar => "Sugar",
            Nutrient::Fiber => "Fiber",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            _ => "g",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// NutritionLineItem: one identified food from a scan
// ---------------------------------------------------------------------------

/// Nutrition of one food item as returned by the identification service.
///
/// Every amount is coerced on the way in: numeric strings are accepted,
/// anything missing, malformed, negative or non-finite becomes `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionLineItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub protein_g: f64,
    #[serde(
        default,
        rename = "carbohydrates_total_g",
        alias = "carbohydrates_g",
        deserialize_with = "lenient_amount"
    )]
    pub carbohydrates_g: f64,
    #[serde(
        default,
        rename = "fat_total_g",
        alias = "fat_g",
        deserialize_with = "lenient_amount"
    )]
    pub fat_g: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub sugar_g: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub fiber_g: f64,
}

impl NutritionLineItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Amount of `nutrient` in this item, clamped to a non-negative finite value.
    pub fn amount(&self, nutrient: Nutrient) -> f64 {
        let raw = match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein_g,
            Nutrient::Carbs => self.carbohydrates_g,
            Nutrient::Fat => self.fat_g,
            Nutrient::Sugar => self.sugar_g,
            Nutrient::Fiber => self.fiber_g,
        };
        if raw.is_finite() && raw > 0.0 {
            raw
        } else {
            0.0
        }
    }
}

// ---------------------------------------------------------------------------
// ScanResult: identification response envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default)]
    pub items: Vec<NutritionLineItem>,
}

impl ScanResult {
    /// Build a scan result from a raw identification response.
    ///
    /// Accepts either `{"items": [...]}` or a bare array. Entries that are not
    /// JSON objects are skipped; a body with no recognizable items yields an
    /// empty result.
    pub fn from_value(value: &Value) -> Self {
        let raw_items: &[Value] = match value {
            Value::Object(map) => match map.get("items") {
                Some(Value::Array(arr)) => arr.as_slice(),
                _ => &[],
            },
            Value::Array(arr) => arr.as_slice(),
            _ => &[],
        };

        let items = raw_items
            .iter()
            .filter_map(|raw| {
                if !raw.is_object() {
                    tracing::warn!(item = %raw, "skipping non-object nutrition item");
                    return None;
                }
                match serde_json::from_value::<NutritionLineItem>(raw.clone()) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping unreadable nutrition item");
                        None
                    }
                }
            })
            .collect();

        Self { items }
    }

    /// Parse a raw identification response body. Invalid JSON yields no items.
    pub fn from_json_str(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                tracing::warn!(error = %e, "identification response is not JSON");
                Self::default()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// DailyTotals: the ledger's persisted running totals
// ---------------------------------------------------------------------------

/// Running totals for the current day.
///
/// Stored under the `nutritionTotals` key as
/// `{calories, protein, carbs, fat, sugar, fiber}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub protein: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub fat: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub sugar: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub fiber: f64,
}

impl DailyTotals {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
            Nutrient::Sugar => self.sugar,
            Nutrient::Fiber => self.fiber,
        }
    }

    fn slot(&mut self, nutrient: Nutrient) -> &mut f64 {
        match nutrient {
            Nutrient::Calories => &mut self.calories,
            Nutrient::Protein => &mut self.protein,
            Nutrient::Carbs => &mut self.carbs,
            Nutrient::Fat => &mut self.fat,
            Nutrient::Sugar => &mut self.sugar,
            Nutrient::Fiber => &mut self.fiber,
        }
    }

    /// Field-wise sum. Negative or non-finite components of `other` are ignored.
    pub fn plus(&self, other: &DailyTotals) -> DailyTotals {
        let mut out = *self;
        for n in Nutrient::ALL {
            let add = other.get(n);
            if add.is_finite() && add > 0.0 {
                *out.slot(n) += add;
            }
        }
        out
    }

    pub fn is_zero(&self) -> bool {
        Nutrient::ALL.iter().all(|n| self.get(*n) == 0.0)
    }
}
