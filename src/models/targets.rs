use serde::{Deserialize, Serialize};

use super::nutrition::Nutrient;
use super::{lenient_amount, lenient_optional};
use crate::config;
use crate::error::{NutriGuardError, Result};

// ---------------------------------------------------------------------------
// GoalTargets: per-nutrient daily goals used for progress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTargets {
    pub calorie_goal: f64,
    pub protein_goal: f64,
    pub carbs_goal: f64,
    pub fat_goal: f64,
    pub sugar_goal: f64,
    pub fiber_goal: f64,
}

impl Default for GoalTargets {
    fn default() -> Self {
        Self {
            calorie_goal: config::DEFAULT_CALORIE_GOAL,
            protein_goal: config::DEFAULT_PROTEIN_GOAL,
            carbs_goal: config::DEFAULT_CARBS_GOAL,
            fat_goal: config::DEFAULT_FAT_GOAL,
            sugar_goal: config::DEFAULT_SUGAR_GOAL,
            fiber_goal: config::DEFAULT_FIBER_GOAL,
        }
    }
}

impl GoalTargets {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calorie_goal,
            Nutrient::Protein => self.protein_goal,
            Nutrient::Carbs => self.carbs_goal,
            Nutrient::Fat => self.fat_goal,
            Nutrient::Sugar => self.sugar_goal,
            Nutrient::Fiber => self.fiber_goal,
        }
    }
}

impl From<&UserTargets> for GoalTargets {
    fn from(t: &UserTargets) -> Self {
        Self {
            calorie_goal: t.calories,
            protein_goal: t.protein,
            carbs_goal: t.carbs,
            fat_goal: t.fat,
            sugar_goal: t.max_sugar,
            fiber_goal: t.fiber_target.unwrap_or(config::DEFAULT_FIBER_GOAL),
        }
    }
}

// ---------------------------------------------------------------------------
// UserTargets: persisted targets (`dailyTarget` record, `/user/targets`)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTargets {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub protein: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub fat: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub max_sugar: f64,
    #[serde(
        default,
        deserialize_with = "lenient_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub fiber_target: Option<f64>,
}

// ---------------------------------------------------------------------------
// MacroPlanInput / MacroPlanResponse: `/macro-plan`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    Lose,
    Maintain,
    Gain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    VeryActive,
    Athlete,
}

/// Body metrics and intent the backend turns into daily macro targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroPlanInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub sex: Sex,
    pub goal: GoalKind,
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub is_diabetic: bool,
}

impl MacroPlanInput {
    /// Reject inputs the backend cannot plan for.
    pub fn validate(&self) -> Result<()> {
        if !(self.weight_kg.is_finite() && self.weight_kg > 0.0) {
            return Err(NutriGuardError::InvalidArgument(format!(
                "weightKg must be positive, got {}",
                self.weight_kg
            )));
        }
        if !(self.height_cm.is_finite() && self.height_cm > 0.0) {
            return Err(NutriGuardError::InvalidArgument(format!(
                "heightCm must be positive, got {}",
                self.height_cm
            )));
        }
        if self.age == 0 {
            return Err(NutriGuardError::InvalidArgument(
                "age must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroPlanResponse {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub protein: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub fat: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub max_sugar: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub fiber_target: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub bmr: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub tdee: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_diabetic: Option<bool>,
}

impl MacroPlanResponse {
    /// The subset of the plan that is persisted as the user's targets.
    pub fn targets(&self) -> UserTargets {
        UserTargets {
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
            max_sugar: self.max_sugar,
            fiber_target: Some(self.fiber_target),
        }
    }
}
