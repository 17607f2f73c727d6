//! Goal-relative progress derived from totals and targets. Pure functions.

use serde::{Deserialize, Serialize};

use crate::models::{DailyTotals, GoalTargets, Nutrient};

/// Fill level of one nutrient against its goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientProgress {
    pub nutrient: Nutrient,
    /// Share of the goal reached, in `[0, 100]`.
    pub percent: f64,
    /// Strictly above the goal. Reaching it exactly is not "over".
    pub over_goal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    entries: [NutrientProgress; 6],
}

impl Progress {
    pub fn get(&self, nutrient: Nutrient) -> NutrientProgress {
        // Entries are laid out in `Nutrient::ALL` order.
        let idx = Nutrient::ALL
            .iter()
            .position(|n| *n == nutrient)
            .unwrap_or(0);
        self.entries[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = &NutrientProgress> {
        self.entries.iter()
    }

    /// Nutrients currently above their goal.
    pub fn over_goal(&self) -> Vec<Nutrient> {
        self.entries
            .iter()
            .filter(|p| p.over_goal)
            .map(|p| p.nutrient)
            .collect()
    }
}

/// Percentage of `goal` reached by `total`, clamped to `[0, 100]`.
///
/// A zero, negative or non-finite goal, or a non-finite total, gives `0`.
pub fn percent_of_goal(total: f64, goal: f64) -> f64 {
    if !total.is_finite() || !goal.is_finite() || goal <= 0.0 {
        return 0.0;
    }
    let percent = total / goal * 100.0;
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Per-nutrient fill ratios and over-goal flags.
pub fn compute_progress(totals: &DailyTotals, goals: &GoalTargets) -> Progress {
    let entries = Nutrient::ALL.map(|nutrient| {
        let total = totals.get(nutrient);
        let goal = goals.get(nutrient);
        NutrientProgress {
            nutrient,
            percent: percent_of_goal(total, goal),
            over_goal: total.is_finite() && goal.is_finite() && total > goal,
        }
    });
    Progress { entries }
}
