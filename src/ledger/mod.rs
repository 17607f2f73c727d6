//! Daily nutrition ledger.
//!
//! Owns the running totals stored under `nutritionTotals`, folds new scan
//! results into them and mirrors each change to the backend when a session
//! token is present.
//!
//! Every mutation commits locally first. The remote mirror is attempted
//! afterwards and its outcome is reported through [`SyncStatus`]; a failed
//! mirror never rolls back the local commit. Two devices signed into the
//! same account race on the backend with last-write-wins, and nothing here
//! tries to detect that.

pub mod progress;

pub use progress::{compute_progress, percent_of_goal, NutrientProgress, Progress};

use serde::{Deserialize, Serialize};

use crate::api::metrics::MetricsApi;
use crate::config;
use crate::context::SdkContext;
use crate::error::{NutriGuardError, Result};
use crate::models::{DailyTotals, Nutrient, NutritionLineItem};

// ---------------------------------------------------------------------------
// Sync reporting
// ---------------------------------------------------------------------------

/// What happened to the remote mirror of a ledger change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// The backend accepted the change.
    Mirrored,
    /// No session token; the ledger runs local-only.
    NotLoggedIn,
    /// The SDK was built in offline mode.
    Offline,
    /// The backend call failed. The local change stands.
    Failed(String),
}

/// Result of a ledger mutation: the committed totals plus the mirror outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerUpdate {
    pub totals: DailyTotals,
    pub sync: SyncStatus,
}

impl LedgerUpdate {
    /// True when the backend holds the same state as the local ledger.
    pub fn is_mirrored(&self) -> bool {
        self.sync == SyncStatus::Mirrored
    }

    /// User-facing summary of a clear.
    pub fn clear_message(&self) -> &'static str {
        match self.sync {
            SyncStatus::Mirrored => "Today's totals cleared everywhere.",
            SyncStatus::Failed(_) => "Cleared locally; server update failed.",
            SyncStatus::NotLoggedIn | SyncStatus::Offline => "Today's totals cleared on this device.",
        }
    }
}

// ---------------------------------------------------------------------------
// Pure aggregation
// ---------------------------------------------------------------------------

/// Local calendar day, `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Sum each nutrient across `items` and round every sum up to a whole unit.
///
/// Rounding happens once per call, so feeding the same items through two
/// calls can total more than one combined call. Amounts are clamped
/// non-negative before summing.
pub fn scan_totals(items: &[NutritionLineItem]) -> DailyTotals {
    let mut sums = [0.0f64; 6];
    for item in items {
        for (slot, nutrient) in sums.iter_mut().zip(Nutrient::ALL) {
            *slot += item.amount(nutrient);
        }
    }
    let [calories, protein, carbs, fat, sugar, fiber] = sums.map(ceil_whole);
    DailyTotals {
        calories,
        protein,
        carbs,
        fat,
        sugar,
        fiber,
    }
}

fn ceil_whole(sum: f64) -> f64 {
    let sum = sum.min(f64::MAX);
    // Snap away binary noise first so 0.7 + 0.1 + 0.2 stays 1, not 2.
    // Sums too large to scale carry no fractional noise worth snapping.
    let scaled = sum * 1e9;
    let snapped = if scaled.is_finite() { scaled.round() / 1e9 } else { sum };
    snapped.ceil().max(0.0)
}

// ---------------------------------------------------------------------------
// NutritionLedger
// ---------------------------------------------------------------------------

pub struct NutritionLedger<'a> {
    ctx: &'a SdkContext,
}

impl<'a> NutritionLedger<'a> {
    pub fn new(ctx: &'a SdkContext) -> Self {
        Self { ctx }
    }

    /// Current running totals.
    ///
    /// A missing or unparsable record reads as all-zero; this never fails.
    pub fn load_totals(&self) -> DailyTotals {
        self.ctx
            .read_json::<DailyTotals>(config::KEY_TOTALS)
            .unwrap_or_default()
    }

    /// Fold a scan into the running totals and return the new totals.
    ///
    /// See [`add_scan`](Self::add_scan) for the mirror outcome.
    pub fn add_scan_totals(&self, items: &[NutritionLineItem]) -> Result<DailyTotals> {
        Ok(self.add_scan(items)?.totals)
    }

    /// Fold a scan into the running totals.
    ///
    /// The ceiling-rounded scan sums are added to the stored totals and the
    /// result is written back (last write wins). When logged in, the raw
    /// items are then posted for today's date; a failure there is logged and
    /// reported in the returned [`SyncStatus`] only.
    pub fn add_scan(&self, items: &[NutritionLineItem]) -> Result<LedgerUpdate> {
        let added = scan_totals(items);
        let totals = self.load_totals().plus(&added);
        self.ctx.write_json(config::KEY_TOTALS, &totals)?;
        tracing::info!(
            items = items.len(),
            calories = totals.calories,
            added_calories = added.calories,
            "scan added to daily totals"
        );

        let sync = self.mirror(items, &added);
        Ok(LedgerUpdate { totals, sync })
    }

    /// Reset every running total to exactly zero.
    ///
    /// When logged in, a zeroed record for today is posted as well; check
    /// [`LedgerUpdate::is_mirrored`] to tell "cleared everywhere" from
    /// "cleared locally only".
    pub fn clear_today(&self) -> Result<LedgerUpdate> {
        let totals = DailyTotals::zero();
        self.ctx.write_json(config::KEY_TOTALS, &totals)?;
        tracing::info!("daily totals cleared");

        let sync = self.mirror(&[], &totals);
        Ok(LedgerUpdate { totals, sync })
    }

    fn mirror(&self, items: &[NutritionLineItem], totals: &DailyTotals) -> SyncStatus {
        let Some(token) = self.ctx.token() else {
            return SyncStatus::NotLoggedIn;
        };
        let day = today();
        match MetricsApi::new(self.ctx).save_day_with_token(&token, &day, items, totals) {
            Ok(ack) => {
                tracing::debug!(day = %day, ack = %ack, "day mirrored to backend");
                SyncStatus::Mirrored
            }
            Err(NutriGuardError::Offline) => SyncStatus::Offline,
            Err(e) => {
                tracing::warn!(day = %day, error = %e, "failed to mirror day to backend");
                SyncStatus::Failed(e.to_string())
            }
        }
    }
}
