use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://nutriguard-n98n.onrender.com";
pub const BASE_URL_ENV: &str = "NUTRIGUARD_API_URL";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Endpoint paths, relative to the base URL.
pub const METRICS_SAVE: &str = "metrics/save";
pub const METRICS_WEEKLY_STATUS: &str = "metrics/weekly-status";
pub const USER_PROFILE: &str = "user/profile";
pub const MACRO_PLAN: &str = "macro-plan";
pub const USER_TARGETS: &str = "user/targets";

// Keys of the records kept in the local store.
pub const KEY_TOTALS: &str = "nutritionTotals";
pub const KEY_TOKEN: &str = "token";
pub const KEY_DAILY_TARGET: &str = "dailyTarget";

// Built-in daily goals used until a macro plan has been computed.
pub const DEFAULT_CALORIE_GOAL: f64 = 2200.0;
pub const DEFAULT_PROTEIN_GOAL: f64 = 80.0;
pub const DEFAULT_CARBS_GOAL: f64 = 250.0;
pub const DEFAULT_FAT_GOAL: f64 = 70.0;
pub const DEFAULT_SUGAR_GOAL: f64 = 50.0;
pub const DEFAULT_FIBER_GOAL: f64 = 25.0;

/// Base URL from `NUTRIGUARD_API_URL`, or the hosted backend when unset.
pub fn default_base_url() -> String {
    match std::env::var(BASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_local_dir() {
        data.join("nutriguard-sdk")
    } else {
        PathBuf::from(".nutriguard-sdk")
    }
}
