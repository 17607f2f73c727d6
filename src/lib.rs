//! NutriGuard SDK for Rust.
//!
//! Keeps the user's running daily nutrition totals on the device, folds new
//! food-scan results into them, derives goal progress and BMI, and mirrors
//! changes to the NutriGuard backend whenever a session token is present.
//! The local ledger is the source of truth; the backend is a best-effort
//! mirror and the SDK keeps working without it.
//!
//! # Quick start
//!
//! ```no_run
//! use nutriguard_sdk::{NutriGuardSdk, ScanResult};
//!
//! let sdk = NutriGuardSdk::builder().build().unwrap();
//!
//! // Feed an identification response into today's totals
//! let scan = ScanResult::from_json_str(r#"{"items":[{"name":"apple","calories":95}]}"#);
//! let totals = sdk.ledger().add_scan_totals(&scan.items).unwrap();
//!
//! // Compare against the user's goals
//! let progress = sdk.progress();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod api;
pub mod client;
pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod health;
pub mod ledger;
pub mod models;
pub mod session;
pub mod store;

#[cfg(feature = "async")]
pub use async_client::AsyncNutriGuardSdk;
pub use client::ApiClient;
pub use context::SdkContext;
pub use error::{NutriGuardError, Result};
pub use health::{compute_bmi, BmiCategory};
pub use ledger::{compute_progress, LedgerUpdate, NutritionLedger, Progress, SyncStatus};
pub use models::{DailyTotals, GoalTargets, Nutrient, NutritionLineItem, ScanResult};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// NutriGuardSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`NutriGuardSdk`] instance.
///
/// Use [`NutriGuardSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](NutriGuardSdkBuilder::build) to create the SDK.
pub struct NutriGuardSdkBuilder {
    base_url: Option<String>,
    data_dir: Option<PathBuf>,
    store: Option<Box<dyn KeyValueStore>>,
    offline: bool,
    timeout: Duration,
}

impl Default for NutriGuardSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            data_dir: None,
            store: None,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl NutriGuardSdkBuilder {
    /// Set the backend base URL.
    ///
    /// Defaults to `NUTRIGUARD_API_URL` if set, else the hosted backend.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the directory local records are written to.
    ///
    /// If not set, the platform-appropriate local data directory is used
    /// (e.g. `~/.local/share/nutriguard-sdk` on Linux). Ignored when a custom
    /// store is supplied via [`store()`](Self::store).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use a custom local store instead of the default [`FileStore`].
    pub fn store<S: KeyValueStore + 'static>(mut self, store: S) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never contacts the backend; the ledger runs
    /// local-only. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout. A timeout counts as a network failure.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the SDK. Creates the data directory when using the file store;
    /// no network traffic happens until an operation needs it.
    pub fn build(self) -> Result<NutriGuardSdk> {
        let store = match self.store {
            Some(store) => store,
            None => Box::new(FileStore::new(self.data_dir)?),
        };
        let base_url = self.base_url.unwrap_or_else(config::default_base_url);
        let api = ApiClient::new(&base_url, self.timeout, self.offline);
        Ok(NutriGuardSdk {
            ctx: SdkContext::new(store, api),
        })
    }
}

// ---------------------------------------------------------------------------
// NutriGuardSdk
// ---------------------------------------------------------------------------

/// The main entry point for the NutriGuard SDK.
///
/// Owns the local store and backend client and exposes each concern as a
/// lightweight borrowing accessor.
///
/// Created via [`NutriGuardSdk::builder()`].
pub struct NutriGuardSdk {
    ctx: SdkContext,
}

impl NutriGuardSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> NutriGuardSdkBuilder {
        NutriGuardSdkBuilder::default()
    }

    // -- Accessors ---------------------------------------------------------

    /// Access the daily nutrition ledger.
    pub fn ledger(&self) -> NutritionLedger<'_> {
        NutritionLedger::new(&self.ctx)
    }

    /// Access the session token and logout.
    pub fn session(&self) -> session::Session<'_> {
        session::Session::new(&self.ctx)
    }

    /// Access the daily metrics endpoints (day save, weekly status).
    pub fn metrics(&self) -> api::MetricsApi<'_> {
        api::MetricsApi::new(&self.ctx)
    }

    /// Access the user profile endpoint.
    pub fn profile(&self) -> api::ProfileApi<'_> {
        api::ProfileApi::new(&self.ctx)
    }

    /// Access macro planning and goal targets.
    pub fn targets(&self) -> api::TargetsApi<'_> {
        api::TargetsApi::new(&self.ctx)
    }

    // -- Derived views -----------------------------------------------------

    /// Progress of today's totals against the resolved goals.
    pub fn progress(&self) -> Progress {
        let totals = self.ledger().load_totals();
        let goals = self.targets().goals();
        compute_progress(&totals, &goals)
    }

    /// Return a reference to the underlying [`SdkContext`] for advanced usage.
    pub fn context(&self) -> &SdkContext {
        &self.ctx
    }

    /// Consume the SDK and release the HTTP client.
    pub fn close(self) {
        self.ctx.api.close();
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for NutriGuardSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NutriGuardSdk(base_url={}, logged_in={}, offline={})",
            self.ctx.api.base_url,
            self.ctx.token().is_some(),
            self.ctx.api.offline
        )
    }
}
