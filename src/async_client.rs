//! Async wrapper around [`NutriGuardSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the local store and the backend are being talked to.
//!
//! Operations on one instance run one at a time, in the order they acquire
//! the lock, and each runs to completion. Callers cannot cancel an operation
//! once it has started; dropping the returned future only stops waiting for
//! it.
//!
//! # Example
//!
//! ```no_run
//! use nutriguard_sdk::{AsyncNutriGuardSdk, NutritionLineItem};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncNutriGuardSdk::builder().build().await.unwrap();
//!
//!     let mut apple = NutritionLineItem::new("apple");
//!     apple.calories = 95.0;
//!     let totals = sdk.add_scan_totals(vec![apple]).await.unwrap();
//!
//!     // Any sync SDK method via closure
//!     let goals = sdk.run(|s| Ok(s.targets().goals())).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{NutriGuardError, Result};
use crate::ledger::{LedgerUpdate, Progress};
use crate::models::{DailyTotals, DayStatus, NutritionLineItem};
use crate::NutriGuardSdk;

// ---------------------------------------------------------------------------
// AsyncNutriGuardSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncNutriGuardSdk`] instance.
pub struct AsyncNutriGuardSdkBuilder {
    base_url: Option<String>,
    data_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
}

impl Default for AsyncNutriGuardSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            data_dir: None,
            offline: false,
            timeout: crate::config::DEFAULT_TIMEOUT,
        }
    }
}

impl AsyncNutriGuardSdkBuilder {
    /// Set the backend base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the directory local records are written to.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the async SDK on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncNutriGuardSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = NutriGuardSdk::builder();
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            builder = builder.offline(self.offline).timeout(self.timeout);
            let sdk = builder.build()?;
            Ok(AsyncNutriGuardSdk::from_sdk(sdk))
        })
        .await
        .map_err(join_error)?
    }
}

fn join_error(e: tokio::task::JoinError) -> NutriGuardError {
    NutriGuardError::InvalidArgument(format!("Task join error: {e}"))
}

// ---------------------------------------------------------------------------
// AsyncNutriGuardSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`NutriGuardSdk`].
///
/// Cloning is cheap; clones share the same SDK and its lock.
#[derive(Clone)]
pub struct AsyncNutriGuardSdk {
    inner: Arc<Mutex<NutriGuardSdk>>,
}

impl AsyncNutriGuardSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncNutriGuardSdkBuilder {
        AsyncNutriGuardSdkBuilder::default()
    }

    /// Wrap an already-built sync SDK (e.g. one with a custom store).
    pub fn from_sdk(sdk: NutriGuardSdk) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sdk)),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&NutriGuardSdk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&NutriGuardSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| NutriGuardError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(join_error)?
    }

    pub async fn load_totals(&self) -> Result<DailyTotals> {
        self.run(|s| Ok(s.ledger().load_totals())).await
    }

    pub async fn add_scan_totals(&self, items: Vec<NutritionLineItem>) -> Result<DailyTotals> {
        self.run(move |s| s.ledger().add_scan_totals(&items)).await
    }

    /// Like [`add_scan_totals`](Self::add_scan_totals), with the mirror outcome.
    pub async fn add_scan(&self, items: Vec<NutritionLineItem>) -> Result<LedgerUpdate> {
        self.run(move |s| s.ledger().add_scan(&items)).await
    }

    pub async fn clear_today(&self) -> Result<LedgerUpdate> {
        self.run(|s| s.ledger().clear_today()).await
    }

    pub async fn progress(&self) -> Result<Progress> {
        self.run(|s| Ok(s.progress())).await
    }

    pub async fn weekly_status(&self) -> Result<Vec<DayStatus>> {
        self.run(|s| s.metrics().weekly_status()).await
    }

    /// Release the SDK on the blocking pool.
    ///
    /// Other clones keep the SDK alive until they are dropped as well.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            if let Ok(sdk) = Arc::try_unwrap(self.inner) {
                let sdk = sdk
                    .into_inner()
                    .map_err(|_| NutriGuardError::InvalidArgument("SDK lock poisoned".into()))?;
                sdk.close();
            }
            Ok(())
        })
        .await
        .map_err(join_error)?
    }
}
