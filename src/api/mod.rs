//! Backend accessors.
//!
//! Each accessor borrows the [`SdkContext`](crate::context::SdkContext) and
//! wraps one group of endpoints. Calls that need a session read the token
//! from the local store and fail with
//! [`NotLoggedIn`](crate::error::NutriGuardError::NotLoggedIn) without one.

pub mod metrics;
pub mod profile;
pub mod targets;

pub use metrics::MetricsApi;
pub use profile::ProfileApi;
pub use targets::TargetsApi;
