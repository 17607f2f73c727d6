//! Shared state handed to every accessor: the local store and the backend
//! client.

use crate::client::ApiClient;
use crate::config;
use crate::error::Result;
use crate::store::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub struct SdkContext {
    pub store: Box<dyn KeyValueStore>,
    pub api: ApiClient,
}

impl SdkContext {
    pub fn new(store: Box<dyn KeyValueStore>, api: ApiClient) -> Self {
        Self { store, api }
    }

    /// Read and parse a JSON record.
    ///
    /// A missing, unreadable or unparsable record is treated as absent; the
    /// failure is logged and never surfaces to the caller.
    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read local record");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "unparsable local record ignored");
                None
            }
        }
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Current session token, or `None` when not logged in.
    pub fn token(&self) -> Option<String> {
        match self.store.get(config::KEY_TOKEN) {
            Ok(Some(token)) if !token.trim().is_empty() => Some(token.trim().to_string()),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session token");
                None
            }
        }
    }
}
