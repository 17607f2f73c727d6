//! Blocking HTTP client for the NutriGuard backend.
//!
//! Every request carries a finite timeout. Non-2xx responses are surfaced as
//! [`NutriGuardError::Status`] with the raw body, and response bodies are
//! parsed defensively: a body that is not valid JSON becomes a
//! [`NutriGuardError::Json`] for typed calls and is passed through as a
//! string for plain acknowledgements.

use crate::error::{NutriGuardError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Mutex;
use std::time::Duration;

pub struct ApiClient {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// If true, no request ever leaves the process.
    pub offline: bool,
    timeout: Duration,
    client: Mutex<Option<Client>>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration, offline: bool) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            offline,
            timeout,
            client: Mutex::new(None),
        }
    }

    /// Lazy HTTP client, created on first request.
    fn client(&self) -> Result<Client> {
        let mut slot = self
            .client
            .lock()
            .map_err(|_| NutriGuardError::InvalidArgument("HTTP client lock poisoned".into()))?;
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let mut builder = Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout);
        if self.is_loopback() {
            // A local backend must never be routed through HTTP_PROXY.
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        *slot = Some(client.clone());
        Ok(client)
    }

    fn is_loopback(&self) -> bool {
        reqwest::Url::parse(&self.base_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .map(|host| matches!(host.as_str(), "localhost" | "127.0.0.1" | "[::1]" | "::1"))
            .unwrap_or(false)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: reqwest::Method, path: &str, token: Option<&str>) -> Result<RequestBuilder> {
        if self.offline {
            return Err(NutriGuardError::Offline);
        }
        let mut req = self.client()?.request(method, self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req)
    }

    /// Send a request and return the body of a 2xx response.
    ///
    /// A 404 becomes [`NutriGuardError::NotFound`]; any other non-2xx status
    /// becomes [`NutriGuardError::Status`].
    fn send(&self, req: RequestBuilder, path: &str) -> Result<String> {
        let resp = req.send()?;
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        tracing::debug!(path, status = status.as_u16(), "backend response");
        if status.as_u16() == 404 {
            return Err(NutriGuardError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(NutriGuardError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    /// GET `path` and parse the JSON body into `T`.
    pub fn get_json<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        let req = self.request(reqwest::Method::GET, path, token)?;
        let body = self.send(req, path)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET `path`, mapping a 404 to `None`.
    pub fn get_json_opt<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<Option<T>> {
        match self.get_json(path, token) {
            Ok(value) => Ok(Some(value)),
            Err(NutriGuardError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// POST `body` as JSON to `path` and parse the JSON response into `T`.
    pub fn post_json<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.request(reqwest::Method::POST, path, token)?.json(body);
        let text = self.send(req, path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// POST `body` as JSON to `path` where only success matters.
    ///
    /// A response body that is not JSON is returned as a JSON string instead
    /// of failing the call.
    pub fn post_ack<B>(&self, path: &str, body: &B, token: Option<&str>) -> Result<serde_json::Value>
    where
        B: Serialize + ?Sized,
    {
        let req = self.request(reqwest::Method::POST, path, token)?.json(body);
        let text = self.send(req, path)?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }

    /// Drop the underlying HTTP client, if one was created.
    pub fn close(&self) {
        if let Ok(mut slot) = self.client.lock() {
            *slot = None;
        }
    }
}
