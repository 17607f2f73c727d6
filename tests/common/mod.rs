//! Shared test fixtures for the NutriGuard SDK integration tests.
//!
//! Provides SDK constructors backed by temporary data directories and a
//! `wiremock` backend (`StubServer`) that replays canned responses and records
//! every request it receives.

#![allow(dead_code)]

use nutriguard_sdk::{NutriGuardSdk, NutritionLineItem};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Nothing listens here, so every request fails fast with "connection refused".
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

/// Create an SDK writing into a fresh temp directory and pointed at `base_url`.
///
/// The caller must keep the returned `TempDir` alive for the duration of the
/// test so the data directory is not deleted prematurely.
pub fn setup_sdk(base_url: &str) -> (NutriGuardSdk, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let sdk = NutriGuardSdk::builder()
        .data_dir(tmp_dir.path())
        .base_url(base_url)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    (sdk, tmp_dir)
}

/// SDK in offline mode: the backend is never contacted.
pub fn setup_offline_sdk() -> (NutriGuardSdk, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let sdk = NutriGuardSdk::builder()
        .data_dir(tmp_dir.path())
        .base_url(UNREACHABLE_URL)
        .offline(true)
        .build()
        .unwrap();
    (sdk, tmp_dir)
}

#[derive(Serialize)]
struct TestClaims<'a> {
    username: &'a str,
    exp: usize,
}

/// A JWT-shaped token whose payload carries `username`.
pub fn token_for(username: &str) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &TestClaims {
            username,
            exp: 4_102_444_800,
        },
        &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

pub fn log_in(sdk: &NutriGuardSdk) -> String {
    let token = token_for("alice");
    sdk.session().set_token(&token).unwrap();
    token
}

pub fn item(name: &str, calories: f64, protein: f64, carbs: f64, fat: f64, sugar: f64, fiber: f64) -> NutritionLineItem {
    NutritionLineItem {
        name: name.to_string(),
        calories,
        protein_g: protein,
        carbohydrates_g: carbs,
        fat_g: fat,
        sugar_g: sugar,
        fiber_g: fiber,
    }
}

/// The two-item scan used across tests: a banana and a boiled egg.
pub fn sample_scan() -> Vec<NutritionLineItem> {
    vec![
        item("banana", 95.0, 0.5, 25.1, 0.3, 14.4, 2.6),
        item("egg", 78.0, 6.0, 0.6, 5.3, 0.6, 0.0),
    ]
}

// ---------------------------------------------------------------------------
// StubServer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lowercased.
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    fn from_wiremock(req: &wiremock::Request) -> Self {
        let headers = req
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_ascii_lowercase(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        Self {
            method: req.method.as_str().to_string(),
            path: req.url.path().to_string(),
            headers,
            body: String::from_utf8_lossy(&req.body).into_owned(),
        }
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// `(method, path, status, body)`
pub type Route<'a> = (&'a str, &'a str, u16, &'a str);

fn route_mock((verb, route, status, body): &Route<'_>) -> Mock {
    Mock::given(method(*verb))
        .and(path(*route))
        .respond_with(
            ResponseTemplate::new(*status)
                .insert_header("content-type", "application/json")
                .set_body_string(*body),
        )
}

/// A mock backend. Unrouted requests get wiremock's default 404.
///
/// Servers built with [`StubServer::start`] own a small runtime so plain
/// `#[test]` functions can drive them; the blocking SDK calls run on the
/// test thread while wiremock serves from its own thread. Inside a Tokio
/// test use [`StubServer::start_async`] instead.
pub struct StubServer {
    pub base_url: String,
    server: MockServer,
    runtime: Option<Runtime>,
}

impl StubServer {
    pub fn start(routes: &[Route<'_>]) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(mount_routes(routes));
        Self {
            base_url: server.uri(),
            server,
            runtime: Some(runtime),
        }
    }

    pub async fn start_async(routes: &[Route<'_>]) -> Self {
        let server = mount_routes(routes).await;
        Self {
            base_url: server.uri(),
            server,
            runtime: None,
        }
    }

    /// Mount an extra mock, e.g. one with a response delay.
    pub fn mount(&self, mock: Mock) {
        self.runtime().block_on(mock.mount(&self.server));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.runtime()
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .iter()
            .map(RecordedRequest::from_wiremock)
            .collect()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    fn runtime(&self) -> &Runtime {
        self.runtime
            .as_ref()
            .expect("blocking helpers need a server from StubServer::start")
    }
}

async fn mount_routes(routes: &[Route<'_>]) -> MockServer {
    let server = MockServer::start().await;
    for route in routes {
        route_mock(route).mount(&server).await;
    }
    server
}
