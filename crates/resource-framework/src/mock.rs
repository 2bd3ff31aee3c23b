//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] implements [`Transport`] entirely in memory. Tests
//! script the responses the "server" gives, run real
//! [`ResourceClient`](crate::ResourceClient)s and
//! [`StateStore`](crate::StateStore)s against it, and then assert on the
//! recorded requests and on the resulting state.
//!
//! ## When to use the mock vs a real HTTP server
//!
//! | Feature | MockTransport | wiremock server |
//! |---------|---------------|-----------------|
//! | **Speed** | Instant | Fast (binds a local port) |
//! | **Determinism** | Response order and delays are scripted | Subject to the scheduler |
//! | **What is covered** | Client + store logic | Also URL building, headers, JSON encoding |
//! | **Error injection** | `respond_error(status, ..)` | `ResponseTemplate::new(status)` |
//!
//! ## Example
//!
//! ```rust,ignore
//! let mock = MockTransport::new();
//! mock.expect(Method::Get, "api/cours/1")
//!     .respond_json(json!({ "id": 1, "nom": "Intro" }));
//!
//! let client = create_mock_client::<Cours>(&mock);
//! let cours = client.get(1).await?;
//! assert_eq!(client.state().entity, cours);
//! mock.verify();
//! ```
//!
//! ## Matching
//!
//! A request consumes the first queued expectation with the same method and
//! path, so a background refresh can interleave with the requests a test
//! scripted explicitly. A request with no matching expectation fails with a
//! [`ResourceError::Transport`] and is remembered; [`MockTransport::verify`]
//! panics on it.

use crate::client::ResourceClient;
use crate::config::ListOrdering;
use crate::entity::RestEntity;
use crate::error::ResourceError;
use crate::store::StateStore;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer to one request.
struct Expectation {
    method: Method,
    path: String,
    delay: Option<Duration>,
    response: Result<ApiResponse, ResourceError>,
}

#[derive(Default)]
struct Script {
    expectations: VecDeque<Expectation>,
    requests: Vec<ApiRequest>,
    unexpected: Vec<ApiRequest>,
}

/// In-memory transport answering from a queue of expectations.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<Script>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects one request with `method` on `path` (no leading slash).
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            delay: None,
            script: Arc::clone(&self.script),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    /// Requests received with `method` on `path`.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Panics unless every expectation was consumed and nothing unexpected arrived.
    pub fn verify(&self) {
        let script = self.script.lock().unwrap();
        if !script.unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", script.unexpected);
        }
        if !script.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                script.expectations.len()
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ResourceError> {
        let matched = {
            let mut script = self.script.lock().unwrap();
            script.requests.push(request.clone());
            let position = script
                .expectations
                .iter()
                .position(|e| e.method == request.method && e.path == request.path);
            let found = position.and_then(|i| script.expectations.remove(i));
            if found.is_none() {
                script.unexpected.push(request.clone());
            }
            found
        };

        match matched {
            Some(expectation) => {
                if let Some(delay) = expectation.delay {
                    tokio::time::sleep(delay).await;
                }
                expectation.response
            }
            None => Err(ResourceError::Transport(format!(
                "unexpected request: {} {}",
                request.method, request.path
            ))),
        }
    }
}

/// Builder returned by [`MockTransport::expect`].
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    delay: Option<Duration>,
    script: Arc<Mutex<Script>>,
}

impl ExpectationBuilder {
    /// Holds the response back for `delay` before answering.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answers `200` with a JSON body.
    pub fn respond_json(self, body: Value) {
        self.respond_with(Ok(ApiResponse::json(body)));
    }

    /// Answers `204` with no body.
    pub fn respond_empty(self) {
        self.respond_with(Ok(ApiResponse::empty(204)));
    }

    /// Fails the way a server error would.
    pub fn respond_error(self, status: u16, message: impl Into<String>) {
        self.respond_with(Err(ResourceError::Http {
            status,
            message: message.into(),
        }));
    }

    pub fn respond_with(self, response: Result<ApiResponse, ResourceError>) {
        let mut script = self.script.lock().unwrap();
        script.expectations.push_back(Expectation {
            method: self.method,
            path: self.path,
            delay: self.delay,
            response,
        });
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Spawns a store for `T` and returns a client wired to `transport`.
///
/// The store keeps the default completion-order policy; use
/// [`create_mock_client_with`] to pick another.
pub fn create_mock_client<T: RestEntity>(transport: &MockTransport) -> ResourceClient<T> {
    create_mock_client_with(transport, ListOrdering::CompletionOrder)
}

pub fn create_mock_client_with<T: RestEntity>(
    transport: &MockTransport,
    ordering: ListOrdering,
) -> ResourceClient<T> {
    let (store, handle) = StateStore::<T>::new(32);
    tokio::spawn(store.run(ordering));
    ResourceClient::new(handle, Arc::new(transport.clone()))
}
