//! # Transport
//!
//! The seam between a [`ResourceClient`](crate::ResourceClient) and the
//! network. The client only builds [`ApiRequest`]s and interprets
//! [`ApiResponse`]s; [`HttpTransport`] turns them into real HTTP calls, and
//! [`MockTransport`](crate::mock::MockTransport) answers them from a script
//! in tests.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ResourceError;

/// Response header carrying the size of a paginated collection.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// The HTTP verbs the resource contract uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One request against a resource endpoint.
///
/// `path` is relative to the server root (e.g. `api/cours/1`).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value of a query parameter, if present.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A successful response. Failures are reported as [`ResourceError`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `None` when the response had no body (e.g. a delete acknowledgement).
    pub body: Option<Value>,
    pub total_count: Option<u64>,
}

impl ApiResponse {
    pub fn json(body: Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
            total_count: None,
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: None,
            total_count: None,
        }
    }
}

/// Executes resource requests.
///
/// Implementations must map every non-success response to
/// [`ResourceError::Http`] so callers see one error kind.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ResourceError>;
}

/// `reqwest`-backed transport against one server root.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ResourceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ResourceError> {
        let url = self.url(&request.path);
        debug!(method = %request.method, %url, "Sending request");

        let mut builder = self.client.request(request.method.into(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let total_count = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let text = response.text().await?;

        if !status.is_success() {
            warn!(method = %request.method, %url, status = status.as_u16(), "Request failed");
            let message = if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                text
            };
            return Err(ResourceError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = if text.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(&text)?)
        };
        Ok(ApiResponse {
            status: status.as_u16(),
            body,
            total_count,
        })
    }
}
