//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the store treats list responses that arrive out of order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrdering {
    /// Whichever list response arrives last replaces `entities`.
    #[default]
    CompletionOrder,
    /// A list response is dropped if a newer list request was issued since.
    IssueOrder,
}

/// Settings shared by every resource client of one backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server root, without the `api/` prefix.
    pub base_url: String,
    /// `None` keeps the HTTP client's own defaults.
    pub request_timeout: Option<Duration>,
    /// Capacity of each state store channel.
    pub store_buffer: usize,
    pub list_ordering: ListOrdering,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout: None,
            store_buffer: 32,
            list_ordering: ListOrdering::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
