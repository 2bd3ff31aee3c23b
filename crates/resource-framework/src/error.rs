//! # Framework Errors
//!
//! This module defines the error type shared by every resource client.
//! Anything that goes wrong while talking to the backend collapses into one
//! surfaced kind (a transport/server failure with its HTTP status when there
//! was a response); the remaining variants cover local plumbing.

/// Errors that can occur while executing a resource operation.
///
/// The type is `Clone` so the same failure can be returned to the caller
/// and recorded in [`ResourceState::error_message`](crate::ResourceState).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResourceError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// The request never produced a response (connection, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),
    /// A payload could not be encoded or a response body could not be decoded.
    #[error("Invalid payload: {0}")]
    Payload(String),
    /// Update and partial update need the entity identifier in the path.
    #[error("Entity has no identifier")]
    MissingId,
    #[error("State store closed")]
    StoreClosed,
    #[error("State store dropped acknowledgement")]
    StoreDropped,
}

impl ResourceError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResourceError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ResourceError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ResourceError::Http {
                status: status.as_u16(),
                message: e.to_string(),
            },
            None if e.is_decode() => ResourceError::Payload(e.to_string()),
            None => ResourceError::Transport(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(e: serde_json::Error) -> Self {
        ResourceError::Payload(e.to_string())
    }
}
