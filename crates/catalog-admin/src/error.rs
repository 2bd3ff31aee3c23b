use resource_framework::ResourceError;
use thiserror::Error;

/// Errors surfaced by the admin application.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdminError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error("Shutdown failed: {0}")]
    Shutdown(String),
    /// The resource was never registered with the [`AdminSystem`](crate::lifecycle::AdminSystem).
    #[error("Unknown resource: {0}")]
    UnknownResource(String),
}
