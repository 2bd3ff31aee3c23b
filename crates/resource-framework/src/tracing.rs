//! # Observability & Tracing
//!
//! Every store and client logs through `tracing` with structured fields
//! (`resource`, `request`, `count`, `error`), and client operations open a
//! span named after the operation. [`setup_tracing`] installs the subscriber
//! applications use.
//!
//! ## Usage
//!
//! ```bash
//! # Store start/stop, fetched counts, saves and failures
//! RUST_LOG=info cargo run -p catalog-admin -- cours
//!
//! # Also every state action and the full payload of each write
//! RUST_LOG=debug cargo run -p catalog-admin -- cours
//!
//! # Only the framework
//! RUST_LOG=resource_framework=debug cargo run -p catalog-admin -- cours
//! ```
//!
//! With `RUST_LOG=info` a create looks like:
//!
//! ```text
//! INFO create{resource="cours"}: Saved resource="cours" id=Some(1)
//! INFO list{query=QueryParams { page: None, size: None, sort: None } resource="cours"}: Fetched list resource="cours" count=1
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
