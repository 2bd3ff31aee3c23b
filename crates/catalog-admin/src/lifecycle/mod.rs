//! # System Lifecycle
//!
//! Builds the transport, starts one state store per catalog entity and
//! stops them again.
//!
//! ## Startup
//!
//! [`AdminSystem::new`] turns an [`AdminConfig`](crate::config::AdminConfig)
//! into an HTTP transport and registers every entity with a
//! [`ResourceRegistry`](resource_framework::ResourceRegistry). Each
//! registration spawns a store task; nothing talks to the network until a
//! client operation runs.
//!
//! ```rust,ignore
//! let system = AdminSystem::new(&AdminConfig::load())?;
//! let courses = system.cours().page(0, 20).await?;
//! drop(courses_client_clones);
//! system.shutdown().await?;
//! ```
//!
//! ## Shutdown
//!
//! Stores stop when their channel closes, i.e. once every client clone is
//! gone. [`AdminSystem::shutdown`] drops the registry's own clients and
//! awaits the store tasks, so any client handed out must be dropped first.
//!
//! ## Tracing
//!
//! Call [`setup_tracing`](resource_framework::tracing::setup_tracing) once
//! before building the system:
//!
//! ```bash
//! RUST_LOG=info catalog-admin cours     # one line per store event
//! RUST_LOG=debug catalog-admin cours    # requests and payloads
//! ```

pub mod admin_system;

pub use admin_system::*;
