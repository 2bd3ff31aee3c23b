//! # Catalog Admin
//!
//! Administration client for the course catalog backend, built on
//! [`resource_framework`].
//!
//! - **[model]**: the catalog entities ([`Cours`](model::Cours),
//!   [`Categorie`](model::Categorie), ...) as the backend exchanges them.
//! - **[clients]**: typed clients, one per entity.
//! - **[lifecycle]**: [`AdminSystem`](lifecycle::AdminSystem), which starts
//!   and stops one state store per entity.
//! - **[editor]**: [`EntityEditor`](editor::EntityEditor), the create/edit
//!   screen controller.
//! - **[config]**: JSON configuration with environment overrides.

pub mod clients;
pub mod config;
pub mod editor;
pub mod error;
pub mod lifecycle;
pub mod model;

pub use config::AdminConfig;
pub use editor::EntityEditor;
pub use error::AdminError;
pub use lifecycle::AdminSystem;
