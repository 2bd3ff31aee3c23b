//! # Resource Framework
//!
//! Building blocks for admin clients of a REST backend: one generic,
//! type-safe client per entity type, with the request lifecycle of each
//! type kept in observable state.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`RestEntity`]) - the record type and the collection it lives in
//! 2. **State Layer** ([`StateStore`], [`ResourceState`]) - one task per entity type
//!    applying [`StateAction`]s sequentially and publishing snapshots
//! 3. **Interface Layer** ([`ResourceClient`]) - list/get/create/update/partial update/delete/reset
//! 4. **Transport Layer** ([`Transport`], [`HttpTransport`]) - the HTTP calls themselves
//!
//! The client logic is written once; adding an entity type means
//! implementing [`RestEntity`] and registering it in a [`ResourceRegistry`].
//!
//! ## Request Lifecycle
//!
//! | Operation | Request | On success | On failure |
//! |-----------|---------|------------|------------|
//! | `list` | `GET api/{resource}?cacheBuster=..` | `entities` replaced | `error_message` set |
//! | `get` | `GET api/{resource}/{id}` | `entity` replaced | `error_message` set |
//! | `create` | `POST api/{resource}` | `entity`, `update_success`, refresh | `error_message` set |
//! | `update` | `PUT api/{resource}/{id}` | same as create | same |
//! | `partial_update` | `PATCH api/{resource}/{id}` | same as create | same |
//! | `delete` | `DELETE api/{resource}/{id}` | `entity` cleared, refresh | same |
//!
//! Write payloads go through [`clean_entity`] first.
//!
//! ## Concurrency Model
//!
//! - Each store runs in its own Tokio task and owns its state (no locks)
//! - Requests of the same type may overlap; by default the last response
//!   to arrive wins ([`ListOrdering`])
//! - There is no cancellation and no retry
//!
//! ## Testing
//!
//! The [`mock`] module provides [`MockTransport`](mock::MockTransport), a
//! scripted in-memory transport that runs the real clients and stores.

pub mod clean;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod query;
pub mod registry;
pub mod state;
pub mod store;
pub mod tracing;
pub mod transport;

pub use clean::{clean_entity, map_id_list};
pub use client::ResourceClient;
pub use config::{ClientConfig, ListOrdering};
pub use entity::RestEntity;
pub use error::ResourceError;
pub use message::{RequestKind, StateAction};
pub use query::QueryParams;
pub use registry::ResourceRegistry;
pub use state::ResourceState;
pub use store::{StateStore, StoreHandle};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
