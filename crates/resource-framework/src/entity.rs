//! # RestEntity Trait
//!
//! The `RestEntity` trait defines the contract every record type (course,
//! category, payment, ...) implements to be managed by the generic
//! [`ResourceClient`](crate::ResourceClient). It names the REST collection the
//! type lives under and how to read its identifier; the client, the state
//! store and the transport are then written once and reused for every type.
//!
//! # Associated Items
//! - [`RestEntity::Id`] is the identifier type used in item paths.
//! - [`RestEntity::RESOURCE`] is the plural collection name (`"cours"`,
//!   `"categories"`, ...), appended to the `api/` prefix.
//!
//! Path helpers ([`RestEntity::collection_path`], [`RestEntity::item_path`])
//! are provided methods; override them only for collections mounted
//! somewhere other than `api/{resource}`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// Prefix shared by every collection endpoint.
pub const API_PREFIX: &str = "api";

/// Trait that any record type must implement to be served by a `ResourceClient`.
///
/// `Default` is the "empty" record: it is the initial `entity` snapshot and
/// the value the snapshot is cleared to after a delete.
pub trait RestEntity:
    Clone + Default + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The server-assigned identifier (usually `i64`).
    type Id: Clone + Debug + Display + PartialEq + Send + Sync + 'static;

    /// Plural collection name under the API prefix.
    const RESOURCE: &'static str;

    /// The identifier, if the record has been persisted.
    fn id(&self) -> Option<Self::Id>;

    /// Path of the collection, relative to the server base URL.
    fn collection_path() -> String {
        format!("{}/{}", API_PREFIX, Self::RESOURCE)
    }

    /// Path of one record of the collection.
    fn item_path(id: &Self::Id) -> String {
        format!("{}/{}", Self::collection_path(), id)
    }
}
