//! # State Actions
//!
//! This module defines the messages a [`ResourceClient`](crate::ResourceClient)
//! sends to its [`StateStore`](crate::StateStore). Every operation produces
//! exactly two of them: a `Pending` when the request starts and one settle
//! action (`*Fulfilled` or `Rejected`) when it completes. The store applies
//! them in arrival order, which is the only point where state changes.

use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot acknowledgement channel used by the store.
pub type Ack = oneshot::Sender<()>;

/// The request an action belongs to.
///
/// List requests carry a ticket taken from a per-client counter so the store
/// can tell an old response from the newest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    List { ticket: u64 },
    Get,
    Create,
    Update,
    PartialUpdate,
    Delete,
}

impl RequestKind {
    /// Create, update, partial update and delete drive the `updating` flag;
    /// list and get drive `loading`.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            RequestKind::Create
                | RequestKind::Update
                | RequestKind::PartialUpdate
                | RequestKind::Delete
        )
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestKind::List { .. } => "fetch_entity_list",
            RequestKind::Get => "fetch_entity",
            RequestKind::Create => "create_entity",
            RequestKind::Update => "update_entity",
            RequestKind::PartialUpdate => "partial_update_entity",
            RequestKind::Delete => "delete_entity",
        };
        f.write_str(name)
    }
}

/// A state transition for one entity type.
#[derive(Debug, Clone, PartialEq)]
pub enum StateAction<T> {
    Pending(RequestKind),
    ListFulfilled {
        ticket: u64,
        entities: Vec<T>,
        total_items: Option<u64>,
    },
    EntityFulfilled(T),
    /// Create, update or partial update succeeded with the server's representation.
    MutationFulfilled(T),
    DeleteFulfilled,
    Rejected {
        request: RequestKind,
        message: String,
    },
    Reset,
}

impl<T> StateAction<T> {
    /// The list ticket this action settles or starts, if any.
    pub fn list_ticket(&self) -> Option<u64> {
        match self {
            StateAction::Pending(RequestKind::List { ticket })
            | StateAction::Rejected {
                request: RequestKind::List { ticket },
                ..
            }
            | StateAction::ListFulfilled { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }
}

/// Envelope sent over the store channel.
///
/// The client awaits `respond_to` so that, once an operation returns, the
/// state it produced is already visible through the snapshot.
#[derive(Debug)]
pub struct StoreRequest<T> {
    pub action: StateAction<T>,
    pub respond_to: Ack,
}
