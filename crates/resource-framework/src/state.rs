//! # Resource State
//!
//! [`ResourceState`] is the snapshot a view renders from: the last fetched
//! collection, the last fetched or written record, and the lifecycle flags of
//! the request in flight. [`ResourceState::apply`] is the reducer; it is pure
//! and synchronous, and the [`StateStore`](crate::StateStore) task is its only
//! caller at runtime.

use serde::Serialize;

use crate::message::StateAction;

/// Request-lifecycle state for one entity type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceState<T> {
    /// Last fetched collection, in server response order.
    pub entities: Vec<T>,
    /// Last fetched/created/updated record; `T::default()` after a delete.
    pub entity: T,
    /// A list or get request is in flight.
    pub loading: bool,
    /// A create, update, partial update or delete is in flight.
    pub updating: bool,
    /// The most recent mutation succeeded and no mutation has started since.
    pub update_success: bool,
    pub error_message: Option<String>,
    /// `X-Total-Count` of the last successful list, when the server sent one.
    pub total_items: Option<u64>,
}

impl<T: Default> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            entity: T::default(),
            loading: false,
            updating: false,
            update_success: false,
            error_message: None,
            total_items: None,
        }
    }
}

impl<T: Default> ResourceState<T> {
    /// Applies one transition.
    pub fn apply(&mut self, action: StateAction<T>) {
        match action {
            StateAction::Pending(request) => {
                self.error_message = None;
                if request.is_mutation() {
                    self.update_success = false;
                    self.updating = true;
                } else {
                    self.loading = true;
                }
            }
            StateAction::ListFulfilled {
                entities,
                total_items,
                ..
            } => {
                self.loading = false;
                self.entities = entities;
                if total_items.is_some() {
                    self.total_items = total_items;
                }
            }
            StateAction::EntityFulfilled(entity) => {
                self.loading = false;
                self.entity = entity;
            }
            StateAction::MutationFulfilled(entity) => {
                self.updating = false;
                self.loading = false;
                self.update_success = true;
                self.entity = entity;
            }
            StateAction::DeleteFulfilled => {
                self.updating = false;
                self.update_success = true;
                self.entity = T::default();
            }
            StateAction::Rejected { message, .. } => {
                self.loading = false;
                self.updating = false;
                self.update_success = false;
                self.error_message = Some(message);
            }
            StateAction::Reset => *self = Self::default(),
        }
    }

    /// True while any request of this resource is in flight.
    pub fn is_busy(&self) -> bool {
        self.loading || self.updating
    }
}
