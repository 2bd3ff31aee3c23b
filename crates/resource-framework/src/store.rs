//! # State Store
//!
//! This module defines the `StateStore`, the task that owns the
//! [`ResourceState`] of one entity type. It is the "server" half of a
//! resource client: clients send [`StateAction`]s over a channel, and the
//! store applies them one at a time and publishes every new snapshot on a
//! `watch` channel that views read from.

use crate::config::ListOrdering;
use crate::entity::RestEntity;
use crate::error::ResourceError;
use crate::message::{RequestKind, StateAction, StoreRequest};
use crate::state::ResourceState;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch, Mutex};
use tracing::{debug, info, warn};

/// The task that owns and mutates the state of one entity type.
///
/// # Concurrency Model
/// Any number of cloned clients may send actions concurrently, but the store
/// processes its channel sequentially, so the state needs no `Mutex`. Two
/// requests in flight can still settle in either order; which response wins
/// is governed by the [`ListOrdering`] passed to [`StateStore::run`].
///
/// # Usage Pattern
///
/// ```rust,ignore
/// let (store, handle) = StateStore::<Cours>::new(32);
/// tokio::spawn(store.run(ListOrdering::CompletionOrder));
/// let client = ResourceClient::new(handle, transport);
/// ```
///
/// The store stops once every [`StoreHandle`] (and therefore every client)
/// has been dropped.
pub struct StateStore<T: RestEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    state: ResourceState<T>,
    publisher: watch::Sender<ResourceState<T>>,
    newest_list: u64,
}

impl<T: RestEntity> StateStore<T> {
    /// Creates a store with default state and the handle used to reach it.
    ///
    /// `buffer_size` is the channel capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, StoreHandle<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, snapshot) = watch::channel(ResourceState::default());
        let store = Self {
            receiver,
            state: ResourceState::default(),
            publisher,
            newest_list: 0,
        };
        let handle = StoreHandle {
            sender,
            snapshot,
            list_tickets: Arc::new(Mutex::new(0)),
        };
        (store, handle)
    }

    /// Runs the store loop until every handle is dropped.
    pub async fn run(mut self, ordering: ListOrdering) {
        let resource = T::RESOURCE;
        info!(resource, ?ordering, "Store started");

        while let Some(StoreRequest { action, respond_to }) = self.receiver.recv().await {
            if self.is_stale(&action, ordering) {
                debug!(resource, ticket = ?action.list_ticket(), newest = self.newest_list, "Dropping stale list response");
                let _ = respond_to.send(());
                continue;
            }

            match &action {
                StateAction::Pending(request) => debug!(resource, %request, "Pending"),
                StateAction::ListFulfilled { entities, .. } => {
                    info!(resource, count = entities.len(), "Fetched list")
                }
                StateAction::EntityFulfilled(_) => debug!(resource, "Fetched entity"),
                StateAction::MutationFulfilled(entity) => {
                    info!(resource, id = ?entity.id(), "Saved")
                }
                StateAction::DeleteFulfilled => info!(resource, "Deleted"),
                StateAction::Rejected { request, message } => {
                    warn!(resource, %request, error = %message, "Request failed")
                }
                StateAction::Reset => debug!(resource, "Reset"),
            }

            self.state.apply(action);
            self.publisher.send_replace(self.state.clone());
            let _ = respond_to.send(());
        }

        info!(resource, count = self.state.entities.len(), "Shutdown");
    }

    /// Tracks the newest list ticket and reports whether `action` settles an
    /// older one that must be ignored.
    fn is_stale(&mut self, action: &StateAction<T>, ordering: ListOrdering) -> bool {
        let Some(ticket) = action.list_ticket() else {
            return false;
        };
        if let StateAction::Pending(_) = action {
            self.newest_list = self.newest_list.max(ticket);
            return false;
        }
        ordering == ListOrdering::IssueOrder && ticket < self.newest_list
    }
}

/// Cloneable handle to a running [`StateStore`].
///
/// All clones share one list ticket counter.
pub struct StoreHandle<T> {
    sender: mpsc::Sender<StoreRequest<T>>,
    snapshot: watch::Receiver<ResourceState<T>>,
    list_tickets: Arc<Mutex<u64>>,
}

impl<T> Clone for StoreHandle<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            snapshot: self.snapshot.clone(),
            list_tickets: Arc::clone(&self.list_tickets),
        }
    }
}

impl<T: RestEntity> StoreHandle<T> {
    /// Sends `action` and waits until the store has applied it.
    pub async fn dispatch(&self, action: StateAction<T>) -> Result<(), ResourceError> {
        let (respond_to, applied) = oneshot::channel();
        self.sender
            .send(StoreRequest { action, respond_to })
            .await
            .map_err(|_| ResourceError::StoreClosed)?;
        applied.await.map_err(|_| ResourceError::StoreDropped)
    }

    /// Takes the next list ticket and applies its `Pending`.
    ///
    /// The counter stays locked until the store has applied the action, so
    /// list `Pending`s reach the store in ticket order.
    pub async fn begin_list(&self) -> Result<u64, ResourceError> {
        let mut last = self.list_tickets.lock().await;
        let ticket = *last + 1;
        self.dispatch(StateAction::Pending(RequestKind::List { ticket }))
            .await?;
        *last = ticket;
        Ok(ticket)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> ResourceState<T> {
        self.snapshot.borrow().clone()
    }

    /// Receiver that is notified on every applied action.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.snapshot.clone()
    }
}
