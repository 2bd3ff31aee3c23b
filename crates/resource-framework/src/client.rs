//! # Generic Client
//!
//! This module defines [`ResourceClient`], the type views call to load and
//! save records of one entity type. Every operation follows the same shape:
//!
//! 1. dispatch `Pending` to the store,
//! 2. execute one request through the [`Transport`],
//! 3. dispatch the matching `*Fulfilled` action, or `Rejected` with the
//!    error text,
//! 4. return the outcome to the caller as well.
//!
//! Successful writes also fire a background `list()` so the cached
//! collection catches up with the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::clean::clean_entity;
use crate::entity::RestEntity;
use crate::error::ResourceError;
use crate::message::{RequestKind, StateAction};
use crate::query::QueryParams;
use crate::state::ResourceState;
use crate::store::StoreHandle;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

/// A type-safe client for one REST collection.
///
/// * **Cloneable** – holds a store handle and a shared transport, so clones
///   are cheap and observe the same state.
/// * **Async API** – every operation resolves once its settle action has
///   been applied, so [`ResourceClient::state`] already reflects it.
/// * **Non-throwing for views** – failures are recorded in
///   `error_message`; the returned `Result` is there for callers that want
///   to branch on it and can be ignored otherwise.
pub struct ResourceClient<T: RestEntity> {
    store: StoreHandle<T>,
    transport: Arc<dyn Transport>,
}

impl<T: RestEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: RestEntity> ResourceClient<T> {
    pub fn new(store: StoreHandle<T>, transport: Arc<dyn Transport>) -> Self {
        Self { store, transport }
    }

    /// Copy of the current state.
    pub fn state(&self) -> ResourceState<T> {
        self.store.snapshot()
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.store.subscribe()
    }

    /// Fetches the collection and replaces `entities` with it.
    #[instrument(skip(self), fields(resource = T::RESOURCE))]
    pub async fn list(&self, query: QueryParams) -> Result<Vec<T>, ResourceError> {
        let ticket = self.store.begin_list().await?;
        let kind = RequestKind::List { ticket };

        let now = chrono::Utc::now().timestamp_millis();
        let request =
            ApiRequest::new(Method::Get, T::collection_path()).with_query(query.to_pairs(now));
        let outcome = self
            .transport
            .execute(request)
            .await
            .and_then(decode_list::<T>);

        match outcome {
            Ok((entities, total_items)) => {
                self.store
                    .dispatch(StateAction::ListFulfilled {
                        ticket,
                        entities: entities.clone(),
                        total_items,
                    })
                    .await?;
                Ok(entities)
            }
            Err(e) => self.reject(kind, e).await,
        }
    }

    /// Fetches one record and makes it the current `entity`.
    #[instrument(skip(self), fields(resource = T::RESOURCE))]
    pub async fn get(&self, id: T::Id) -> Result<T, ResourceError> {
        let kind = RequestKind::Get;
        self.store.dispatch(StateAction::Pending(kind)).await?;

        let request = ApiRequest::new(Method::Get, T::item_path(&id));
        let outcome = self
            .transport
            .execute(request)
            .await
            .and_then(decode_entity::<T>);

        match outcome {
            Ok(entity) => {
                self.store
                    .dispatch(StateAction::EntityFulfilled(entity.clone()))
                    .await?;
                Ok(entity)
            }
            Err(e) => self.reject(kind, e).await,
        }
    }

    /// POSTs the cleaned record; the server's answer becomes `entity`.
    #[instrument(skip(self, entity), fields(resource = T::RESOURCE))]
    pub async fn create(&self, entity: &T) -> Result<T, ResourceError> {
        debug!(?entity, "create called");
        self.write(RequestKind::Create, Method::Post, T::collection_path(), entity)
            .await
    }

    /// PUTs the cleaned record to its item path.
    #[instrument(skip(self, entity), fields(resource = T::RESOURCE))]
    pub async fn update(&self, entity: &T) -> Result<T, ResourceError> {
        debug!(?entity, "update called");
        self.write_existing(RequestKind::Update, Method::Put, entity)
            .await
    }

    /// PATCHes the cleaned record; only the fields it carries change.
    #[instrument(skip(self, entity), fields(resource = T::RESOURCE))]
    pub async fn partial_update(&self, entity: &T) -> Result<T, ResourceError> {
        debug!(?entity, "partial_update called");
        self.write_existing(RequestKind::PartialUpdate, Method::Patch, entity)
            .await
    }

    /// Deletes one record and clears `entity`.
    #[instrument(skip(self), fields(resource = T::RESOURCE))]
    pub async fn delete(&self, id: T::Id) -> Result<(), ResourceError> {
        let kind = RequestKind::Delete;
        self.store.dispatch(StateAction::Pending(kind)).await?;

        let request = ApiRequest::new(Method::Delete, T::item_path(&id));
        match self.transport.execute(request).await {
            Ok(_) => {
                self.store.dispatch(StateAction::DeleteFulfilled).await?;
                self.refresh();
                Ok(())
            }
            Err(e) => self.reject(kind, e).await,
        }
    }

    /// Restores the initial state, e.g. before opening a blank form.
    pub async fn reset(&self) -> Result<(), ResourceError> {
        self.store.dispatch(StateAction::Reset).await
    }

    async fn write_existing(
        &self,
        kind: RequestKind,
        method: Method,
        entity: &T,
    ) -> Result<T, ResourceError> {
        match entity.id() {
            Some(id) => self.write(kind, method, T::item_path(&id), entity).await,
            None => {
                self.store.dispatch(StateAction::Pending(kind)).await?;
                self.reject(kind, ResourceError::MissingId).await
            }
        }
    }

    async fn write(
        &self,
        kind: RequestKind,
        method: Method,
        path: String,
        entity: &T,
    ) -> Result<T, ResourceError> {
        self.store.dispatch(StateAction::Pending(kind)).await?;

        let outcome = match clean_entity(entity) {
            Ok(body) => {
                let request = ApiRequest::new(method, path).with_body(body);
                self.transport
                    .execute(request)
                    .await
                    .and_then(decode_entity::<T>)
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(saved) => {
                self.store
                    .dispatch(StateAction::MutationFulfilled(saved.clone()))
                    .await?;
                self.refresh();
                Ok(saved)
            }
            Err(e) => self.reject(kind, e).await,
        }
    }

    async fn reject<R>(
        &self,
        request: RequestKind,
        error: ResourceError,
    ) -> Result<R, ResourceError> {
        self.store
            .dispatch(StateAction::Rejected {
                request,
                message: error.to_string(),
            })
            .await?;
        Err(error)
    }

    /// Fires a `list()` without waiting for it; its failure only lands in state.
    fn refresh(&self) {
        let client = self.clone();
        tokio::spawn(async move {
            if let Err(e) = client.list(QueryParams::default()).await {
                warn!(resource = T::RESOURCE, error = %e, "Refresh after write failed");
            }
        });
    }
}

fn decode_list<T: RestEntity>(
    response: ApiResponse,
) -> Result<(Vec<T>, Option<u64>), ResourceError> {
    let body = response
        .body
        .ok_or_else(|| ResourceError::Payload("empty response body".to_string()))?;
    let entities = serde_json::from_value::<Vec<T>>(body)?;
    Ok((entities, response.total_count))
}

fn decode_entity<T: RestEntity>(response: ApiResponse) -> Result<T, ResourceError> {
    let body = response
        .body
        .ok_or_else(|| ResourceError::Payload("empty response body".to_string()))?;
    Ok(serde_json::from_value::<T>(body)?)
}
