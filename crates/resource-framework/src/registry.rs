//! # Resource Registry
//!
//! The process-wide state tree: one [`StateStore`] per entity type, each
//! reachable through its typed [`ResourceClient`]. Views look a client up by
//! entity type (`registry.client::<Cours>()`) instead of holding a field per
//! resource.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::client::ResourceClient;
use crate::config::ListOrdering;
use crate::entity::RestEntity;
use crate::store::StateStore;
use crate::transport::Transport;

/// Owns the store tasks of every registered entity type.
pub struct ResourceRegistry {
    transport: Arc<dyn Transport>,
    buffer_size: usize,
    ordering: ListOrdering,
    clients: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    names: Vec<&'static str>,
    handles: Vec<JoinHandle<()>>,
}

impl ResourceRegistry {
    pub fn new(transport: Arc<dyn Transport>, buffer_size: usize, ordering: ListOrdering) -> Self {
        Self {
            transport,
            buffer_size,
            ordering,
            clients: HashMap::new(),
            names: Vec::new(),
            handles: Vec::new(),
        }
    }

    /// Spawns a store for `T` and returns its client.
    ///
    /// Registering the same type twice returns the existing client.
    pub fn register<T: RestEntity>(&mut self) -> ResourceClient<T> {
        if let Some(existing) = self.client::<T>() {
            debug!(resource = T::RESOURCE, "Already registered");
            return existing;
        }
        let (store, handle) = StateStore::<T>::new(self.buffer_size);
        self.handles.push(tokio::spawn(store.run(self.ordering)));
        let client = ResourceClient::new(handle, Arc::clone(&self.transport));
        self.clients
            .insert(TypeId::of::<T>(), Box::new(client.clone()));
        self.names.push(T::RESOURCE);
        client
    }

    /// The client for `T`, if it was registered.
    pub fn client<T: RestEntity>(&self) -> Option<ResourceClient<T>> {
        self.clients
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<ResourceClient<T>>())
            .cloned()
    }

    /// Collection names of every registered resource, in registration order.
    pub fn resources(&self) -> &[&'static str] {
        &self.names
    }

    /// Drops the registry's clients and waits for every store to stop.
    ///
    /// Stores stop once the last client clone is gone, so callers must drop
    /// the clients they took out of the registry first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!(resources = self.names.len(), "Shutting down stores");
        drop(self.clients);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Stores shut down");
        Ok(())
    }
}
