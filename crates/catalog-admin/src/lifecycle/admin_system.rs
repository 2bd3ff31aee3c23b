use std::sync::Arc;

use resource_framework::{
    ClientConfig, HttpTransport, QueryParams, ResourceClient, ResourceError, ResourceRegistry,
    RestEntity, Transport,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::clients::{
    CatalogueClient, CategorieClient, CoursClient, CreneauClient, EvaluationClient,
    PaiementClient, UtilisateurClient,
};
use crate::config::AdminConfig;
use crate::error::AdminError;
use crate::model::{Catalogue, Categorie, Cours, Creneau, Evaluation, Paiement, Utilisateur};

/// Runtime of the admin client: one state store per catalog entity.
///
/// # Example
///
/// ```ignore
/// let system = AdminSystem::new(&config)?;
/// let saved = system.categories().create(&Categorie::new("Réseaux")).await?;
/// system.shutdown().await?;
/// ```
pub struct AdminSystem {
    cours: CoursClient,
    categories: CategorieClient,
    catalogues: CatalogueClient,
    paiements: PaiementClient,
    evaluations: EvaluationClient,
    utilisateurs: UtilisateurClient,
    creneaus: CreneauClient,

    /// Owns the store tasks (used for typed lookup and graceful shutdown)
    registry: ResourceRegistry,
}

impl AdminSystem {
    /// Builds the HTTP transport from `config` and starts every store.
    pub fn new(config: &AdminConfig) -> Result<Self, AdminError> {
        let client_config = config.client_config();
        let transport = HttpTransport::new(&client_config)?;
        info!(api_url = %client_config.base_url, "Starting admin system");
        Ok(Self::with_transport(Arc::new(transport), &client_config))
    }

    /// Starts every store over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        let mut registry =
            ResourceRegistry::new(transport, config.store_buffer, config.list_ordering);
        let cours = CoursClient::new(registry.register::<Cours>());
        let categories = registry.register::<Categorie>();
        let catalogues = registry.register::<Catalogue>();
        let paiements = registry.register::<Paiement>();
        let evaluations = registry.register::<Evaluation>();
        let utilisateurs = registry.register::<Utilisateur>();
        let creneaus = registry.register::<Creneau>();
        info!(resources = ?registry.resources(), "Stores started");

        Self {
            cours,
            categories,
            catalogues,
            paiements,
            evaluations,
            utilisateurs,
            creneaus,
            registry,
        }
    }

    /// Typed lookup of a registered client.
    pub fn client<T: RestEntity>(&self) -> Result<ResourceClient<T>, AdminError> {
        self.registry
            .client::<T>()
            .ok_or_else(|| AdminError::UnknownResource(T::RESOURCE.to_string()))
    }

    /// Collection names of every managed resource.
    pub fn resources(&self) -> &[&'static str] {
        self.registry.resources()
    }

    pub fn cours(&self) -> CoursClient {
        self.cours.clone()
    }

    pub fn categories(&self) -> CategorieClient {
        self.categories.clone()
    }

    pub fn catalogues(&self) -> CatalogueClient {
        self.catalogues.clone()
    }

    pub fn paiements(&self) -> PaiementClient {
        self.paiements.clone()
    }

    pub fn evaluations(&self) -> EvaluationClient {
        self.evaluations.clone()
    }

    pub fn utilisateurs(&self) -> UtilisateurClient {
        self.utilisateurs.clone()
    }

    pub fn creneaus(&self) -> CreneauClient {
        self.creneaus.clone()
    }

    /// Lists the resource whose collection name is `resource` and returns the
    /// records as JSON, for callers that only know the name at runtime.
    #[instrument(skip(self))]
    pub async fn list_by_name(
        &self,
        resource: &str,
        query: QueryParams,
    ) -> Result<Value, AdminError> {
        match resource {
            Cours::RESOURCE => self.list_value::<Cours>(query).await,
            Categorie::RESOURCE => self.list_value::<Categorie>(query).await,
            Catalogue::RESOURCE => self.list_value::<Catalogue>(query).await,
            Paiement::RESOURCE => self.list_value::<Paiement>(query).await,
            Evaluation::RESOURCE => self.list_value::<Evaluation>(query).await,
            Utilisateur::RESOURCE => self.list_value::<Utilisateur>(query).await,
            Creneau::RESOURCE => self.list_value::<Creneau>(query).await,
            other => Err(AdminError::UnknownResource(other.to_string())),
        }
    }

    /// Drops the system's clients and waits for every store to stop.
    ///
    /// Clients obtained from the system must be dropped before calling this.
    pub async fn shutdown(self) -> Result<(), AdminError> {
        info!("Shutting down admin system...");

        // Close the channels held here; the registry drops its own copies.
        drop(self.cours);
        drop(self.categories);
        drop(self.catalogues);
        drop(self.paiements);
        drop(self.evaluations);
        drop(self.utilisateurs);
        drop(self.creneaus);

        self.registry
            .shutdown()
            .await
            .map_err(AdminError::Shutdown)?;
        info!("Admin system shutdown complete.");
        Ok(())
    }

    async fn list_value<T: RestEntity>(&self, query: QueryParams) -> Result<Value, AdminError> {
        let entities = self.client::<T>()?.list(query).await?;
        Ok(serde_json::to_value(entities).map_err(ResourceError::from)?)
    }
}
