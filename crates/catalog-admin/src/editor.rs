//! # Entity Editor
//!
//! Headless controller behind a create/edit screen. It owns no form state of
//! its own; it decides between create and update from how it was opened and
//! publishes the outcome of the last save so a view can close itself once the
//! save has settled.
//!
//! ```rust,ignore
//! let mut editor = EntityEditor::new(system.client::<Categorie>()?);
//! let form = editor.open(Some(4)).await?;     // fetches categorie 4
//! editor.save(&edited).await?;                // PUT api/categories/4
//! ```

use std::sync::Arc;

use resource_framework::{ResourceClient, RestEntity};
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::error::AdminError;

type Outcome<T> = Option<Result<T, AdminError>>;

/// Create-or-update controller for one entity type.
pub struct EntityEditor<T: RestEntity> {
    client: ResourceClient<T>,
    editing: Option<T::Id>,
    outcome: Arc<watch::Sender<Outcome<T>>>,
}

impl<T: RestEntity> Clone for EntityEditor<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            editing: self.editing.clone(),
            outcome: Arc::clone(&self.outcome),
        }
    }
}

impl<T: RestEntity> EntityEditor<T> {
    pub fn new(client: ResourceClient<T>) -> Self {
        let (outcome, _) = watch::channel(None);
        Self {
            client,
            editing: None,
            outcome: Arc::new(outcome),
        }
    }

    /// True until the editor is opened on an existing record.
    pub fn is_new(&self) -> bool {
        self.editing.is_none()
    }

    pub fn client(&self) -> &ResourceClient<T> {
        &self.client
    }

    /// Prepares the form and returns the values it starts from.
    ///
    /// `None` resets the resource state and starts from `T::default()`;
    /// `Some(id)` fetches that record.
    #[instrument(skip(self), fields(resource = T::RESOURCE))]
    pub async fn open(&mut self, id: Option<T::Id>) -> Result<T, AdminError> {
        self.outcome.send_replace(None);
        self.editing = id.clone();
        match id {
            None => {
                self.client.reset().await?;
                Ok(T::default())
            }
            Some(id) => Ok(self.client.get(id).await?),
        }
    }

    /// Creates the record when the editor is new, updates it otherwise.
    #[instrument(skip(self, entity), fields(resource = T::RESOURCE, new = self.is_new()))]
    pub async fn save(&self, entity: &T) -> Result<T, AdminError> {
        self.outcome.send_replace(None);
        let saved = if self.is_new() {
            self.client.create(entity).await
        } else {
            self.client.update(entity).await
        };
        let result = saved.map_err(AdminError::from);

        debug!(success = result.is_ok(), "Save settled");
        self.outcome.send_replace(Some(result.clone()));
        result
    }

    /// Resolves with the outcome of the save in progress, or of the last one
    /// if it already settled.
    pub async fn wait_settled(&self) -> Result<T, AdminError> {
        let mut rx = self.outcome.subscribe();
        let outcome = rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| AdminError::Shutdown("editor dropped".to_string()))?
            .clone();
        outcome.unwrap_or_else(|| Err(AdminError::Shutdown("editor dropped".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Categorie;
    use resource_framework::mock::{create_mock_client, MockTransport};
    use resource_framework::{Method, ResourceError, ResourceState};
    use serde_json::json;

    #[tokio::test]
    async fn opening_new_resets_state() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "api/categories/1")
            .respond_error(404, "Not Found");
        let client = create_mock_client::<Categorie>(&mock);
        let _ = client.get(1).await;

        let mut editor = EntityEditor::new(client.clone());
        let form = editor.open(None).await.unwrap();

        assert!(editor.is_new());
        assert_eq!(form, Categorie::default());
        assert_eq!(client.state(), ResourceState::default());
    }

    #[tokio::test]
    async fn opening_existing_fetches_it() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "api/categories/4")
            .respond_json(json!({ "id": 4, "nom": "Réseaux" }));
        let mut editor = EntityEditor::new(create_mock_client::<Categorie>(&mock));

        let form = editor.open(Some(4)).await.unwrap();

        assert!(!editor.is_new());
        assert_eq!(form.nom.as_deref(), Some("Réseaux"));
        assert_eq!(editor.client().state().entity, form);
    }

    #[tokio::test]
    async fn wait_settled_sees_a_failed_save() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "api/categories/4")
            .respond_json(json!({ "id": 4, "nom": "Réseaux" }));
        mock.expect(Method::Put, "api/categories/4")
            .delay(std::time::Duration::from_millis(20))
            .respond_error(400, "nom required");
        let mut editor = EntityEditor::new(create_mock_client::<Categorie>(&mock));
        let form = editor.open(Some(4)).await.unwrap();

        let saving = {
            let editor = editor.clone();
            tokio::spawn(async move { editor.save(&form).await })
        };
        let settled = editor.wait_settled().await;
        let _ = saving.await.unwrap();

        assert_eq!(
            settled,
            Err(AdminError::Resource(ResourceError::Http {
                status: 400,
                message: "nom required".to_string()
            }))
        );
    }
}
