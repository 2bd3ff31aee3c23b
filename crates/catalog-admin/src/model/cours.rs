use resource_framework::{map_id_list, ResourceError, RestEntity};
use serde::{Deserialize, Serialize};

use crate::model::{Catalogue, Categorie};

/// A course offered in a catalogue.
///
/// `categories` is many-to-many and `catalogue` many-to-one; both travel as
/// nested objects of which only the `id` matters on writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prix: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Categorie>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalogue: Option<Catalogue>,
}

impl Cours {
    pub fn new(nom: impl Into<String>) -> Self {
        Self {
            nom: Some(nom.into()),
            ..Self::default()
        }
    }

    /// Replaces `categories` with stubs for the ids picked in a multi-select.
    ///
    /// Blank selections are ignored. Fails if an id is not numeric.
    pub fn with_category_ids<I, S>(mut self, ids: I) -> Result<Self, ResourceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stubs = serde_json::Value::Array(map_id_list(ids));
        self.categories = Some(serde_json::from_value(stubs)?);
        Ok(self)
    }

    /// Links the catalogue whose id matches `selected`, looked up in the
    /// already loaded `catalogues`. An unknown or blank id unlinks it.
    pub fn with_catalogue(mut self, selected: &str, catalogues: &[Catalogue]) -> Self {
        let selected = selected.trim();
        self.catalogue = catalogues
            .iter()
            .find(|c| c.id.is_some_and(|id| id.to_string() == selected))
            .cloned();
        self
    }
}

impl RestEntity for Cours {
    type Id = i64;
    const RESOURCE: &'static str = "cours";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
