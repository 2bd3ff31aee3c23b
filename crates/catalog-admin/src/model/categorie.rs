use resource_framework::RestEntity;
use serde::{Deserialize, Serialize};

/// A subject area courses are filed under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categorie {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
}

impl Categorie {
    pub fn new(nom: impl Into<String>) -> Self {
        Self {
            id: None,
            nom: Some(nom.into()),
        }
    }
}

impl RestEntity for Categorie {
    type Id = i64;
    const RESOURCE: &'static str = "categories";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
