use resource_framework::RestEntity;
use serde::{Deserialize, Serialize};

/// A learner or instructor known to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utilisateur {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prenom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
}

impl RestEntity for Utilisateur {
    type Id = i64;
    const RESOURCE: &'static str = "utilisateurs";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
