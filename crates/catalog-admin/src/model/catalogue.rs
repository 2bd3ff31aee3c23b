use resource_framework::RestEntity;
use serde::{Deserialize, Serialize};

/// A published set of courses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalogue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RestEntity for Catalogue {
    type Id = i64;
    const RESOURCE: &'static str = "catalogues";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
