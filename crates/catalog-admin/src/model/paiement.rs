use chrono::{DateTime, Utc};
use resource_framework::RestEntity;
use serde::{Deserialize, Serialize};

use crate::model::{Cours, Utilisateur};

/// A payment made for a course enrolment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paiement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub montant: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_paiement: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cours: Option<Cours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilisateur: Option<Utilisateur>,
}

impl RestEntity for Paiement {
    type Id = i64;
    const RESOURCE: &'static str = "paiements";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
