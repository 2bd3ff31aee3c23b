use resource_framework::RestEntity;
use serde::{Deserialize, Serialize};

use crate::model::{Cours, Utilisateur};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Jour {
    Lundi,
    Mardi,
    Mercredi,
    Jeudi,
    Vendredi,
    Samedi,
    Dimanche,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreneauStatuts {
    Disponible,
    Reserve,
    Annule,
}

/// A weekly time slot of a course.
///
/// Times are kept as the `HH:mm` strings the server exchanges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creneau {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jour: Option<Jour>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heure_debut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heure_fin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuts: Option<CreneauStatuts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cours: Option<Cours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilisateur: Option<Utilisateur>,
}

impl RestEntity for Creneau {
    type Id = i64;
    const RESOURCE: &'static str = "creneaus";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
