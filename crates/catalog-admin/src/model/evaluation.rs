use chrono::{DateTime, Utc};
use resource_framework::RestEntity;
use serde::{Deserialize, Serialize};

use crate::model::{Cours, Utilisateur};

/// A learner's review of a course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentaire: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cours: Option<Cours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Utilisateur>,
}

impl RestEntity for Evaluation {
    type Id = i64;
    const RESOURCE: &'static str = "evaluations";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn created_at_round_trips_as_rfc3339() {
        let evaluation: Evaluation = serde_json::from_value(json!({
            "id": 3,
            "commentaire": "Très clair",
            "createdAt": "2024-03-01T09:30:00Z",
            "user": { "id": 8 }
        }))
        .unwrap();

        assert_eq!(
            evaluation.created_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
        );
        assert_eq!(evaluation.user.and_then(|u| u.id), Some(8));
    }
}
