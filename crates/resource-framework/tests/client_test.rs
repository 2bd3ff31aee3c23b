use resource_framework::mock::{create_mock_client, create_mock_client_with, MockTransport};
use resource_framework::{
    ApiResponse, ListOrdering, Method, QueryParams, ResourceClient, ResourceError, ResourceState,
    RestEntity,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

// --- Test Entity ---

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct Cours {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prix: Option<f64>,
}

impl RestEntity for Cours {
    type Id = i64;
    const RESOURCE: &'static str = "cours";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

fn cours(id: i64, nom: &str, prix: f64) -> Cours {
    Cours {
        id: Some(id),
        nom: Some(nom.to_string()),
        description: None,
        prix: Some(prix),
    }
}

/// Waits (bounded) until the client's state satisfies `condition`.
async fn settle<F>(client: &ResourceClient<Cours>, condition: F) -> ResourceState<Cours>
where
    F: FnMut(&ResourceState<Cours>) -> bool,
{
    let mut rx = client.subscribe();
    let state = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(condition))
        .await
        .expect("state never settled")
        .expect("store stopped")
        .clone();
    state
}

// --- Tests ---

#[tokio::test]
async fn create_sends_cleaned_payload_and_stores_server_copy() {
    let mock = MockTransport::new();
    mock.expect(Method::Post, "api/cours")
        .respond_json(json!({ "id": 1, "nom": "Intro", "prix": 10 }));
    mock.expect(Method::Get, "api/cours")
        .respond_json(json!([{ "id": 1, "nom": "Intro", "prix": 10 }]));
    let client = create_mock_client::<Cours>(&mock);

    let draft = Cours {
        id: None,
        nom: Some("Intro".to_string()),
        description: Some(String::new()),
        prix: Some(10.0),
    };
    let saved = client.create(&draft).await.unwrap();

    let posted = mock.requests_to(Method::Post, "api/cours");
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].body, Some(json!({ "nom": "Intro", "prix": 10.0 })));

    let state = client.state();
    assert_eq!(saved, cours(1, "Intro", 10.0));
    assert_eq!(state.entity, saved);
    assert!(state.update_success);
    assert!(!state.updating);

    // The follow-up refresh lands on its own.
    let refreshed = settle(&client, |s| !s.entities.is_empty()).await;
    assert_eq!(refreshed.entities, vec![cours(1, "Intro", 10.0)]);
    mock.verify();
}

#[tokio::test]
async fn update_and_partial_update_target_item_path() {
    let mock = MockTransport::new();
    mock.expect(Method::Put, "api/cours/3")
        .respond_json(json!({ "id": 3, "nom": "Rust", "prix": 25 }));
    mock.expect(Method::Patch, "api/cours/3")
        .respond_json(json!({ "id": 3, "nom": "Rust avancé", "prix": 25 }));
    mock.expect(Method::Get, "api/cours").respond_json(json!([]));
    mock.expect(Method::Get, "api/cours").respond_json(json!([]));
    let client = create_mock_client::<Cours>(&mock);

    client.update(&cours(3, "Rust", 25.0)).await.unwrap();
    assert!(client.state().update_success);

    let patch = Cours {
        id: Some(3),
        nom: Some("Rust avancé".to_string()),
        ..Cours::default()
    };
    let patched = client.partial_update(&patch).await.unwrap();
    assert_eq!(patched.nom.as_deref(), Some("Rust avancé"));
    assert_eq!(client.state().entity, patched);

    let sent = mock.requests_to(Method::Patch, "api/cours/3");
    assert_eq!(sent[0].body, Some(json!({ "id": 3, "nom": "Rust avancé" })));
}

#[tokio::test]
async fn failed_update_records_error_and_keeps_success_false() {
    let mock = MockTransport::new();
    mock.expect(Method::Put, "api/cours/1")
        .respond_error(400, "nom must not be blank");
    let client = create_mock_client::<Cours>(&mock);

    let result = client.update(&cours(1, "x", 1.0)).await;

    assert_eq!(
        result,
        Err(ResourceError::Http {
            status: 400,
            message: "nom must not be blank".to_string()
        })
    );
    let state = client.state();
    assert!(!state.update_success);
    assert!(!state.updating);
    assert_eq!(
        state.error_message.as_deref(),
        Some("HTTP 400: nom must not be blank")
    );
    // No refresh after a failure.
    mock.verify();
}

#[tokio::test]
async fn success_flag_resets_when_the_next_mutation_fails() {
    let mock = MockTransport::new();
    mock.expect(Method::Post, "api/cours")
        .respond_json(json!({ "id": 1, "nom": "a", "prix": 1 }));
    mock.expect(Method::Get, "api/cours").respond_json(json!([]));
    mock.expect(Method::Put, "api/cours/1").respond_error(500, "boom");
    let client = create_mock_client::<Cours>(&mock);

    client.create(&Cours::default()).await.unwrap();
    assert!(client.state().update_success);

    assert!(client.update(&cours(1, "a", 1.0)).await.is_err());
    assert!(!client.state().update_success);
}

#[tokio::test]
async fn success_flag_survives_the_refresh_after_a_write() {
    let mock = MockTransport::new();
    mock.expect(Method::Post, "api/cours")
        .respond_json(json!({ "id": 1, "nom": "Intro", "prix": 10 }));
    mock.expect(Method::Get, "api/cours")
        .delay(Duration::from_millis(300))
        .respond_json(json!([{ "id": 1, "nom": "Intro", "prix": 10 }]));
    let client = create_mock_client::<Cours>(&mock);

    let draft = Cours {
        nom: Some("Intro".to_string()),
        ..Cours::default()
    };
    client.create(&draft).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Refresh is in flight here.
    let during = client.state();
    assert!(during.loading);
    assert!(during.update_success);

    let after = settle(&client, |s| !s.loading && !s.entities.is_empty()).await;
    assert!(after.update_success);
    assert_eq!(after.entity, cours(1, "Intro", 10.0));
    mock.verify();
}

#[tokio::test]
async fn update_without_id_never_reaches_the_server() {
    let mock = MockTransport::new();
    let client = create_mock_client::<Cours>(&mock);

    let result = client.update(&Cours::default()).await;

    assert_eq!(result, Err(ResourceError::MissingId));
    assert!(mock.requests().is_empty());
    assert_eq!(
        client.state().error_message.as_deref(),
        Some("Entity has no identifier")
    );
}

#[tokio::test]
async fn delete_clears_entity_and_refreshes() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "api/cours/1")
        .respond_json(json!({ "id": 1, "nom": "Intro", "prix": 10 }));
    mock.expect(Method::Delete, "api/cours/1").respond_empty();
    mock.expect(Method::Get, "api/cours")
        .respond_json(json!([{ "id": 2, "nom": "Suite", "prix": 12 }]));
    let client = create_mock_client::<Cours>(&mock);

    client.get(1).await.unwrap();
    client.delete(1).await.unwrap();

    let state = client.state();
    assert_eq!(state.entity, Cours::default());
    assert!(!state.updating);
    assert!(state.update_success);

    let refreshed = settle(&client, |s| !s.entities.is_empty()).await;
    assert_eq!(refreshed.entities, vec![cours(2, "Suite", 12.0)]);
    mock.verify();
}

#[tokio::test]
async fn list_passes_pagination_and_cache_buster() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "api/cours")
        .respond_json(json!([{ "id": 2, "nom": "b", "prix": 2 }, { "id": 1, "nom": "a", "prix": 1 }]));
    let client = create_mock_client::<Cours>(&mock);

    let listed = client
        .list(QueryParams::page(0, 20).sorted_by("id,asc"))
        .await
        .unwrap();

    let request = &mock.requests()[0];
    assert_eq!(request.query_value("page"), Some("0"));
    assert_eq!(request.query_value("size"), Some("20"));
    assert_eq!(request.query_value("sort"), Some("id,asc"));
    let buster = request.query_value("cacheBuster").expect("cache buster");
    assert!(buster.parse::<i64>().unwrap() > 0);

    // Server order is kept as-is.
    let state = client.state();
    assert_eq!(state.entities, vec![cours(2, "b", 2.0), cours(1, "a", 1.0)]);
    assert_eq!(state.entities, listed);
    assert!(!state.loading);
}

#[tokio::test]
async fn failed_list_keeps_previous_entities() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "api/cours")
        .respond_json(json!([{ "id": 1, "nom": "a", "prix": 1 }]));
    mock.expect(Method::Get, "api/cours").respond_error(503, "unavailable");
    let client = create_mock_client::<Cours>(&mock);

    client.list(QueryParams::default()).await.unwrap();
    let result = client.list(QueryParams::default()).await;

    assert!(result.is_err());
    let state = client.state();
    assert!(!state.loading);
    assert_eq!(state.entities, vec![cours(1, "a", 1.0)]);
    assert_eq!(state.error_message.as_deref(), Some("HTTP 503: unavailable"));
}

#[tokio::test]
async fn empty_list_body_is_a_payload_error() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "api/cours")
        .respond_json(json!([{ "id": 1, "nom": "a", "prix": 1 }]));
    mock.expect(Method::Get, "api/cours").respond_empty();
    let client = create_mock_client::<Cours>(&mock);

    client.list(QueryParams::default()).await.unwrap();
    let result = client.list(QueryParams::default()).await;

    assert!(matches!(result, Err(ResourceError::Payload(_))));
    let state = client.state();
    assert!(!state.loading);
    assert_eq!(state.entities, vec![cours(1, "a", 1.0)]);
    assert_eq!(
        state.error_message.as_deref(),
        Some("Invalid payload: empty response body")
    );
}

#[tokio::test]
async fn total_count_header_is_recorded() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "api/cours").respond_with(Ok(ApiResponse {
        status: 200,
        body: Some(json!([])),
        total_count: Some(42),
    }));
    let client = create_mock_client::<Cours>(&mock);

    client.list(QueryParams::page(1, 20)).await.unwrap();
    assert_eq!(client.state().total_items, Some(42));
}

#[tokio::test]
async fn get_twice_is_idempotent() {
    let mock = MockTransport::new();
    for _ in 0..2 {
        mock.expect(Method::Get, "api/cours/5")
            .respond_json(json!({ "id": 5, "nom": "e", "prix": 5 }));
    }
    let client = create_mock_client::<Cours>(&mock);

    client.get(5).await.unwrap();
    let first = client.state().entity;
    client.get(5).await.unwrap();
    assert_eq!(client.state().entity, first);
}

#[tokio::test]
async fn malformed_body_is_a_recorded_failure() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "api/cours/5").respond_json(json!("oops"));
    let client = create_mock_client::<Cours>(&mock);

    let result = client.get(5).await;
    assert!(matches!(result, Err(ResourceError::Payload(_))));
    let state = client.state();
    assert!(!state.loading);
    assert!(state.error_message.is_some());
}

#[tokio::test]
async fn reset_restores_initial_state() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "api/cours/1").respond_error(404, "Not Found");
    let client = create_mock_client::<Cours>(&mock);

    let _ = client.get(1).await;
    assert!(client.state().error_message.is_some());

    client.reset().await.unwrap();
    assert_eq!(client.state(), ResourceState::default());
}

async fn race_two_lists(ordering: ListOrdering) -> Vec<Cours> {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "api/cours")
        .delay(Duration::from_millis(100))
        .respond_json(json!([{ "id": 1, "nom": "first", "prix": 1 }]));
    mock.expect(Method::Get, "api/cours")
        .respond_json(json!([{ "id": 2, "nom": "second", "prix": 2 }]));
    let client = create_mock_client_with::<Cours>(&mock, ordering);

    let slow = {
        let client = client.clone();
        tokio::spawn(async move { client.list(QueryParams::default()).await })
    };
    while mock.requests().is_empty() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    client.list(QueryParams::default()).await.unwrap();
    slow.await.unwrap().unwrap();

    client.state().entities
}

#[tokio::test]
async fn late_list_response_wins_by_default() {
    let entities = race_two_lists(ListOrdering::CompletionOrder).await;
    assert_eq!(entities, vec![cours(1, "first", 1.0)]);
}

#[tokio::test]
async fn issue_order_keeps_newest_request() {
    let entities = race_two_lists(ListOrdering::IssueOrder).await;
    assert_eq!(entities, vec![cours(2, "second", 2.0)]);
}
