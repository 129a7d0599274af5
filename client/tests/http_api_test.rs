//! Integration tests for the server backend against a stub HTTP server

mod common;

use std::sync::Arc;
use std::time::Duration;

use gym_tracker_client::api::{GymApi, AUTH_TOKEN_KEY};
use gym_tracker_client::error::ApiError;
use gym_tracker_client::storage::{KeyValueStore, MemoryStore};
use gym_tracker_shared::{PlanSlot, RankingWindow, Role, StudentPatch};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn base_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

async fn logged_in(server: &MockServer) -> (gym_tracker_client::api::HttpApi, Arc<MemoryStore>) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "abc123",
            "user": common::user_json("t1", "teacher")
        })))
        .mount(server)
        .await;

    let (api, storage) = common::http_api(&base_url(server), 2_000);
    api.login("teacher@gym.com", "secret").await.unwrap();
    (api, storage)
}

#[tokio::test]
async fn test_login_stores_token_and_sends_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "teacher@gym.com", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc123",
            "user": common::user_json("t1", "teacher")
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(header("Authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (api, storage) = common::http_api(&base_url(&server), 2_000);
    assert!(!api.session().is_authenticated());
    let user = api.login("teacher@gym.com", "secret").await.unwrap();
    assert!(api.session().is_authenticated());

    assert_eq!(user.role, Role::Teacher);
    assert_eq!(user.level, 4);
    assert_eq!(
        storage.get(AUTH_TOKEN_KEY).unwrap().as_deref(),
        Some("abc123")
    );
    assert!(api.get_students().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_persisted_token_is_restored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ranking/total"))
        .and(header("Authorization", "Bearer restored"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "b", "name": "B", "points": 10, "level": 1, "position": 2 },
            { "id": "a", "name": "A", "points": 20, "level": 1, "position": 1 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStore::with_entries([(AUTH_TOKEN_KEY, "restored")]));
    let (api, _) = common::http_api_with_storage(&base_url(&server), 2_000, storage);

    let ranking = api.get_ranking(RankingWindow::Total).await.unwrap();
    let ids: Vec<_> = ranking.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn test_logout_clears_token() {
    let server = MockServer::start().await;
    let (api, storage) = logged_in(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    api.logout().await;
    assert!(!api.session().is_authenticated());
    api.get_students().await.unwrap();

    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), None);
    let requests = server.received_requests().await.unwrap();
    let last = requests.last().unwrap();
    assert!(!last.headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_unauthorized_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (api, _) = common::http_api(&base_url(&server), 2_000);
    let err = api.get_students().await.unwrap_err();

    assert_eq!(err.status(), 401);
    assert!(err.requires_reauthentication());
    assert!(err.user_message().contains("session has expired"));
}

#[tokio::test]
async fn test_rejected_payload_message_is_surfaced() {
    let server = MockServer::start().await;
    let (api, _) = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": ["email already registered"]
        })))
        .mount(&server)
        .await;

    let err = api.create_student(common::fake_student()).await.unwrap_err();

    assert!(matches!(err, ApiError::Rejected { status: 422, .. }));
    assert_eq!(err.user_message(), "email already registered");
    assert_eq!(
        err.payload().unwrap()["message"][0],
        "email already registered"
    );
}

#[tokio::test]
async fn test_server_error_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/achievements"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let (api, _) = common::http_api(&base_url(&server), 2_000);
    let err = api.get_achievements(None).await.unwrap_err();

    assert_eq!(err.status(), 503);
    assert!(err.payload().is_none());
    assert!(err.user_message().contains("try again later"));
}

#[tokio::test]
async fn test_timeout_is_distinct() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let (api, _) = common::http_api(&base_url(&server), 50);
    let err = api.get_students().await.unwrap_err();

    assert!(matches!(err, ApiError::Timeout(_)));
    assert_eq!(err.status(), 408);
}

#[tokio::test]
async fn test_connectivity_failure_has_status_zero() {
    let (api, _) = common::http_api("http://127.0.0.1:1/api", 2_000);

    let err = api.get_students().await.unwrap_err();

    assert!(matches!(err, ApiError::Connectivity(_)));
    assert_eq!(err.status(), 0);
    assert_ne!(
        err.user_message(),
        ApiError::Timeout(Duration::from_secs(1)).user_message()
    );
}

#[tokio::test]
async fn test_update_missing_student_returns_none() {
    let server = MockServer::start().await;
    let (api, _) = logged_in(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/api/students/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/students/1"))
        .and(body_json(json!({ "weight": 80.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "name": "João Silva",
            "role": "student",
            "weight": 80.0
        })))
        .mount(&server)
        .await;

    let patch = StudentPatch {
        weight: Some(80.0),
        ..Default::default()
    };
    assert!(api
        .update_student("404", patch.clone())
        .await
        .unwrap()
        .is_none());

    let updated = api.update_student("1", patch).await.unwrap().unwrap();
    assert_eq!(updated.weight, Some(80.0));
    assert_eq!(updated.age, 18);
}

#[tokio::test]
async fn test_training_round_trip() {
    let server = MockServer::start().await;
    let (api, _) = logged_in(&server).await;
    let plans = vec![
        common::sample_plan(PlanSlot::A, "Peito"),
        common::sample_plan(PlanSlot::B, "Costas"),
    ];
    let body = serde_json::to_value(&plans).unwrap();
    Mock::given(method("POST"))
        .and(path("/api/training/1"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/training/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    assert_eq!(api.save_training("1", plans.clone()).await.unwrap(), plans);
    assert_eq!(api.get_training("1").await.unwrap(), plans);
}

#[tokio::test]
async fn test_workouts_are_scoped_by_student() {
    let server = MockServer::start().await;
    let (api, _) = logged_in(&server).await;
    let plans = vec![common::sample_plan(PlanSlot::A, "Peito")];
    Mock::given(method("GET"))
        .and(path("/api/workouts"))
        .and(query_param("studentId", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&plans))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(api.get_workouts(Some("7")).await.unwrap(), plans);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (api, _) = common::http_api(&base_url(&server), 2_000);

    let err = api.login("not-an-email", "secret").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let duplicated = vec![
        common::sample_plan(PlanSlot::A, "Peito"),
        common::sample_plan(PlanSlot::A, "Costas"),
    ];
    let err = api.save_training("1", duplicated).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_malformed_success_body_is_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/students/2/medical-info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let (api, _) = common::http_api(&base_url(&server), 2_000);
    let err = api.get_medical_info("2").await.unwrap_err();

    assert!(matches!(err, ApiError::Unexpected(_)));
    assert_eq!(err.status(), 0);
}
