// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handler-level integration tests against a real SQLite store.
//!
//! Each test builds an isolated state with a temp database and drives the
//! axum handlers directly, asserting on status codes and response bodies.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use tokio::sync::mpsc;

use fixline_assignment::AssignmentService;
use fixline_config::model::StorageConfig;
use fixline_core::events::ServerEvent;
use fixline_core::types::Identity;
use fixline_gateway::auth::AuthConfig;
use fixline_gateway::handlers::{
    self, CreateReportRequest, PatchReportRequest, RegisterWorkerRequest,
};
use fixline_gateway::GatewayState;
use fixline_presence::{
    ChannelNotifier, ConnectionId, ConnectionRegistry, ConnectionSession, InMemoryRegistry,
    MessageRouter, PresenceHandler,
};
use fixline_storage::SqliteStore;

struct TestApi {
    state: GatewayState,
    registry: Arc<InMemoryRegistry>,
    _dir: tempfile::TempDir,
}

async fn test_api() -> TestApi {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::new(StorageConfig {
        database_path: dir
            .path()
            .join("fixline.db")
            .to_string_lossy()
            .into_owned(),
        wal_mode: true,
    }));
    store.initialize().await.unwrap();

    let registry = InMemoryRegistry::shared();
    let assignments = Arc::new(AssignmentService::new(
        store.clone(),
        store.clone(),
        ChannelNotifier::new(registry.clone()),
    ));

    let state = GatewayState {
        store: store.clone(),
        directory: store,
        assignments,
        presence: PresenceHandler::new(registry.clone()),
        router: MessageRouter::new(registry.clone()),
        registry: registry.clone(),
        auth: AuthConfig { bearer_token: None },
        started_at: std::time::Instant::now(),
    };
    TestApi {
        state,
        registry,
        _dir: dir,
    }
}

async fn body_json(response: Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn report_request(reporter: &str) -> CreateReportRequest {
    CreateReportRequest {
        reporter: reporter.to_string(),
        category: "plumbing".to_string(),
        label: "leaking pipe".to_string(),
        address: "12 Harbor St".to_string(),
        phone: "555-0100".to_string(),
    }
}

async fn create_report(api: &TestApi, reporter: &str) -> String {
    let response =
        handlers::create_report(State(api.state.clone()), Json(report_request(reporter))).await;
    let (status, body) = body_json(response).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn patch(api: &TestApi, id: &str, status: &str, assigned_to: Option<&str>) -> Response {
    let request = PatchReportRequest {
        status: status.parse().unwrap(),
        assigned_to: assigned_to.map(str::to_string),
    };
    handlers::patch_report(
        State(api.state.clone()),
        Path(id.to_string()),
        Json(request),
    )
    .await
}

fn connect(api: &TestApi, who: &str) -> mpsc::Receiver<ServerEvent> {
    let (tx, rx) = mpsc::channel(8);
    api.registry.register(
        Identity::parse(who).unwrap(),
        ConnectionSession::new(ConnectionId::new(), tx),
    );
    rx
}

#[tokio::test]
async fn health_reports_ok() {
    let api = test_api().await;
    let response = handlers::get_health(State(api.state.clone())).await;
    assert_eq!(response.0.status, "ok");
}

#[tokio::test]
async fn created_report_appears_in_listing() {
    let api = test_api().await;
    let id = create_report(&api, "alice@x.com").await;

    let (status, body) = body_json(handlers::list_reports(State(api.state.clone())).await).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());
    assert_eq!(listed[0]["status"], "unassigned");
}

#[tokio::test]
async fn malformed_reporter_email_is_rejected() {
    let api = test_api().await;
    let response =
        handlers::create_report(State(api.state.clone()), Json(report_request("not-an-email")))
            .await;
    let (status, body) = body_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_request");
}

#[tokio::test]
async fn accept_transitions_and_notifies_connected_reporter() {
    let api = test_api().await;
    let id = create_report(&api, "alice@x.com").await;
    let mut rx_reporter = connect(&api, "alice@x.com");

    let (status, body) = body_json(patch(&api, &id, "in_progress", Some("worker@x.com")).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["assigned_to"], "worker@x.com");

    match rx_reporter.recv().await.unwrap() {
        ServerEvent::ChatStarted { with, report_id } => {
            assert_eq!(with, Identity::parse("worker@x.com").unwrap());
            assert_eq!(report_id.0, id);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn accept_resolves_registered_display_name() {
    let api = test_api().await;
    let response = handlers::register_worker(
        State(api.state.clone()),
        Json(RegisterWorkerRequest {
            email: "worker@x.com".to_string(),
            name: "Sam Fixer".to_string(),
            field: "plumbing".to_string(),
            phone: "555-0101".to_string(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let id = create_report(&api, "alice@x.com").await;
    let (status, body) = body_json(patch(&api, &id, "in_progress", Some("Sam Fixer")).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assigned_to"], "worker@x.com");

    // Listing shows the resolved display name alongside the identity.
    let (_, listing) = body_json(handlers::list_reports(State(api.state.clone())).await).await;
    assert_eq!(listing[0]["assigned_to_name"], "Sam Fixer");
}

#[tokio::test]
async fn accept_with_unknown_display_name_is_404_worker_not_found() {
    let api = test_api().await;
    let id = create_report(&api, "alice@x.com").await;

    let (status, body) = body_json(patch(&api, &id, "in_progress", Some("Nobody")).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "worker_not_found");
}

#[tokio::test]
async fn second_accept_is_409_invalid_transition() {
    let api = test_api().await;
    let id = create_report(&api, "alice@x.com").await;

    patch(&api, &id, "in_progress", Some("first@x.com")).await;
    let (status, body) = body_json(patch(&api, &id, "in_progress", Some("second@x.com")).await).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "invalid_transition");
}

#[tokio::test]
async fn unknown_report_is_404_not_found() {
    let api = test_api().await;
    let (status, body) =
        body_json(patch(&api, "missing", "in_progress", Some("worker@x.com")).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn full_lifecycle_resolves_once() {
    let api = test_api().await;
    let id = create_report(&api, "alice@x.com").await;

    patch(&api, &id, "in_progress", Some("worker@x.com")).await;
    let (status, body) = body_json(patch(&api, &id, "resolved", None).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "resolved");

    let (status, body) = body_json(patch(&api, &id, "resolved", None).await).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "invalid_transition");
}

#[tokio::test]
async fn accept_without_assigned_to_is_400() {
    let api = test_api().await;
    let id = create_report(&api, "alice@x.com").await;

    let (status, body) = body_json(patch(&api, &id, "in_progress", None).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_request");
}

#[tokio::test]
async fn assigned_listing_is_scoped_to_the_worker() {
    let api = test_api().await;
    let id = create_report(&api, "alice@x.com").await;
    let _other = create_report(&api, "alice@x.com").await;
    patch(&api, &id, "in_progress", Some("worker@x.com")).await;

    let response = handlers::list_assigned_reports(
        State(api.state.clone()),
        Path("worker@x.com".to_string()),
    )
    .await;
    let (status, body) = body_json(response).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());
}

#[tokio::test]
async fn presence_lists_connected_identities() {
    let api = test_api().await;
    let _rx = connect(&api, "alice@x.com");

    let response = handlers::get_presence(State(api.state.clone())).await;
    assert_eq!(
        response.0.connected,
        vec![Identity::parse("alice@x.com").unwrap()]
    );
}
