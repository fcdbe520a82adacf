//! API Backend Flow Integration Tests
//!
//! Exercises the interface-backend test flow against a mock server: the
//! loading-to-terminal record transition, the `ok`-flag status rule, and
//! the API-flavored status messages.

use std::sync::Arc;

use serde_json::json;

use mcp_workbench::flows::api_test::{run_api_test, ApiEndpoint};
use mcp_workbench::state::AppState;
use mcp_workbench::storage::config::AppConfig;
use mcp_workbench_core::record::CallStatus;

use crate::support::MockServer;

fn state_for(api: &MockServer) -> AppState {
    let config = AppConfig {
        api_url: api.url(),
        ..Default::default()
    };
    AppState::new(config)
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let api = MockServer::start(Arc::new(|path, _body| {
        assert_eq!(path, "/api/health");
        (200, json!({ "ok": true, "data": { "status": "healthy" } }).to_string())
    }))
    .await;

    let mut state = state_for(&api);
    let record = run_api_test(&mut state, ApiEndpoint::Health, json!({}))
        .await
        .unwrap();

    assert_eq!(record.action, "health");
    assert_eq!(record.status, CallStatus::Success);
    assert_eq!(record.response["data"]["status"], "healthy");
    assert_eq!(state.calls().len(), 1);
}

#[tokio::test]
async fn test_ok_false_is_an_error() {
    let api = MockServer::start(Arc::new(|_path, _body| {
        (200, json!({ "ok": false, "error": "파일을 찾을 수 없습니다" }).to_string())
    }))
    .await;

    let mut state = state_for(&api);
    let record = run_api_test(
        &mut state,
        ApiEndpoint::Pdf,
        json!({"filename": "missing.pdf"}),
    )
    .await
    .unwrap();

    assert_eq!(record.status, CallStatus::Error);
    assert_eq!(record.args["filename"], "missing.pdf");
}

#[tokio::test]
async fn test_http_500_maps_to_api_message() {
    let api = MockServer::start(Arc::new(|_path, _body| (500, "boom".to_string()))).await;

    let mut state = state_for(&api);
    let record = run_api_test(&mut state, ApiEndpoint::Database, json!({"table": "users"}))
        .await
        .unwrap();

    assert_eq!(record.status, CallStatus::Error);
    assert_eq!(
        record.response["error"].as_str(),
        Some("API 서버 내부 오류가 발생했습니다.")
    );
}

#[tokio::test]
async fn test_http_404_maps_to_endpoint_message() {
    let api = MockServer::start(Arc::new(|_path, _body| (404, "not found".to_string()))).await;

    let mut state = state_for(&api);
    let record = run_api_test(&mut state, ApiEndpoint::Github, json!({}))
        .await
        .unwrap();

    assert_eq!(record.status, CallStatus::Error);
    assert!(record.response["error"]
        .as_str()
        .unwrap()
        .contains("엔드포인트"));
}

#[tokio::test]
async fn test_unreachable_backend_records_connection_message() {
    let mut state = AppState::new(AppConfig {
        api_url: "http://127.0.0.1:9".to_string(),
        ..Default::default()
    });

    let record = run_api_test(&mut state, ApiEndpoint::Health, json!({}))
        .await
        .unwrap();

    assert_eq!(record.status, CallStatus::Error);
    assert!(record.response["error"].as_str().unwrap().contains("연결"));
}
