//! Tool Executor Integration Tests
//!
//! Runs the sequential executor against a mock MCP server and verifies
//! the ordering invariant, the per-attempt records, the namespace
//! stripping, and the credential injection.

use std::sync::Arc;

use serde_json::json;

use mcp_workbench_core::debug_log::DebugLog;
use mcp_workbench_core::record::CallStatus;
use mcp_workbench_tools::executor::{ToolCredentials, ToolExecutor};
use mcp_workbench_tools::planner::PlannedCall;

use crate::support::MockServer;

fn planned(tool_name: &str, parameters: serde_json::Value) -> PlannedCall {
    PlannedCall {
        tool_name: tool_name.to_string(),
        parameters,
    }
}

#[tokio::test]
async fn test_sequential_execution_order_and_records() {
    let server = MockServer::start(Arc::new(|_path, body| {
        let tool = body["tool"].as_str().unwrap_or("").to_string();
        (200, json!({ "data": format!("result for {}", tool) }).to_string())
    }))
    .await;

    let executor = ToolExecutor::new(server.url(), ToolCredentials::default());
    let mut log = DebugLog::new();

    let calls = vec![
        planned("functions.read_pdf", json!({"filename": "a.pdf"})),
        planned("functions.query_database", json!({"table": "users"})),
        planned("functions.system_health", json!({})),
    ];

    let outcome = executor.execute(&calls, &mut log).await;

    // One request per call, issued strictly in plan order
    let requests = server.requests_to("/mcp/call");
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].body["tool"], "read_pdf");
    assert_eq!(requests[1].body["tool"], "query_database");
    assert_eq!(requests[2].body["tool"], "system_health");

    // Records are newest-first; results keep execution order
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.records[0].action, "system_health");
    assert_eq!(outcome.records[2].action, "read_pdf");
    assert!(outcome
        .records
        .iter()
        .all(|r| r.status == CallStatus::Success));

    assert_eq!(outcome.results.len(), 3);
    assert_eq!(outcome.results[0].tool, "functions.read_pdf");
    assert_eq!(outcome.results[2].tool, "functions.system_health");
}

#[tokio::test]
async fn test_error_field_marks_call_failed_without_stopping() {
    let server = MockServer::start(Arc::new(|_path, body| {
        if body["tool"] == "query_database" {
            (200, json!({ "error": "no such table" }).to_string())
        } else {
            (200, json!({ "data": "ok" }).to_string())
        }
    }))
    .await;

    let executor = ToolExecutor::new(server.url(), ToolCredentials::default());
    let mut log = DebugLog::new();

    let calls = vec![
        planned("functions.query_database", json!({"table": "nope"})),
        planned("functions.system_health", json!({})),
    ];

    let outcome = executor.execute(&calls, &mut log).await;

    // Both attempts were made
    assert_eq!(server.requests_to("/mcp/call").len(), 2);
    assert_eq!(outcome.records.len(), 2);

    // Newest-first: health succeeded, database failed on the error field
    assert_eq!(outcome.records[0].action, "system_health");
    assert_eq!(outcome.records[0].status, CallStatus::Success);
    assert_eq!(outcome.records[1].action, "query_database");
    assert_eq!(outcome.records[1].status, CallStatus::Error);

    // The worker still receives both results
    assert_eq!(outcome.results[0].result["error"], "no such table");
    assert_eq!(outcome.results[1].result["data"], "ok");
}

#[tokio::test]
async fn test_http_error_captures_status_and_body() {
    let server = MockServer::start(Arc::new(|_path, _body| {
        (500, "internal failure".to_string())
    }))
    .await;

    let executor = ToolExecutor::new(server.url(), ToolCredentials::default());
    let mut log = DebugLog::new();

    let outcome = executor
        .execute(&[planned("functions.system_health", json!({}))], &mut log)
        .await;

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].status, CallStatus::Error);
    let detail = outcome.records[0].response["error"].as_str().unwrap();
    assert!(detail.contains("HTTP 500"));
    assert!(detail.contains("internal failure"));

    // The worker-facing result carries the short status form
    assert_eq!(outcome.results[0].result["error"], "HTTP 500");
}

#[tokio::test]
async fn test_github_credentials_injected() {
    let server = MockServer::start(Arc::new(|_path, _body| {
        (200, json!({ "data": "file" }).to_string())
    }))
    .await;

    let executor = ToolExecutor::new(
        server.url(),
        ToolCredentials {
            github_username: "dev-user".to_string(),
            github_token: "ghp_secret".to_string(),
        },
    );
    let mut log = DebugLog::new();

    executor
        .execute(
            &[planned(
                "functions.github_repository_info",
                json!({"repository": "org/repo"}),
            )],
            &mut log,
        )
        .await;

    let requests = server.requests_to("/mcp/call");
    assert_eq!(requests[0].body["arguments"]["username"], "dev-user");
    assert_eq!(requests[0].body["arguments"]["password"], "ghp_secret");
    assert_eq!(requests[0].body["arguments"]["repository"], "org/repo");
}

#[tokio::test]
async fn test_missing_parameters_execute_with_empty_object() {
    let server = MockServer::start(Arc::new(|_path, _body| {
        (200, json!({ "status": "healthy" }).to_string())
    }))
    .await;

    let executor = ToolExecutor::new(server.url(), ToolCredentials::default());
    let mut log = DebugLog::new();

    let outcome = executor
        .execute(&[planned("functions.system_health", json!({}))], &mut log)
        .await;

    let requests = server.requests_to("/mcp/call");
    assert_eq!(requests[0].body["arguments"], json!({}));
    assert_eq!(outcome.records[0].status, CallStatus::Success);
}

#[tokio::test]
async fn test_unreachable_server_records_transport_error() {
    // Nothing listens on this port
    let executor = ToolExecutor::new("http://127.0.0.1:9", ToolCredentials::default());
    let mut log = DebugLog::new();

    let outcome = executor
        .execute(&[planned("functions.system_health", json!({}))], &mut log)
        .await;

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].status, CallStatus::Error);
    let detail = outcome.records[0].response["error"].as_str().unwrap();
    assert!(detail.contains("연결"));
}
