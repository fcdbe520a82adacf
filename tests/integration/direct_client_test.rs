//! Direct Completion Client Integration Tests
//!
//! Runs the OpenAI client against a mock completions endpoint and checks
//! the request shape, the content extraction, and the error mapping.

use std::sync::Arc;

use serde_json::json;

use mcp_workbench_llm::error::LlmError;
use mcp_workbench_llm::openai::OpenAiClient;

use crate::support::MockServer;

#[tokio::test]
async fn test_complete_sends_non_streaming_single_turn() {
    let server = MockServer::start(Arc::new(|_path, _body| {
        (
            200,
            json!({ "choices": [{"message": {"content": "안녕하세요!"}}] }).to_string(),
        )
    }))
    .await;

    let client = OpenAiClient::with_base_url(server.url(), "gpt-5-mini");
    let completion = client.complete("인사해줘", "sk-test").await.unwrap();

    assert_eq!(completion.content, "안녕하세요!");

    let request = &server.requests()[0];
    assert_eq!(request.body["model"], "gpt-5-mini");
    assert_eq!(request.body["stream"], false);
    assert_eq!(request.body["messages"][0]["role"], "user");
    assert_eq!(request.body["messages"][0]["content"], "인사해줘");
}

#[tokio::test]
async fn test_empty_content_reports_empty() {
    let server = MockServer::start(Arc::new(|_path, _body| {
        (
            200,
            json!({ "choices": [{"message": {"content": "   "}}] }).to_string(),
        )
    }))
    .await;

    let client = OpenAiClient::with_base_url(server.url(), "gpt-5-mini");
    let err = client.complete("질문", "sk-test").await.unwrap_err();
    assert!(matches!(err, LlmError::Empty));
}

#[tokio::test]
async fn test_embedded_error_reports_upstream() {
    let server = MockServer::start(Arc::new(|_path, _body| {
        (
            200,
            json!({
                "choices": [],
                "error": {"message": "quota exceeded", "type": "insufficient_quota"}
            })
            .to_string(),
        )
    }))
    .await;

    let client = OpenAiClient::with_base_url(server.url(), "gpt-5-mini");
    let err = client.complete("질문", "sk-test").await.unwrap_err();
    match err {
        LlmError::Upstream(detail) => assert_eq!(detail, "quota exceeded"),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_http_401_maps_to_key_message() {
    let server = MockServer::start(Arc::new(|_path, _body| {
        (401, json!({ "error": "invalid key" }).to_string())
    }))
    .await;

    let client = OpenAiClient::with_base_url(server.url(), "gpt-5-mini");
    let err = client.complete("질문", "sk-bad").await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "API 키가 유효하지 않습니다. API 키를 확인해주세요."
    );
}
