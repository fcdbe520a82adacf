//! Plan Interpreter Integration Tests
//!
//! Covers the public interpretation surface end to end: structured
//! round-trips, the prefixed text fragment, and the fail-closed paths.

use serde_json::json;

use mcp_workbench_llm::gateway::AskResponse;
use mcp_workbench_tools::planner::{
    interpret_plan, interpret_plan_text, PlanOutcome, PlannedCall,
};

#[test]
fn test_structured_array_round_trips() {
    let raw = vec![
        json!({"tool_name": "read_pdf", "parameters": {"filename": "백엔드_가이드.pdf"}}),
        json!({"tool_name": "query_database", "parameters": {"table": "users", "filters": {"role": "backend"}}}),
        json!({"tool_name": "system_health", "parameters": {}}),
    ];
    let response = AskResponse {
        mode: Some("2step".to_string()),
        tool_calls: Some(raw.clone()),
        ..Default::default()
    };

    match interpret_plan(&response) {
        PlanOutcome::ToolCalls(calls) => {
            assert_eq!(calls.len(), 3);
            for (call, original) in calls.iter().zip(&raw) {
                assert_eq!(call.tool_name, original["tool_name"].as_str().unwrap());
                assert_eq!(call.parameters, original["parameters"]);
            }
        }
        other => panic!("expected tool calls, got {:?}", other),
    }
}

#[test]
fn test_literal_prefixed_fragment() {
    let outcome = interpret_plan_text("functions.read_pdf - {\"filename\":\"x.pdf\"}");

    assert_eq!(
        outcome,
        PlanOutcome::ToolCalls(vec![PlannedCall {
            tool_name: "functions.read_pdf".to_string(),
            parameters: json!({"filename": "x.pdf"}),
        }])
    );
}

#[test]
fn test_openai_function_shape_normalizes() {
    let response = AskResponse {
        tool_calls: Some(vec![json!({
            "function": {
                "name": "github_repository_info",
                "arguments": "{\"repository\":\"org/repo\"}"
            }
        })]),
        ..Default::default()
    };

    match interpret_plan(&response) {
        PlanOutcome::ToolCalls(calls) => {
            assert_eq!(calls[0].tool_name, "github_repository_info");
            assert_eq!(calls[0].parameters, json!({"repository": "org/repo"}));
        }
        other => panic!("expected tool calls, got {:?}", other),
    }
}

#[test]
fn test_nameless_entries_fail_closed() {
    let response = AskResponse {
        answer: Some("설명만 있는 답변".to_string()),
        tool_calls: Some(vec![json!({"parameters": {"x": 1}})]),
        ..Default::default()
    };

    // All entries unusable: the interpreter falls back to the answer text
    assert_eq!(
        interpret_plan(&response),
        PlanOutcome::FinalAnswer("설명만 있는 답변".to_string())
    );
}
