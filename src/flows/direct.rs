//! Direct Completion Flow
//!
//! Calls the OpenAI chat completions API directly (no gateway) and
//! reveals the answer. The raw response structure is dumped to the debug
//! log, which is what made this screen useful for diagnosing empty
//! responses.

use serde_json::Value;

use mcp_workbench_core::reveal::RevealPhase;
use mcp_workbench_llm::error::LlmError;
use mcp_workbench_llm::openai::OpenAiClient;

use crate::state::AppState;
use crate::utils::error::AppResult;

use super::{reveal_print, validate_input, FlowOptions};

/// Run one direct completion. Returns the text that was displayed,
/// answer or error message alike.
pub async fn run_direct(
    state: &mut AppState,
    prompt: &str,
    model: &str,
    opts: &FlowOptions,
) -> AppResult<String> {
    let api_key = validate_input(state, prompt)?;
    let prompt = prompt.trim().to_string();

    state.reset_run();
    state.push_user_message(&prompt);
    state.set_phase(RevealPhase::Submitting);
    state.debug("GPT 스트리밍 시작 (직접 OpenAI API 호출)");

    let client = OpenAiClient::new(model);
    state.set_phase(RevealPhase::AwaitingResponse);

    match client.complete(&prompt, &api_key).await {
        Ok(completion) => {
            log_response_shape(state, &completion.raw);
            state.set_phase(RevealPhase::Revealing);
            reveal_print(&completion.content, opts.reveal_delay).await;
            state.debug(format!(
                "GPT 스트리밍 완료 - {}자",
                completion.content.chars().count()
            ));
            state.set_phase(RevealPhase::Done);
            state.push_assistant_message(&completion.content);
            Ok(completion.content)
        }
        Err(err) => {
            state.debug(format!("GPT 스트리밍 에러: {}", err));
            state.set_phase(RevealPhase::Error);
            let message = match err {
                LlmError::Upstream(detail) => format!("OpenAI API 에러: {}", detail),
                other => other.user_message(),
            };
            println!("{}", message);
            Ok(message)
        }
    }
}

/// Dump the top-level structure of a response body into the debug log:
/// key count, key list, and a short typed preview per key.
fn log_response_shape(state: &mut AppState, raw: &Value) {
    state.debug("응답 구조 분석 시작:");

    let Some(map) = raw.as_object() else {
        state.debug(format!("- 값: {}", preview(raw)));
        return;
    };

    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    state.debug(format!("- 키 개수: {}", keys.len()));
    state.debug(format!("- 키 목록: [{}]", keys.join(", ")));

    for (key, value) in map {
        state.debug(format!("  - {}: {} = {}", key, type_name(value), preview(value)));
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn preview(value: &Value) -> String {
    let rendered = match value {
        Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    };
    if rendered.chars().count() > 100 {
        let clipped: String = rendered.chars().take(100).collect();
        format!("{}...", clipped)
    } else {
        rendered
    }
}
