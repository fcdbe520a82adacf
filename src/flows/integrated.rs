//! Integrated Ask Flow
//!
//! One request to the gateway's `/ask` endpoint in its default mode: the
//! gateway registers the MCP tools with the model, runs the tool loop on
//! its side, and returns the final answer together with the call records
//! it produced.

use mcp_workbench_core::reveal::RevealPhase;
use mcp_workbench_llm::gateway::GatewayClient;

use crate::state::AppState;
use crate::utils::error::AppResult;

use super::{records_from_gateway, reveal_print, validate_input, FlowOptions};

/// Message shown when the gateway answers 2xx with no answer text.
const EMPTY_ANSWER_MESSAGE: &str =
    "Gateway Backend에서 응답을 받았지만 내용이 비어있습니다. 다시 시도해주세요.";

/// What the flow displayed, returned for inspection.
#[derive(Debug, Default)]
pub struct IntegratedOutcome {
    pub answer: String,
    pub tools_used: Vec<String>,
}

/// Run one integrated ask.
pub async fn run_integrated(
    state: &mut AppState,
    question: &str,
    opts: &FlowOptions,
) -> AppResult<IntegratedOutcome> {
    let api_key = validate_input(state, question)?;
    let question = question.trim().to_string();

    state.reset_run();
    state.push_user_message(&question);
    state.set_phase(RevealPhase::Submitting);
    state.debug("MCP 통합 호출 시작 (AI + MCP 자동 연동)");

    let gateway = GatewayClient::new(state.config.gateway_url.clone());
    state.set_phase(RevealPhase::AwaitingResponse);

    let response = match gateway.ask(&question, &api_key).await {
        Ok(response) => response,
        Err(err) => {
            state.debug(format!("MCP 통합 에러: {}", err));
            state.set_phase(RevealPhase::Error);
            let message = err.user_message();
            println!("{}", message);
            return Ok(IntegratedOutcome {
                answer: message,
                tools_used: Vec::new(),
            });
        }
    };

    if let Some(error) = response.error_text() {
        state.debug(format!("Gateway Backend 에러 응답 감지: {}", error));
        state.set_phase(RevealPhase::Error);
        let message = format!("Gateway Backend 에러: {}", error);
        println!("{}", message);
        return Ok(IntegratedOutcome {
            answer: message,
            tools_used: Vec::new(),
        });
    }

    let answer = match response
        .answer
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(answer) => answer.to_string(),
        None => {
            state.set_phase(RevealPhase::Error);
            println!("{}", EMPTY_ANSWER_MESSAGE);
            return Ok(IntegratedOutcome {
                answer: EMPTY_ANSWER_MESSAGE.to_string(),
                tools_used: Vec::new(),
            });
        }
    };

    state.debug(format!("사용된 도구: {}", response.tools_used.join(", ")));
    state.debug(format!("MCP 호출 수: {}개", response.mcp_calls.len()));

    if response.mcp_calls.is_empty() {
        state.debug("MCP 호출 내역이 비어있음 - 도구가 호출되지 않았을 가능성");
    } else {
        let records = records_from_gateway(response.mcp_calls.clone());
        state.merge_calls_front(records);
    }

    state.set_phase(RevealPhase::Revealing);
    reveal_print(&answer, opts.reveal_delay).await;
    state.debug(format!("MCP 통합 완료 - {}자", answer.chars().count()));
    state.set_phase(RevealPhase::Done);
    state.push_assistant_message(&answer);

    Ok(IntegratedOutcome {
        answer,
        tools_used: response.tools_used,
    })
}
