//! Two-Step Flow
//!
//! The planner/worker orchestration: fetch tool schemas (best effort),
//! ask the gateway for a plan, execute the planned tools sequentially,
//! then hand the accumulated results back to the worker for the final
//! answer. Planning strictly precedes execution, which strictly precedes
//! synthesis; the ordering is enforced by sequential awaits alone, and a
//! stalled call stalls the whole flow.

use mcp_workbench_core::reveal::RevealPhase;
use mcp_workbench_llm::gateway::{worker_answer, GatewayClient};
use mcp_workbench_tools::executor::{ToolCredentials, ToolExecutor};
use mcp_workbench_tools::planner::{build_planner_prompt, interpret_plan, PlanOutcome, PlannedCall};
use mcp_workbench_tools::schema::{render_tool_descriptions, SchemaClient};

use crate::state::AppState;
use crate::utils::error::AppResult;

use super::{records_from_gateway, reveal_print, validate_input, FlowOptions};

/// What the flow displayed, returned for inspection.
#[derive(Debug, Default)]
pub struct TwoStepOutcome {
    pub planner_text: String,
    pub worker_text: Option<String>,
}

/// Run the two-phase flow for one question.
pub async fn run_two_step(
    state: &mut AppState,
    question: &str,
    opts: &FlowOptions,
) -> AppResult<TwoStepOutcome> {
    let api_key = validate_input(state, question)?;
    let question = question.trim().to_string();

    state.reset_run();
    state.push_user_message(&question);
    state.set_phase(RevealPhase::Submitting);
    state.debug("2 STEP 테스트 시작 (Step-by-step 모드)");

    // The schema fetch is best-effort: the gateway holds its own copy of
    // the schemas, so a failure only degrades the planner prompt.
    state.debug("MCP 서버에서 도구 명세 가져오기 시작");
    let schema_client = SchemaClient::new(state.config.mcp_url.clone());
    let descriptions = match schema_client.list_tools().await {
        Ok(tools) => {
            state.debug(format!("MCP 도구 정보 파싱 완료 - {}개 도구", tools.len()));
            render_tool_descriptions(&tools)
        }
        Err(err) => {
            state.debug(format!("MCP 서버 스키마 요청 실패: {}", err));
            String::new()
        }
    };

    let prompt = build_planner_prompt(&question, &descriptions);
    let gateway = GatewayClient::new(state.config.gateway_url.clone());

    state.set_phase(RevealPhase::AwaitingResponse);
    state.debug("Gateway Backend /ask 요청 (2 STEP)");
    let response = match gateway.plan(&prompt, &api_key).await {
        Ok(response) => response,
        Err(err) => {
            state.debug(format!("2 STEP 테스트 에러: {}", err));
            state.set_phase(RevealPhase::Error);
            let message = err.user_message();
            println!("{}", message);
            return Ok(TwoStepOutcome {
                planner_text: message,
                worker_text: None,
            });
        }
    };

    if let Some(error) = response.error_text() {
        state.debug(format!("Gateway Backend 에러 응답 감지: {}", error));
        state.set_phase(RevealPhase::Error);
        let message = format!("Gateway Backend 에러: {}", error);
        println!("{}", message);
        return Ok(TwoStepOutcome {
            planner_text: message,
            worker_text: None,
        });
    }

    // Calls the gateway already executed on its side appear in the
    // history alongside our own.
    if !response.mcp_calls.is_empty() {
        state.debug(format!(
            "기존 MCP 도구 실행 결과 수신 - {}개 도구",
            response.mcp_calls.len()
        ));
        let records = records_from_gateway(response.mcp_calls.clone());
        state.merge_calls_front(records);
    }

    match interpret_plan(&response) {
        PlanOutcome::ToolCalls(calls) => {
            state.debug(format!("tool_calls 감지 - {}개 도구 호출 계획", calls.len()));

            let planner_text = render_plan_text(&calls);
            state.set_phase(RevealPhase::Revealing);
            reveal_print(&planner_text, opts.reveal_delay).await;
            state.debug(format!(
                "Planner 계획 스트리밍 완료 - {}자",
                planner_text.chars().count()
            ));

            let worker_text = execute_and_synthesize(state, &gateway, &question, &api_key, &calls, opts).await;
            state.push_assistant_message(&worker_text);

            Ok(TwoStepOutcome {
                planner_text,
                worker_text: Some(worker_text),
            })
        }
        PlanOutcome::FinalAnswer(text) => {
            state.debug("도구 호출 없이 Planner 응답 수신");
            state.set_phase(RevealPhase::Revealing);
            reveal_print(&text, opts.reveal_delay).await;
            state.set_phase(RevealPhase::Done);
            state.push_assistant_message(&text);

            Ok(TwoStepOutcome {
                planner_text: text,
                worker_text: None,
            })
        }
    }
}

/// Execute the planned calls, then ask the worker for the final answer.
/// Returns the text that was displayed in the worker panel.
async fn execute_and_synthesize(
    state: &mut AppState,
    gateway: &GatewayClient,
    question: &str,
    api_key: &str,
    calls: &[PlannedCall],
    opts: &FlowOptions,
) -> String {
    let executor = ToolExecutor::new(
        state.config.mcp_url.clone(),
        ToolCredentials {
            github_username: state.config.github_username.clone(),
            github_token: state.config.github_token.clone(),
        },
    );

    let execution = executor.execute(calls, state.debug_log_mut()).await;
    state.merge_calls_front(execution.records);

    state.debug("Worker 실행 시작 - MCP 결과와 함께 최종 답변 생성");
    state.set_phase(RevealPhase::AwaitingResponse);

    match gateway.worker(question, api_key, &execution.results).await {
        Ok(worker) => {
            if let Some(error) = worker.error_text() {
                state.debug(format!("Worker 에러 응답 감지: {}", error));
                state.set_phase(RevealPhase::Error);
                let message = format!("Worker 에러: {}", error);
                println!("{}", message);
                return message;
            }

            let answer = worker_answer(&worker);
            state.set_phase(RevealPhase::Revealing);
            reveal_print(&answer, opts.reveal_delay).await;
            state.debug(format!(
                "Worker 최종 답변 스트리밍 완료 - {}자",
                answer.chars().count()
            ));
            state.set_phase(RevealPhase::Done);
            answer
        }
        Err(err) => {
            state.debug(format!("Worker 호출 에러: {}", err));
            state.set_phase(RevealPhase::Error);
            let message = err.user_message();
            println!("{}", message);
            message
        }
    }
}

/// Render the planned calls as the numbered plan text the display
/// reveals before execution starts.
fn render_plan_text(calls: &[PlannedCall]) -> String {
    let lines: Vec<String> = calls
        .iter()
        .enumerate()
        .map(|(index, call)| format!("{}. {} - {}", index + 1, call.tool_name, call.parameters))
        .collect();
    format!("MCP 도구 호출 계획:\n\n{}", lines.join("\n"))
}
