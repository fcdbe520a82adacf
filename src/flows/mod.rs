//! Flow Drivers
//!
//! One module per workbench screen: the two-phase planner/worker flow,
//! the integrated gateway ask, the direct OpenAI completion, and the
//! interface-backend API tests. Shared helpers (input validation, the
//! stdout reveal printer, gateway record conversion) live here.

use std::io::Write;
use std::time::Duration;

use mcp_workbench_core::record::{self, CallStatus, ToolCallRecord};
use mcp_workbench_core::reveal::{self, REVEAL_DELAY};
use mcp_workbench_llm::gateway::GatewayCall;
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub mod direct;
pub mod integrated;
pub mod two_step;

/// Minimum plausible API key length; shorter keys are rejected before
/// any network call is made.
pub const MIN_API_KEY_LEN: usize = 10;

/// Message shown when the key fails validation.
pub const INVALID_KEY_MESSAGE: &str =
    "API 키가 유효하지 않습니다. 올바른 OpenAI API 키를 입력해주세요.";

/// Options shared by the flow drivers.
#[derive(Debug, Clone)]
pub struct FlowOptions {
    /// Pause between revealed characters
    pub reveal_delay: Duration,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            reveal_delay: REVEAL_DELAY,
        }
    }
}

/// Validate the question and the configured key before any network call.
/// Returns the trimmed key.
pub(crate) fn validate_input(state: &mut AppState, question: &str) -> AppResult<String> {
    if question.trim().is_empty() {
        return Err(AppError::validation("질문을 입력해주세요."));
    }

    let api_key = state.config.api_key.trim().to_string();
    if api_key.len() < MIN_API_KEY_LEN {
        state.debug(format!("API 키가 너무 짧습니다: {}자", api_key.len()));
        return Err(AppError::validation(INVALID_KEY_MESSAGE));
    }

    Ok(api_key)
}

/// Reveal `text` on stdout one character at a time.
pub(crate) async fn reveal_print(text: &str, delay: Duration) {
    let mut shown = 0;
    reveal::reveal(text, delay, |prefix| {
        print!("{}", &prefix[shown..]);
        let _ = std::io::stdout().flush();
        shown = prefix.len();
    })
    .await;
    println!();
}

/// Convert gateway-side call entries into display records, stamping a
/// fresh timestamp the way the display does.
pub(crate) fn records_from_gateway(calls: Vec<GatewayCall>) -> Vec<ToolCallRecord> {
    calls
        .into_iter()
        .map(|call| {
            let status = match call.status.as_deref() {
                Some("error") => CallStatus::Error,
                Some("loading") => CallStatus::Loading,
                Some(_) => CallStatus::Success,
                None => record::status_for(&call.response),
            };
            ToolCallRecord {
                id: call.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                action: call.action,
                args: call.args,
                response: call.response,
                timestamp: record::now_timestamp(),
                status,
            }
        })
        .collect()
}
