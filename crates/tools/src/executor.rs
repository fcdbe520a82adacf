//! Sequential Tool Executor
//!
//! Executes a planned list of tool calls against the MCP server's
//! `/mcp/call` endpoint, strictly in order: call N+1 is not issued until
//! call N's outcome has been recorded. Every attempt produces one display
//! record; a failed call does not stop the remaining calls. There are no
//! retries, no timeouts, and no cancellation.

use serde_json::{json, Value};
use tracing::warn;

use mcp_workbench_core::debug_log::DebugLog;
use mcp_workbench_core::record::{McpResultEntry, ToolCallRecord};
use mcp_workbench_llm::error::LlmError;
use mcp_workbench_llm::http_client::build_http_client;

use crate::planner::PlannedCall;

/// Namespace prefix stripped from planner tool names before dispatch.
pub const TOOL_NAMESPACE: &str = "functions.";

/// Tool that receives the ambient GitHub credentials.
const GITHUB_TOOL: &str = "github_repository_info";

/// Ambient credentials injected into known tools' parameter sets.
#[derive(Debug, Clone, Default)]
pub struct ToolCredentials {
    pub github_username: String,
    pub github_token: String,
}

/// Result of executing a full plan.
#[derive(Debug, Default)]
pub struct ExecutionOutcome {
    /// Per-attempt display records, newest first
    pub records: Vec<ToolCallRecord>,
    /// Results in execution order, as forwarded to the worker
    pub results: Vec<McpResultEntry>,
}

/// Executor for the MCP server's tool endpoint.
pub struct ToolExecutor {
    base_url: String,
    credentials: ToolCredentials,
    client: reqwest::Client,
}

impl ToolExecutor {
    pub fn new(base_url: impl Into<String>, credentials: ToolCredentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            client: build_http_client(),
        }
    }

    fn call_url(&self) -> String {
        format!("{}/mcp/call", self.base_url.trim_end_matches('/'))
    }

    /// Execute the planned calls strictly in order.
    pub async fn execute(&self, calls: &[PlannedCall], log: &mut DebugLog) -> ExecutionOutcome {
        let mut outcome = ExecutionOutcome::default();
        log.push(format!("MCP 도구 실행 시작 - {}개 도구", calls.len()));

        for call in calls {
            let clean_name = call
                .tool_name
                .strip_prefix(TOOL_NAMESPACE)
                .unwrap_or(&call.tool_name);
            let args = self.inject_credentials(clean_name, call.parameters.clone(), log);
            log.push(format!("MCP 도구 실행: {} → {}", call.tool_name, clean_name));

            match self.call_tool(clean_name, &args).await {
                Ok(body) => {
                    log.push(format!("MCP 도구 실행 성공: {}", call.tool_name));
                    outcome.records.insert(
                        0,
                        ToolCallRecord::completed(clean_name, args.clone(), body.clone()),
                    );
                    outcome.results.push(McpResultEntry {
                        tool: call.tool_name.clone(),
                        args,
                        result: body,
                    });
                }
                Err(failure) => {
                    warn!(tool = %clean_name, detail = %failure.detail, "tool call failed");
                    log.push(format!(
                        "MCP 도구 실행 실패: {} - {}",
                        call.tool_name, failure.detail
                    ));
                    outcome.records.insert(
                        0,
                        ToolCallRecord::failed(clean_name, args.clone(), failure.detail),
                    );
                    outcome.results.push(McpResultEntry {
                        tool: call.tool_name.clone(),
                        args,
                        result: json!({ "error": failure.summary }),
                    });
                }
            }
        }

        outcome
    }

    fn inject_credentials(&self, clean_name: &str, params: Value, log: &mut DebugLog) -> Value {
        if clean_name != GITHUB_TOOL {
            return params;
        }

        let mut map = match params {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        map.insert(
            "username".to_string(),
            json!(self.credentials.github_username),
        );
        map.insert("password".to_string(), json!(self.credentials.github_token));

        log.push(format!(
            "GitHub 도구 - 사용자명: {}, 토큰: {}",
            self.credentials.github_username,
            if self.credentials.github_token.is_empty() {
                "설정되지 않음"
            } else {
                "설정됨"
            }
        ));

        Value::Object(map)
    }

    async fn call_tool(&self, tool: &str, args: &Value) -> Result<Value, ToolCallFailure> {
        let response = self
            .client
            .post(self.call_url())
            .header("Content-Type", "application/json")
            .json(&json!({ "tool": tool, "arguments": args }))
            .send()
            .await
            .map_err(|e| ToolCallFailure::transport(LlmError::from_reqwest(e)))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ToolCallFailure::transport(LlmError::from_reqwest(e)))?;

        if !(200..300).contains(&status) {
            return Err(ToolCallFailure {
                detail: format!("HTTP {}: {}", status, text),
                summary: format!("HTTP {}", status),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            let message = format!("응답 파싱 실패: {}", e);
            ToolCallFailure {
                detail: message.clone(),
                summary: message,
            }
        })
    }
}

/// A failed attempt: the full detail goes to the display record, the
/// summary to the worker's result list.
struct ToolCallFailure {
    detail: String,
    summary: String,
}

impl ToolCallFailure {
    fn transport(err: LlmError) -> Self {
        let message = err.user_message();
        Self {
            detail: message.clone(),
            summary: message,
        }
    }
}
