//! Gateway Client
//!
//! Client for the gateway backend's `/ask` endpoint in its three modes:
//! default (the gateway drives tool selection and execution itself),
//! `2step` (planner call returning a tool-call plan), and `worker`
//! (final synthesis from accumulated tool results).

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use mcp_workbench_core::record::McpResultEntry;

use crate::error::{LlmError, LlmResult};
use crate::http_client::build_http_client;

/// Default gateway endpoint.
pub const GATEWAY_URL: &str = "http://localhost:9000";

/// Model requested for planner calls.
pub const PLANNER_MODEL: &str = "gpt-5-mini";

/// Placeholder shown when the worker returns neither `answer` nor
/// `worker_response`.
pub const EMPTY_WORKER_ANSWER: &str = "Worker 응답이 비어있습니다.";

/// Response shape of `/ask`. Every field is optional on the wire; the
/// caller decides which ones a given mode requires.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
    /// Gateway-level error; the gateway sends either a string or an object
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub mode: Option<String>,
    /// Raw tool-call values; alias normalization happens in the interpreter
    #[serde(default)]
    pub tool_calls: Option<Vec<Value>>,
    #[serde(default)]
    pub planner_response: Option<String>,
    #[serde(default)]
    pub worker_response: Option<String>,
    #[serde(default)]
    pub tools_used: Vec<String>,
    #[serde(default)]
    pub mcp_calls: Vec<GatewayCall>,
}

impl AskResponse {
    /// The gateway-level error rendered as text, if present.
    pub fn error_text(&self) -> Option<String> {
        self.error.as_ref().map(|e| match e.as_str() {
            Some(s) => s.to_string(),
            None => e.to_string(),
        })
    }
}

/// A tool invocation the gateway already executed on its side.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayCall {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub args: Value,
    #[serde(default)]
    pub response: Value,
    #[serde(default)]
    pub status: Option<String>,
}

/// Client for the gateway backend.
pub struct GatewayClient {
    base_url: String,
    client: reqwest::Client,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: build_http_client(),
        }
    }

    fn ask_url(&self) -> String {
        format!("{}/ask", self.base_url.trim_end_matches('/'))
    }

    /// Integrated ask: one request, the gateway runs its own tool loop.
    pub async fn ask(&self, question: &str, api_key: &str) -> LlmResult<AskResponse> {
        let body = json!({
            "question": question,
            "api_key": api_key,
        });
        self.post_ask(&body).await
    }

    /// Planner call: `2step` mode, forcing the tool-plan function so the
    /// model returns a `tool_calls` array.
    pub async fn plan(&self, planner_prompt: &str, api_key: &str) -> LlmResult<AskResponse> {
        let body = plan_request_body(planner_prompt, api_key);
        self.post_ask(&body).await
    }

    /// Worker call: synthesize the final answer from the accumulated tool
    /// results.
    pub async fn worker(
        &self,
        question: &str,
        api_key: &str,
        mcp_results: &[McpResultEntry],
    ) -> LlmResult<AskResponse> {
        let body = json!({
            "question": question,
            "api_key": api_key,
            "mode": "worker",
            "mcp_results": mcp_results,
        });
        self.post_ask(&body).await
    }

    async fn post_ask(&self, body: &Value) -> LlmResult<AskResponse> {
        let url = self.ask_url();
        debug!(url = %url, "posting /ask request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(LlmError::from_reqwest)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(LlmError::from_reqwest)?;
        debug!(status, bytes = text.len(), "/ask response received");

        if !(200..300).contains(&status) {
            return Err(LlmError::Http { status, body: text });
        }

        serde_json::from_str(&text).map_err(|e| LlmError::Parse(e.to_string()))
    }
}

/// Build the planner request body: `2step` mode with JSON output forced
/// through the `execute_mcp_tools` function schema.
fn plan_request_body(planner_prompt: &str, api_key: &str) -> Value {
    json!({
        "question": planner_prompt,
        "api_key": api_key,
        "mode": "2step",
        "model": PLANNER_MODEL,
        "response_format": "json_object",
        "functions": [plan_function_schema()],
        "function_call": { "name": "execute_mcp_tools" },
    })
}

/// JSON schema of the function the planner is forced to call.
fn plan_function_schema() -> Value {
    json!({
        "name": "execute_mcp_tools",
        "description": "실행할 MCP 도구들의 계획을 JSON 형태로 반환",
        "parameters": {
            "type": "object",
            "required": ["tool_calls"],
            "properties": {
                "tool_calls": {
                    "type": "array",
                    "description": "실행할 MCP 도구들의 목록",
                    "items": {
                        "type": "object",
                        "required": ["tool_name", "parameters"],
                        "properties": {
                            "tool_name": {
                                "type": "string",
                                "description": "실행할 MCP 도구의 이름"
                            },
                            "parameters": {
                                "type": "object",
                                "description": "도구 실행에 필요한 파라미터들"
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Extract the worker's displayable answer: `answer`, then
/// `worker_response`, then the fixed placeholder.
pub fn worker_answer(response: &AskResponse) -> String {
    response
        .answer
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(response.worker_response.as_deref())
        .unwrap_or(EMPTY_WORKER_ANSWER)
        .to_string()
}
