//! Tool Schema Client
//!
//! Fetches the tool schemas the MCP server exposes on its REST listing
//! and renders them as prompt text for the planner. The fetch is
//! best-effort: the gateway holds its own copy of the schemas, so a
//! failure here only degrades the planner prompt.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use mcp_workbench_llm::error::{LlmError, LlmResult};
use mcp_workbench_llm::http_client::build_http_client;

/// Default MCP server endpoint.
pub const MCP_URL: &str = "http://localhost:9001";

/// One tool schema entry as served by `GET /mcp/tools`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub function: ToolFunction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolFunction {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Value,
}

/// Client for the MCP server's schema listing.
pub struct SchemaClient {
    base_url: String,
    client: reqwest::Client,
}

impl SchemaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: build_http_client(),
        }
    }

    fn tools_url(&self) -> String {
        format!("{}/mcp/tools", self.base_url.trim_end_matches('/'))
    }

    /// GET the tool schema listing.
    pub async fn list_tools(&self) -> LlmResult<Vec<ToolSchema>> {
        let url = self.tools_url();
        debug!(url = %url, "fetching tool schemas");

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(LlmError::from_reqwest)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(LlmError::from_reqwest)?;

        if !(200..300).contains(&status) {
            return Err(LlmError::Http { status, body: text });
        }

        serde_json::from_str(&text).map_err(|e| LlmError::Parse(e.to_string()))
    }
}

/// Render the fetched schemas as a numbered text block for the planner
/// prompt.
pub fn render_tool_descriptions(tools: &[ToolSchema]) -> String {
    let mut out = String::new();
    for (index, tool) in tools.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} - {}\n",
            index + 1,
            tool.function.name,
            tool.function.description
        ));
        if let Some(props) = tool
            .function
            .parameters
            .get("properties")
            .and_then(Value::as_object)
        {
            if !props.is_empty() {
                let names: Vec<&str> = props.keys().map(String::as_str).collect();
                out.push_str(&format!("   파라미터: {}\n", names.join(", ")));
            }
        }
    }
    out
}
