//! Planner Prompt and Plan Interpretation
//!
//! Builds the planning prompt and recovers an ordered tool-call plan from
//! the gateway's planner response, which may carry the plan as a
//! structured field, as a JSON blob embedded in the answer text, or as
//! repeated `functions.<name> - {json}` fragments. Unknown shapes fail
//! closed: unusable entries are skipped, and a response with no
//! recognizable plan is treated as a plain final answer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use mcp_workbench_llm::gateway::AskResponse;

/// Namespace prefix the planner puts on tool names in text fragments.
const TOOL_CALL_PREFIX: &str = "functions.";

/// Answer substituted when the gateway returns no answer text at all.
const EMPTY_PLAN_ANSWER: &str = "응답을 받았지만 내용이 비어있습니다.";

/// One normalized tool call extracted from a planner response.
///
/// The tool name is kept exactly as the planner proposed it (namespace
/// prefix included); the executor strips the prefix at dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedCall {
    pub tool_name: String,
    pub parameters: Value,
}

/// Outcome of interpreting a planner response.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// An ordered list of tool calls to execute.
    ToolCalls(Vec<PlannedCall>),
    /// No recognizable plan; the text is the final answer.
    FinalAnswer(String),
}

/// Build the planning prompt around the user's question, embedding the
/// tool descriptions fetched from the MCP server when available.
pub fn build_planner_prompt(question: &str, tool_descriptions: &str) -> String {
    let mut prompt = String::from(
        "당신은 MCP(Microservice Communication Protocol) 시스템의 Planner입니다. \
         사용자의 질문을 분석하여 필요한 MCP 도구들을 정확한 형식으로 호출하는 계획을 수립해야 합니다.\n\n",
    );

    if !tool_descriptions.is_empty() {
        prompt.push_str("## 사용 가능한 도구\n");
        prompt.push_str(tool_descriptions);
        prompt.push('\n');
    }

    prompt.push_str("## 현재 질문\n");
    prompt.push_str(question);
    prompt.push_str(
        "\n\n위 질문에 답하기 위해 필요한 MCP 도구들을 정확한 tool_calls 형식으로 반환하세요.",
    );
    prompt
}

/// Interpret a gateway response into a plan or a final answer.
///
/// Fallback chain, first match wins:
/// 1. the structured `tool_calls` field;
/// 2. the `planner_response` narration (final answer, no tools);
/// 3. the answer text, scanned for an embedded JSON plan or prefixed
///    fragments (`interpret_plan_text`).
pub fn interpret_plan(response: &AskResponse) -> PlanOutcome {
    if let Some(raw_calls) = &response.tool_calls {
        if !raw_calls.is_empty() {
            let calls = normalize_tool_calls(raw_calls);
            if !calls.is_empty() {
                return PlanOutcome::ToolCalls(calls);
            }
            warn!("structured tool_calls present but none were usable");
        }
    }

    if let Some(text) = response.planner_response.as_deref() {
        if !text.is_empty() {
            return PlanOutcome::FinalAnswer(text.to_string());
        }
    }

    let answer = response
        .answer
        .clone()
        .unwrap_or_else(|| EMPTY_PLAN_ANSWER.to_string());
    interpret_plan_text(&answer)
}

/// Interpret freeform answer text: an embedded JSON object first, then
/// `functions.<name> - {json}` fragments, then the text itself.
pub fn interpret_plan_text(text: &str) -> PlanOutcome {
    if let Some(snippet) = braced_snippet(text) {
        match serde_json::from_str::<Value>(snippet) {
            Ok(value) => {
                if let Some(raw_calls) = value.get("tool_calls").and_then(Value::as_array) {
                    let calls = normalize_tool_calls(raw_calls);
                    if !calls.is_empty() {
                        return PlanOutcome::ToolCalls(calls);
                    }
                }
            }
            Err(err) => debug!(error = %err, "embedded JSON snippet did not parse"),
        }
    }

    let extracted = parse_prefixed_tool_calls(text);
    if !extracted.is_empty() {
        return PlanOutcome::ToolCalls(extracted);
    }

    PlanOutcome::FinalAnswer(text.to_string())
}

/// Normalize a whole array of raw tool-call values, skipping entries
/// without a usable name.
pub fn normalize_tool_calls(raw_calls: &[Value]) -> Vec<PlannedCall> {
    raw_calls
        .iter()
        .filter_map(|raw| {
            let call = normalize_tool_call(raw);
            if call.is_none() {
                warn!(entry = %raw, "tool call entry has no usable name, skipping");
            }
            call
        })
        .collect()
}

/// Normalize one raw tool-call value into a `PlannedCall`.
///
/// The name may arrive as `tool_name`, `tool`, `function.name`, or
/// `name`; the parameters as `parameters`, `function.arguments`, or
/// `arguments` (an object or a JSON-encoded string). A missing name
/// yields `None`; missing or unusable parameters become an empty object.
pub fn normalize_tool_call(raw: &Value) -> Option<PlannedCall> {
    let name = raw
        .get("tool_name")
        .and_then(Value::as_str)
        .or_else(|| raw.get("tool").and_then(Value::as_str))
        .or_else(|| raw.pointer("/function/name").and_then(Value::as_str))
        .or_else(|| raw.get("name").and_then(Value::as_str))?;

    let parameters = raw
        .get("parameters")
        .or_else(|| raw.pointer("/function/arguments"))
        .or_else(|| raw.get("arguments"));

    Some(PlannedCall {
        tool_name: name.to_string(),
        parameters: normalize_parameters(name, parameters),
    })
}

fn normalize_parameters(tool_name: &str, raw: Option<&Value>) -> Value {
    match raw {
        None | Some(Value::Null) => empty_object(),
        Some(value @ Value::Object(_)) => value.clone(),
        // Function-calling APIs deliver arguments as a JSON-encoded string
        Some(Value::String(encoded)) => match serde_json::from_str::<Value>(encoded) {
            Ok(parsed) if parsed.is_object() => parsed,
            _ => {
                warn!(tool = tool_name, "parameter string was not a JSON object");
                empty_object()
            }
        },
        Some(other) => {
            warn!(tool = tool_name, shape = %other, "unknown parameter shape");
            empty_object()
        }
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Greedy `{...}` match: from the first `{` to the last `}` in the text.
fn braced_snippet(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Scan for `functions.<name> - {json}` fragments and parse each
/// occurrence independently.
fn parse_prefixed_tool_calls(text: &str) -> Vec<PlannedCall> {
    let mut calls = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find(TOOL_CALL_PREFIX) {
        let after_prefix = &remaining[start + TOOL_CALL_PREFIX.len()..];
        let name_len = after_prefix
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after_prefix.len());
        if name_len == 0 {
            remaining = after_prefix;
            continue;
        }
        let name = &after_prefix[..name_len];
        let after_name = &after_prefix[name_len..];

        let Some(rest) = after_name.strip_prefix(" - ") else {
            remaining = after_name;
            continue;
        };
        let Some(json_len) = balanced_json_len(rest) else {
            remaining = rest;
            continue;
        };

        match serde_json::from_str::<Value>(&rest[..json_len]) {
            Ok(parameters) if parameters.is_object() => calls.push(PlannedCall {
                tool_name: format!("{}{}", TOOL_CALL_PREFIX, name),
                parameters,
            }),
            _ => warn!(tool = name, "prefixed fragment had unparseable parameters"),
        }
        remaining = &rest[json_len..];
    }

    calls
}

/// Length of a balanced `{...}` block at the start of `text`, if any.
/// Braces inside string literals do not count.
fn balanced_json_len(text: &str) -> Option<usize> {
    if !text.starts_with('{') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + ch.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}
