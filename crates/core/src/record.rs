//! Call Records and Messages
//!
//! Display-facing records for tool invocations and chat turns. Records are
//! kept newest-first because the history panel shows the most recent call
//! at the top.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat turn shown in the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// RFC 3339 creation time
    pub timestamp: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: now_timestamp(),
        }
    }
}

/// Outcome of a recorded tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Success,
    Error,
    /// The call is in flight; updated to a terminal status on completion.
    Loading,
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CallStatus::Success => "success",
            CallStatus::Error => "error",
            CallStatus::Loading => "loading",
        };
        write!(f, "{}", label)
    }
}

/// One tool invocation as shown in the call history panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub id: String,
    /// Tool name after namespace stripping (e.g. `read_pdf`)
    pub action: String,
    pub args: Value,
    pub response: Value,
    /// RFC 3339 creation time
    pub timestamp: String,
    pub status: CallStatus,
}

impl ToolCallRecord {
    /// Create a record for a call that has just been issued.
    pub fn loading(action: impl Into<String>, args: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            action: action.into(),
            args,
            response: serde_json::json!({ "loading": true }),
            timestamp: now_timestamp(),
            status: CallStatus::Loading,
        }
    }

    /// Create a record for a completed call. The status is derived from
    /// the response body: a top-level `error` field marks the call failed.
    pub fn completed(action: impl Into<String>, args: Value, response: Value) -> Self {
        let status = status_for(&response);
        Self {
            id: Uuid::new_v4().to_string(),
            action: action.into(),
            args,
            response,
            timestamp: now_timestamp(),
            status,
        }
    }

    /// Create a record for a call that failed before producing a body.
    pub fn failed(action: impl Into<String>, args: Value, detail: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            action: action.into(),
            args,
            response: serde_json::json!({ "error": detail.into() }),
            timestamp: now_timestamp(),
            status: CallStatus::Error,
        }
    }
}

/// Derive the terminal status for a parsed response body.
///
/// Canonical rule: the presence of a top-level `error` field marks the
/// call failed; everything else is a success.
pub fn status_for(response: &Value) -> CallStatus {
    if response.get("error").is_some() {
        CallStatus::Error
    } else {
        CallStatus::Success
    }
}

/// Current time as an RFC 3339 string.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// A tool result forwarded to the worker call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpResultEntry {
    /// Tool name as the planner proposed it (namespace prefix retained)
    pub tool: String,
    pub args: Value,
    pub result: Value,
}

/// Newest-first list of tool invocation records.
#[derive(Debug, Default, Clone)]
pub struct CallLog {
    records: Vec<ToolCallRecord>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record at the front (most recent first).
    pub fn push_front(&mut self, record: ToolCallRecord) {
        self.records.insert(0, record);
    }

    /// Insert a batch of records at the front, preserving their order.
    pub fn extend_front(&mut self, records: Vec<ToolCallRecord>) {
        for record in records.into_iter().rev() {
            self.records.insert(0, record);
        }
    }

    /// Resolve an in-flight record to a terminal status.
    ///
    /// Returns false if no record with the given id exists.
    pub fn resolve(&mut self, id: &str, response: Value, status: CallStatus) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.response = response;
                record.status = status;
                true
            }
            None => false,
        }
    }

    pub fn records(&self) -> &[ToolCallRecord] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
