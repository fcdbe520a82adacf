//! Application State
//!
//! Mutable state for one workbench session: the chat transcript, the tool
//! call history, the debug log ring, and the reveal phase. The state is
//! owned by the driving command and mutated only through these transition
//! methods; all updates happen on the single flow task.

use mcp_workbench_core::debug_log::DebugLog;
use mcp_workbench_core::record::{CallLog, CallStatus, Message, ToolCallRecord};
use mcp_workbench_core::reveal::RevealPhase;

use crate::storage::config::AppConfig;

/// Session state for the workbench.
pub struct AppState {
    pub config: AppConfig,
    messages: Vec<Message>,
    calls: CallLog,
    debug: DebugLog,
    phase: RevealPhase,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            messages: Vec::new(),
            calls: CallLog::new(),
            debug: DebugLog::new(),
            phase: RevealPhase::Idle,
        }
    }

    /// Clear per-run display state, as each submission does. The debug
    /// log survives across runs.
    pub fn reset_run(&mut self) {
        self.messages.clear();
        self.calls.clear();
        self.phase = RevealPhase::Idle;
    }

    // ── Phase transitions ───────────────────────────────────────────

    pub fn set_phase(&mut self, phase: RevealPhase) {
        self.phase = phase;
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    // ── Debug log ───────────────────────────────────────────────────

    /// Append a debug entry to the ring and the tracing sink.
    pub fn debug(&mut self, message: impl AsRef<str>) {
        tracing::debug!("{}", message.as_ref());
        self.debug.push(message);
    }

    pub fn debug_entries(&self) -> &[String] {
        self.debug.entries()
    }

    pub fn debug_log_mut(&mut self) -> &mut DebugLog {
        &mut self.debug
    }

    // ── Transcript ──────────────────────────────────────────────────

    pub fn push_user_message(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant_message(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    // ── Call history ────────────────────────────────────────────────

    pub fn push_call(&mut self, record: ToolCallRecord) {
        self.calls.push_front(record);
    }

    pub fn resolve_call(&mut self, id: &str, response: serde_json::Value, status: CallStatus) -> bool {
        self.calls.resolve(id, response, status)
    }

    /// Merge a batch of records at the front, preserving their order.
    pub fn merge_calls_front(&mut self, records: Vec<ToolCallRecord>) {
        self.calls.extend_front(records);
    }

    pub fn calls(&self) -> &[ToolCallRecord] {
        self.calls.records()
    }
}
