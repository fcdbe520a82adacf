//! MCP Workbench Core
//!
//! Foundational types for the MCP Workbench workspace. This crate has no
//! dependency on HTTP clients or application code.
//!
//! ## Module Organization
//!
//! - `record` - Tool invocation records, chat messages, and the call log
//! - `debug_log` - Capped newest-first debug log ring
//! - `reveal` - Cosmetic character-by-character reveal of completed strings

pub mod debug_log;
pub mod record;
pub mod reveal;

// ── Records & Messages ─────────────────────────────────────────────────
pub use record::{CallLog, CallStatus, McpResultEntry, Message, Role, ToolCallRecord};

// ── Debug Log ──────────────────────────────────────────────────────────
pub use debug_log::{DebugLog, DEBUG_LOG_CAP};

// ── Reveal Driver ──────────────────────────────────────────────────────
pub use reveal::{reveal, PrefixReveal, RevealPhase, REVEAL_DELAY};
