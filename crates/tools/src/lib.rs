//! MCP Workbench Tools
//!
//! The planning side of the two-phase flow: composing the planner prompt,
//! recovering an ordered tool-call plan from the gateway's loosely
//! specified response shapes, and executing that plan sequentially against
//! the MCP server's tool endpoint.

pub mod executor;
pub mod planner;
pub mod schema;

// Re-export main types
pub use executor::{ExecutionOutcome, ToolCredentials, ToolExecutor, TOOL_NAMESPACE};
pub use planner::{
    build_planner_prompt, interpret_plan, interpret_plan_text, normalize_tool_call,
    normalize_tool_calls, PlanOutcome, PlannedCall,
};
pub use schema::{render_tool_descriptions, SchemaClient, ToolFunction, ToolSchema, MCP_URL};
