//! MCP Workbench
//!
//! Terminal workbench for exercising the MCP demo stack: the gateway's
//! `/ask` endpoint (integrated, planner, and worker modes), the MCP
//! server's tool listing and invocation endpoints, the interface
//! backend's API endpoints, and the OpenAI chat completions API directly.
//!
//! The orchestration building blocks live in the workspace crates
//! (`mcp-workbench-core`, `mcp-workbench-llm`, `mcp-workbench-tools`);
//! this crate wires them into flows behind a clap CLI.

pub mod cli;
pub mod flows;
pub mod state;
pub mod storage;
pub mod utils;
