//! MCP Workbench LLM
//!
//! HTTP clients for the model-facing endpoints:
//! - the gateway backend's `/ask` endpoint in its three modes
//!   (integrated ask, `2step` planning, `worker` synthesis)
//! - the OpenAI chat completions API called directly
//!
//! Also defines the error taxonomy shared by every outbound call, with the
//! canned user-facing messages keyed by HTTP status and transport class.

pub mod error;
pub mod gateway;
pub mod http_client;
pub mod openai;

// Re-export main types
pub use error::{api_status_message, status_message, LlmError, LlmResult};
pub use gateway::{worker_answer, AskResponse, GatewayCall, GatewayClient, GATEWAY_URL};
pub use http_client::build_http_client;
pub use openai::{Completion, OpenAiClient, DEFAULT_MODEL, OPENAI_API_URL};
