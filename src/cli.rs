//! Command-Line Interface
//!
//! One subcommand per workbench screen, plus credential management. The
//! API subcommands carry the same preset argument sets the test buttons
//! sent.

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use mcp_workbench_llm::DEFAULT_MODEL;

use crate::flows::api_test::ApiEndpoint;
use crate::storage::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "mcp-workbench", version, about = "Terminal workbench for the MCP demo stack")]
pub struct Cli {
    /// Print the debug log after the command completes
    #[arg(long, global = true)]
    pub debug: bool,

    /// Override the stored API key for this invocation
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the two-phase planner/worker flow
    TwoStep { question: String },

    /// One-shot gateway ask; the gateway drives the tools itself
    Ask { question: String },

    /// Direct OpenAI chat completion, no gateway involved
    Direct {
        prompt: String,

        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,
    },

    /// Exercise one interface-backend endpoint
    Api {
        #[command(subcommand)]
        endpoint: ApiCommand,
    },

    /// List the MCP server's tool schemas
    Tools,

    /// Manage stored credentials
    Key {
        #[command(subcommand)]
        action: KeyCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ApiCommand {
    /// Read a PDF from the interface backend
    Pdf {
        #[arg(default_value = "백엔드_가이드.pdf")]
        filename: String,
    },

    /// Query a database table, optionally filtered by role
    Database {
        #[arg(default_value = "users")]
        table: String,

        #[arg(long)]
        role: Option<String>,
    },

    /// Look up a file in a GitHub repository
    Github {
        #[arg(long)]
        repository: String,

        #[arg(long)]
        file_path: String,

        /// Override the stored GitHub username
        #[arg(long)]
        username: Option<String>,

        /// Override the stored GitHub token
        #[arg(long)]
        token: Option<String>,
    },

    /// Check backend health
    Health,
}

impl ApiCommand {
    pub fn endpoint(&self) -> ApiEndpoint {
        match self {
            ApiCommand::Pdf { .. } => ApiEndpoint::Pdf,
            ApiCommand::Database { .. } => ApiEndpoint::Database,
            ApiCommand::Github { .. } => ApiEndpoint::Github,
            ApiCommand::Health => ApiEndpoint::Health,
        }
    }

    /// Build the request body, injecting stored GitHub credentials where
    /// flags did not override them.
    pub fn request_args(&self, config: &AppConfig) -> Value {
        match self {
            ApiCommand::Pdf { filename } => json!({ "filename": filename }),
            ApiCommand::Database { table, role } => match role {
                Some(role) => json!({ "table": table, "filters": { "role": role } }),
                None => json!({ "table": table }),
            },
            ApiCommand::Github {
                repository,
                file_path,
                username,
                token,
            } => json!({
                "repository": repository,
                "file_path": file_path,
                "username": username.as_deref().unwrap_or(&config.github_username),
                "password": token.as_deref().unwrap_or(&config.github_token),
            }),
            ApiCommand::Health => json!({}),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum KeyCommand {
    /// Store the OpenAI API key (trimmed)
    Set { value: String },

    /// Show a redacted view of the stored credentials
    Show,

    /// Remove the stored API key
    Clear,

    /// Store the GitHub credentials used by the github tools
    Github { username: String, token: String },
}
