//! MCP Workbench entry point.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mcp_workbench::cli::{Cli, Command, KeyCommand};
use mcp_workbench::flows::{api_test, direct, integrated, two_step, FlowOptions};
use mcp_workbench::state::AppState;
use mcp_workbench::storage::config::ConfigService;
use mcp_workbench::utils::error::{AppError, AppResult};
use mcp_workbench_tools::schema::{render_tool_descriptions, SchemaClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mcp_workbench=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config_service = ConfigService::new().context("failed to load configuration")?;

    // Credential management works on the config file alone.
    if let Command::Key { action } = &cli.command {
        return handle_key_command(&mut config_service, action);
    }

    let mut config = config_service.get_config_clone();
    if let Some(key) = &cli.api_key {
        config.api_key = key.trim().to_string();
    }

    let mut state = AppState::new(config);
    let opts = FlowOptions::default();
    let result = run_command(&cli, &mut state, &opts).await;

    if cli.debug {
        println!("\n── 디버그 로그 ({}개) ──", state.debug_entries().len());
        for entry in state.debug_entries() {
            println!("{}", entry);
        }
    }

    match result {
        Ok(()) => Ok(()),
        // Input validation blocks the submission with an inline message;
        // it is not a program failure.
        Err(AppError::Validation(message)) => {
            println!("{}", message);
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

async fn run_command(cli: &Cli, state: &mut AppState, opts: &FlowOptions) -> AppResult<()> {
    match &cli.command {
        Command::TwoStep { question } => {
            two_step::run_two_step(state, question, opts).await?;
        }
        Command::Ask { question } => {
            let outcome = integrated::run_integrated(state, question, opts).await?;
            if !outcome.tools_used.is_empty() {
                println!("\n사용된 도구: {}", outcome.tools_used.join(", "));
            }
        }
        Command::Direct { prompt, model } => {
            direct::run_direct(state, prompt, model, opts).await?;
        }
        Command::Api { endpoint } => {
            let args = endpoint.request_args(&state.config);
            let record = api_test::run_api_test(state, endpoint.endpoint(), args).await?;
            println!("{} [{}]", record.action, record.status);
            println!("{}", serde_json::to_string_pretty(&record.response)?);
        }
        Command::Tools => {
            let client = SchemaClient::new(state.config.mcp_url.clone());
            match client.list_tools().await {
                Ok(tools) => {
                    println!("MCP 도구 {}개:", tools.len());
                    print!("{}", render_tool_descriptions(&tools));
                }
                Err(err) => println!("{}", err.user_message()),
            }
        }
        Command::Key { .. } => unreachable!("handled before state setup"),
    }

    Ok(())
}

fn handle_key_command(service: &mut ConfigService, action: &KeyCommand) -> anyhow::Result<()> {
    match action {
        KeyCommand::Set { value } => {
            service.set_api_key(value)?;
            println!("API 키를 저장했습니다.");
        }
        KeyCommand::Show => {
            let config = service.get_config();
            println!("api_key: {}", redact(&config.api_key));
            println!(
                "github: {} / {}",
                if config.github_username.is_empty() {
                    "(not set)"
                } else {
                    &config.github_username
                },
                redact(&config.github_token)
            );
        }
        KeyCommand::Clear => {
            service.set_api_key("")?;
            println!("API 키를 삭제했습니다.");
        }
        KeyCommand::Github { username, token } => {
            service.set_github(username, token)?;
            println!("GitHub 자격 증명을 저장했습니다.");
        }
    }
    Ok(())
}

/// Show only a short prefix of a stored secret.
fn redact(secret: &str) -> String {
    let trimmed = secret.trim();
    if trimmed.is_empty() {
        "(not set)".to_string()
    } else if trimmed.chars().count() <= 8 {
        "****".to_string()
    } else {
        let prefix: String = trimmed.chars().take(8).collect();
        format!("{}...", prefix)
    }
}
