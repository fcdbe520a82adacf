//! JSON Configuration Management
//!
//! Handles reading and writing the workbench configuration file. The file
//! holds the credentials the display screens kept in a single persisted
//! key plus the backend base URLs, and is rewritten on every edit.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_workbench_dir};

/// Default interface-backend endpoint.
pub const DEFAULT_API_URL: &str = "http://localhost:9002";

/// Persisted workbench settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// OpenAI API key, stored trimmed
    pub api_key: String,
    /// GitHub credentials injected into the github tools
    pub github_username: String,
    pub github_token: String,
    /// Backend base URLs
    pub gateway_url: String,
    pub mcp_url: String,
    pub api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            github_username: String::new(),
            github_token: String::new(),
            gateway_url: mcp_workbench_llm::GATEWAY_URL.to_string(),
            mcp_url: mcp_workbench_tools::MCP_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [
            ("gateway_url", &self.gateway_url),
            ("mcp_url", &self.mcp_url),
            ("api_url", &self.api_url),
        ] {
            if url.trim().is_empty() {
                return Err(format!("{} must not be empty", name));
            }
        }
        Ok(())
    }
}

/// Configuration service for managing workbench settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: AppConfig,
}

impl ConfigService {
    /// Create a new config service, loading existing config or creating defaults
    pub fn new() -> AppResult<Self> {
        ensure_workbench_dir()?;

        let config_path = config_path()?;
        let config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            let default_config = AppConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            default_config
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &PathBuf) -> AppResult<AppConfig> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &PathBuf, config: &AppConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a clone of the current configuration
    pub fn get_config_clone(&self) -> AppConfig {
        self.config.clone()
    }

    /// Store the API key, trimmed, and rewrite the file
    pub fn set_api_key(&mut self, key: &str) -> AppResult<()> {
        self.config.api_key = key.trim().to_string();
        self.save()
    }

    /// Store the GitHub credentials and rewrite the file
    pub fn set_github(&mut self, username: &str, token: &str) -> AppResult<()> {
        self.config.github_username = username.trim().to_string();
        self.config.github_token = token.trim().to_string();
        self.save()
    }

    /// Save the current configuration to disk
    pub fn save(&self) -> AppResult<()> {
        Self::save_to_file(&self.config_path, &self.config)
    }

    /// Reload configuration from disk
    pub fn reload(&mut self) -> AppResult<()> {
        self.config = Self::load_from_file(&self.config_path)?;
        Ok(())
    }

    /// Check if the config service is healthy
    pub fn is_healthy(&self) -> bool {
        self.config_path.exists() && self.config.validate().is_ok()
    }
}
