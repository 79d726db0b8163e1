//! Configuration management
//!
//! Values are resolved in three layers: built-in defaults, then an optional
//! YAML file, then command line flags and environment variables.

pub mod cli;
pub mod models;

pub use cli::{AgentArgs, ServerArgs};
pub use models::*;

use crate::utils::error::{MetricsError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

/// Read a YAML configuration document
pub async fn from_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| MetricsError::Config(format!("Failed to read config file: {}", e)))?;

    Ok(serde_yaml::from_str(&content)?)
}

/// Resolve the server configuration
pub async fn load_server_config(args: &ServerArgs) -> Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => from_file(path).await?,
        None => ServerConfig::default(),
    };
    args.apply(&mut config);

    config
        .validate()
        .map_err(|e| MetricsError::Config(format!("Server config error: {}", e)))?;
    debug!("Server configuration: {:?}", redacted_server(&config));
    Ok(config)
}

/// Resolve the agent configuration
pub async fn load_agent_config(args: &AgentArgs) -> Result<AgentConfig> {
    let mut config = match &args.config {
        Some(path) => from_file(path).await?,
        None => AgentConfig::default(),
    };
    args.apply(&mut config);

    config
        .validate()
        .map_err(|e| MetricsError::Config(format!("Agent config error: {}", e)))?;
    debug!("Agent configuration: {:?}", redacted_agent(&config));
    Ok(config)
}

fn redacted_server(config: &ServerConfig) -> ServerConfig {
    let mut config = config.clone();
    if !config.key.is_empty() {
        config.key = "[REDACTED]".to_string();
    }
    config
}

fn redacted_agent(config: &AgentConfig) -> AgentConfig {
    let mut config = config.clone();
    if !config.key.is_empty() {
        config.key = "[REDACTED]".to_string();
    }
    config
}
