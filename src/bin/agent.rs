//! Metrics sampling agent

use clap::Parser;
use metrics_relay::agent;
use metrics_relay::config::{AgentArgs, load_agent_config};
use metrics_relay::utils::init_tracing;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = AgentArgs::parse();
    let result = match load_agent_config(&args).await {
        Ok(config) => agent::run_agent(config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
