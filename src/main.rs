//! Metrics collecting server

use clap::Parser;
use metrics_relay::config::{ServerArgs, load_server_config};
use metrics_relay::server;
use metrics_relay::utils::init_tracing;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = ServerArgs::parse();
    let result = match load_server_config(&args).await {
        Ok(config) => server::run_server(config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
