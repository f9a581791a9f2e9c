//! Workledger - project management and billing backend

#![allow(missing_docs)]

use clap::Parser;
use std::process::ExitCode;
use workledger::server;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(
    name = "workledger",
    version,
    about = "Project management and billing backend"
)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(
        long,
        env = "WORKLEDGER_CONFIG",
        default_value = "config/workledger.yaml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging system; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .init();

    match server::builder::run_server(&args.config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
