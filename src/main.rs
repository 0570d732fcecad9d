//! planacad-rs - academic upload pipeline backend

use clap::Parser;
use planacad_rs::server;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "planacad", about = "Academic upload pipeline backend")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, env = "PLANACAD_CONFIG", default_value = "config/planacad.yaml")]
    config: String,

    /// Apply database migrations and exit
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match server::builder::run_server(&cli.config, cli.migrate).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
