//! FCTMS Workout API - Main Entry Point

use clap::Parser;
use fctms_workout::cli::{cmd_inspect, cmd_predict, cmd_serve, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fctms_workout=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { host, port, artifacts_dir }) => {
            cmd_serve(host, port, artifacts_dir.as_deref()).await?;
        }
        Some(Commands::Predict { input, artifacts_dir }) => {
            cmd_predict(&input, artifacts_dir.as_deref())?;
        }
        Some(Commands::Inspect { artifacts_dir }) => {
            cmd_inspect(artifacts_dir.as_deref())?;
        }
        None => {
            cmd_serve(None, None, None).await?;
        }
    }

    Ok(())
}
