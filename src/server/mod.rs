//! FCTMS workout prediction server
//!
//! Serves the trained model over HTTP: `GET /` for a liveness string and
//! `POST /predict` for predictions.

mod api;
mod error;
mod handlers;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use handlers::{PREDICT_USAGE_TEXT, WELCOME_TEXT};
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::artifacts::{ArtifactPaths, ArtifactStore};

pub const DEFAULT_PORT: u16 = 5000;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub artifacts: ArtifactPaths,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            artifacts: ArtifactPaths::default(),
        }
    }
}

/// Load the artifacts and serve until ctrl+c.
///
/// Fails before binding if any artifact cannot be loaded.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    info!(
        classifier = %config.artifacts.classifier.display(),
        encoders = %config.artifacts.encoders.display(),
        scaler = %config.artifacts.scaler.display(),
        "Loading artifacts"
    );
    let store = Arc::new(ArtifactStore::load(&config.artifacts)?);
    for encoder in store.encoders().iter() {
        info!(field = encoder.field(), classes = encoder.len(), "Encoder ready");
    }

    let state = Arc::new(AppState::new(config.clone(), store));
    let app = create_router(Arc::clone(&state));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        address = %addr,
        pid = std::process::id(),
        started_at = %state.started_at.to_rfc3339(),
        "FCTMS Workout API listening"
    );

    let shutdown_state = Arc::clone(&state);
    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
        info!(
            uptime_secs = shutdown_state.uptime_secs(),
            "Shutdown signal received, stopping server gracefully"
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
