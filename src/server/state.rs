//! Application state management

use std::sync::Arc;

use crate::artifacts::ArtifactStore;
use crate::prediction::PredictionService;

use super::ServerConfig;

/// Application state shared across handlers.
///
/// Everything here is read-only after construction.
pub struct AppState {
    pub config: ServerConfig,
    pub predictor: PredictionService,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: ServerConfig, store: Arc<ArtifactStore>) -> Self {
        Self {
            config,
            predictor: PredictionService::new(store),
            started_at: chrono::Utc::now(),
        }
    }

    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}
