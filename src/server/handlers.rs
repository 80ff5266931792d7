//! Request handlers

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};

use super::error::{Result, ServerError};
use super::state::AppState;
use crate::prediction::PredictionResult;

pub const WELCOME_TEXT: &str = "✅ Welcome to FCTMS Workout Plan API!";
pub const PREDICT_USAGE_TEXT: &str = "🚫 Use POST method to get predictions.";

pub async fn home() -> &'static str {
    tracing::info!("Home route was called");
    WELCOME_TEXT
}

pub async fn predict_usage() -> &'static str {
    PREDICT_USAGE_TEXT
}

/// The body is parsed by hand so malformed JSON gets the same `{"error": ...}`
/// treatment as every other request failure.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictionResult>> {
    let value: serde_json::Value = serde_json::from_slice(&body)?;
    let result = state.predictor.predict_value(&value).map_err(ServerError::from)?;
    Ok(Json(result))
}
