//! Error types for the server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::PredictionError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

impl ServerError {
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::Json(_) => "MalformedValueError",
            ServerError::Prediction(e) => e.kind(),
        }
    }
}

/// Request errors are reported in the body with a 200 status, like successes.
/// Clients branch on the presence of `error`.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::warn!(kind = self.kind(), detail = %self, "Prediction request failed");

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (StatusCode::OK, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
