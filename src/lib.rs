//! FCTMS Workout API
//!
//! Serves a pre-trained workout classifier: a request describing a person and their
//! exercise preferences is encoded into the model's nine-feature vector, scaled,
//! classified, and answered with the predicted workout label plus the three most
//! probable labels.
//!
//! # Modules
//!
//! - [`schema`] - Field names and the feature order the model was trained on
//! - [`artifacts`] - Classifier, label encoders and scaler, loaded once at startup
//! - [`prediction`] - Request validation, feature encoding and ranked prediction
//! - [`server`] - HTTP server
//! - [`cli`] - Command-line interface

pub mod error;
pub mod schema;

pub mod artifacts;
pub mod prediction;

pub mod server;
pub mod cli;

pub use error::{ArtifactError, PredictionError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{ArtifactError, PredictionError, Result};
    pub use crate::artifacts::{ArtifactPaths, ArtifactStore, LabelEncoder, RandomForestClassifier, StandardScaler};
    pub use crate::prediction::{FeatureVector, PredictionResult, PredictionService, WorkoutRequest};
    pub use crate::server::{create_router, run_server, AppState, ServerConfig};
}
