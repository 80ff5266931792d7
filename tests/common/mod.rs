//! Shared fixtures for integration tests

#![allow(dead_code)]

use fctms_workout::artifacts::{ArtifactPaths, ArtifactStore};
use fctms_workout::prediction::PredictionService;
use fctms_workout::server::{create_router, AppState, ServerConfig};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn fixture_paths() -> ArtifactPaths {
    ArtifactPaths::from_dir(fixtures_dir())
}

pub fn fixture_store() -> Arc<ArtifactStore> {
    Arc::new(ArtifactStore::load(&fixture_paths()).expect("fixture artifacts load"))
}

pub fn fixture_service() -> PredictionService {
    PredictionService::new(fixture_store())
}

pub fn test_app() -> axum::Router {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        artifacts: fixture_paths(),
    };
    let state = Arc::new(AppState::new(config, fixture_store()));
    create_router(state)
}

/// Request used throughout the API documentation
pub fn example_request() -> Value {
    json!({
        "Age": 25,
        "Gender": "male",
        "BMI": 24.5,
        "Fat_Percentage": 18.0,
        "Session_Duration_Minutes": 45,
        "Workout_Frequency": 4,
        "Experience_Level": 2,
        "Type_of_Exercise": "Cardio",
        "Age_Group": "20-29"
    })
}

pub fn hiit_request() -> Value {
    json!({
        "Age": 34,
        "Gender": "female",
        "BMI": 27.0,
        "Fat_Percentage": 30.0,
        "Session_Duration_Minutes": 90,
        "Workout_Frequency": 3,
        "Experience_Level": 1,
        "Type_of_Exercise": "HIIT",
        "Age_Group": "30-39"
    })
}
