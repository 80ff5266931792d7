//! Request validation, feature encoding and ranked prediction

mod features;
mod request;
mod service;

pub use features::FeatureVector;
pub use request::WorkoutRequest;
pub use service::{
    rank_probabilities, round_probability, PredictionResult, PredictionService, TopPredictions,
};
