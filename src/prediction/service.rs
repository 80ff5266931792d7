//! Prediction service: request in, ranked workout labels out

use super::{FeatureVector, WorkoutRequest};
use crate::artifacts::{ArtifactStore, RandomForestClassifier};
use crate::error::{PredictionError, Result};
use crate::schema::{TOP_K, WORKOUT_LABEL};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Round a probability to 3 decimal places.
///
/// Goes through the exact decimal expansion, so halfway cases round to even and
/// values just below a midpoint round down, as Python's `round(p, 3)` does.
pub fn round_probability(p: f64) -> f64 {
    format!("{:.3}", p).parse().unwrap_or(p)
}

/// Order classes by descending probability.
///
/// The sort is stable, so classes with equal probability keep the classifier's order.
pub fn rank_probabilities(mut probabilities: Vec<(i64, f64)>) -> Vec<(i64, f64)> {
    probabilities.sort_by(|a, b| b.1.total_cmp(&a.1));
    probabilities
}

/// Labels with rounded probabilities, most probable first.
///
/// Serializes as a JSON object whose keys keep this order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopPredictions(Vec<(String, f64)>);

impl TopPredictions {
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(label, p)| (label.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.iter().find(|(l, _)| *l == label).map(|(_, p)| p)
    }
}

impl Serialize for TopPredictions {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, p) in &self.0 {
            map.serialize_entry(label, p)?;
        }
        map.end()
    }
}

/// Outcome of one prediction
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Predicted class code
    pub class_code: i64,
    /// Decoded label of `class_code`
    pub prediction: String,
    pub top_3_predictions: TopPredictions,
    /// Every class with its unrounded probability, most probable first
    pub ranked: Vec<(i64, f64)>,
}

impl Serialize for PredictionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PredictionResult", 2)?;
        state.serialize_field("prediction", &self.prediction)?;
        state.serialize_field("top_3_predictions", &self.top_3_predictions)?;
        state.end()
    }
}

/// Stateless predictor over a shared, read-only artifact store
#[derive(Debug, Clone)]
pub struct PredictionService {
    store: Arc<ArtifactStore>,
}

impl PredictionService {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Predict from a raw JSON body
    pub fn predict_value(&self, body: &Value) -> Result<PredictionResult> {
        debug!(input = %body, "Received input");
        let request = WorkoutRequest::from_json(body)?;
        self.predict(&request)
    }

    /// Predict from a validated request
    pub fn predict(&self, request: &WorkoutRequest) -> Result<PredictionResult> {
        let features = FeatureVector::build(request, &self.store)?;
        debug!(features = ?features.as_array().to_vec(), "Encoded features");

        let scaled = self.store.scaler().transform(features.as_array())?;

        let proba = self.store.classifier().predict_proba(&scaled)?;
        let best = RandomForestClassifier::argmax(&proba).ok_or_else(|| {
            PredictionError::Internal("classifier returned no probabilities".to_string())
        })?;
        let ranked = rank_probabilities(proba);
        let labels = self.store.encoder(WORKOUT_LABEL)?;

        let top = ranked
            .iter()
            .take(TOP_K)
            .map(|&(code, p)| Ok((labels.decode(code)?.to_string(), round_probability(p))))
            .collect::<Result<Vec<_>>>()?;
        let top_3_predictions = TopPredictions(top);

        let prediction = labels.decode(best)?.to_string();

        info!(top_3 = ?top_3_predictions.0, "Top predictions with confidence");
        info!(class_code = best, label = %prediction, "Predicted label");

        Ok(PredictionResult {
            class_code: best,
            prediction,
            top_3_predictions,
            ranked,
        })
    }
}
