//! Feature vector construction

use super::WorkoutRequest;
use crate::artifacts::ArtifactStore;
use crate::error::Result;
use crate::schema::{AGE_GROUP, FEATURE_NAMES, GENDER, N_FEATURES, TYPE_OF_EXERCISE, TYPE_OF_EXERCISE_WEIGHT};
use ndarray::Array1;

/// The nine model inputs, in training column order (see [`FEATURE_NAMES`])
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Array1<f64>);

impl FeatureVector {
    /// Encode the categorical fields and lay out all features in model order
    pub fn build(request: &WorkoutRequest, store: &ArtifactStore) -> Result<Self> {
        let gender = store.encoder(GENDER)?.encode(&request.gender)?;
        let exercise = store.encoder(TYPE_OF_EXERCISE)?.encode(&request.type_of_exercise)?;
        let age_group = store.encoder(AGE_GROUP)?.encode(&request.age_group)?;

        let values: [f64; N_FEATURES] = [
            request.age,
            gender as f64,
            request.bmi,
            request.fat_percentage,
            request.session_duration_minutes,
            request.workout_frequency,
            request.experience_level,
            exercise as f64 * TYPE_OF_EXERCISE_WEIGHT,
            age_group as f64,
        ];

        Ok(Self(Array1::from_vec(values.to_vec())))
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of a feature by its model column name
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.0[idx])
    }

    /// `(column name, value)` pairs in model order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}
