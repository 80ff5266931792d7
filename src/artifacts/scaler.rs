//! Fitted standard scaler

use crate::error::{ArtifactError, PredictionError, Result};
use crate::schema::{FEATURE_NAMES, N_FEATURES};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::path::Path;

const ARTIFACT: &str = "scaler";

fn default_true() -> bool {
    true
}

/// Standard scaling (z-score normalization): (x - mean) / scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-feature mean
    mean: Vec<f64>,
    /// Per-feature standard deviation
    scale: Vec<f64>,
    #[serde(default = "default_true")]
    with_mean: bool,
    #[serde(default = "default_true")]
    with_std: bool,
    /// Column names seen at fit time, when the scaler was fitted on a frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    /// Create a scaler from fitted parameters
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> std::result::Result<Self, ArtifactError> {
        let scaler = Self {
            mean,
            scale,
            with_mean: true,
            with_std: true,
            feature_names: None,
        };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Load a fitted scaler from a JSON artifact
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ArtifactError> {
        let scaler: Self = super::read_json(ARTIFACT, path.as_ref())?;
        scaler.validate()?;
        Ok(scaler)
    }

    fn validate(&self) -> std::result::Result<(), ArtifactError> {
        if self.mean.len() != N_FEATURES || self.scale.len() != N_FEATURES {
            return Err(ArtifactError::schema(
                ARTIFACT,
                format!(
                    "expected {} features, got mean={} scale={}",
                    N_FEATURES,
                    self.mean.len(),
                    self.scale.len()
                ),
            ));
        }

        if self.mean.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err(ArtifactError::schema(ARTIFACT, "non-finite parameter"));
        }

        if let Some(ref names) = self.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES) {
                return Err(ArtifactError::schema(
                    ARTIFACT,
                    format!("fitted on columns {:?}, expected {:?}", names, FEATURE_NAMES),
                ));
            }
        }

        Ok(())
    }

    /// Scale one feature vector. Order and length are preserved.
    pub fn transform(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        if x.len() != self.n_features() {
            return Err(PredictionError::ShapeError {
                expected: self.n_features(),
                actual: x.len(),
            });
        }

        let scaled: Array1<f64> = x
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&value, (&mean, &scale))| {
                let centered = if self.with_mean { value - mean } else { value };
                // Constant features were fitted with zero variance
                let scale = if scale == 0.0 { 1.0 } else { scale };
                if self.with_std { centered / scale } else { centered }
            })
            .collect();

        Ok(scaled)
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn scaler() -> StandardScaler {
        StandardScaler::new(
            vec![30.0, 0.5, 25.0, 20.0, 60.0, 3.0, 2.0, 0.3, 1.0],
            vec![10.0, 0.5, 5.0, 5.0, 20.0, 1.0, 1.0, 0.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_transform_standardizes() {
        let x = array![40.0, 1.0, 25.0, 10.0, 60.0, 4.0, 2.0, 0.3, 3.0];
        let scaled = scaler().transform(&x).unwrap();

        assert_eq!(scaled.len(), 9);
        assert!((scaled[0] - 1.0).abs() < 1e-12);
        assert!((scaled[1] - 1.0).abs() < 1e-12);
        assert!((scaled[3] + 2.0).abs() < 1e-12);
        assert!((scaled[8] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_scale_is_treated_as_one() {
        let x = array![30.0, 0.5, 25.0, 20.0, 60.0, 3.0, 2.0, 0.5, 1.0];
        let scaled = scaler().transform(&x).unwrap();
        assert!((scaled[7] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_shape_mismatch() {
        let err = scaler().transform(&array![1.0, 2.0]).unwrap_err();
        assert_eq!(err, PredictionError::ShapeError { expected: 9, actual: 2 });
    }

    #[test]
    fn test_rejects_wrong_feature_count() {
        assert!(StandardScaler::new(vec![0.0; 8], vec![1.0; 8]).is_err());
    }

    #[test]
    fn test_rejects_reordered_feature_names() {
        let mut names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        names.swap(0, 2);
        let json = serde_json::json!({
            "mean": vec![0.0; 9],
            "scale": vec![1.0; 9],
            "feature_names": names,
        });
        let scaler: StandardScaler = serde_json::from_value(json).unwrap();
        assert!(scaler.validate().is_err());
    }
}
