//! Trained artifacts: classifier, label encoders and scaler
//!
//! Loaded once at startup and shared read-only afterwards. Nothing in this module
//! mutates after [`ArtifactStore::load`] returns, so the store can be handed to any
//! number of concurrent requests behind an `Arc` without locking.

mod encoder;
mod forest;
mod scaler;

pub use encoder::{EncoderSet, EncoderVocabularies, LabelEncoder};
pub use forest::{DecisionTree, RandomForestClassifier, TreeNode};
pub use scaler::StandardScaler;

use crate::error::{ArtifactError, Result};
use crate::schema::{ENCODED_FIELDS, N_FEATURES, WORKOUT_LABEL};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default artifact file names
pub const CLASSIFIER_FILE: &str = "fctms_rf_model.json";
pub const ENCODERS_FILE: &str = "fctms_label_encoders.json";
pub const SCALER_FILE: &str = "fctms_scaler.json";

pub(crate) fn read_json<T: DeserializeOwned>(
    artifact: &'static str,
    path: &Path,
) -> std::result::Result<T, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        artifact,
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Parse {
        artifact,
        path: path.to_path_buf(),
        source,
    })
}

/// Locations of the three persisted artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub classifier: PathBuf,
    pub encoders: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            classifier: dir.join(CLASSIFIER_FILE),
            encoders: dir.join(ENCODERS_FILE),
            scaler: dir.join(SCALER_FILE),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        let dir = std::env::var("ARTIFACTS_DIR").unwrap_or_else(|_| ".".to_string());
        Self::from_dir(dir)
    }
}

/// Immutable holder of the trained artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    classifier: RandomForestClassifier,
    encoders: EncoderSet,
    scaler: StandardScaler,
}

impl ArtifactStore {
    /// Load and cross-check all three artifacts
    pub fn load(paths: &ArtifactPaths) -> std::result::Result<Self, ArtifactError> {
        let classifier = RandomForestClassifier::load(&paths.classifier)?;
        let encoders = EncoderSet::load(&paths.encoders)?;
        let scaler = StandardScaler::load(&paths.scaler)?;

        let store = Self::from_parts(classifier, encoders, scaler)?;
        info!(
            classifier = %paths.classifier.display(),
            encoders = %paths.encoders.display(),
            scaler = %paths.scaler.display(),
            n_trees = store.classifier.n_trees(),
            n_classes = store.classifier.classes().len(),
            "Artifacts loaded"
        );
        Ok(store)
    }

    /// Assemble a store from already-loaded artifacts
    pub fn from_parts(
        classifier: RandomForestClassifier,
        encoders: EncoderSet,
        scaler: StandardScaler,
    ) -> std::result::Result<Self, ArtifactError> {
        encoders.require(&ENCODED_FIELDS)?;

        if classifier.n_features() != N_FEATURES {
            return Err(ArtifactError::schema(
                "classifier",
                format!("expects {} features, the schema has {}", classifier.n_features(), N_FEATURES),
            ));
        }
        if scaler.n_features() != classifier.n_features() {
            return Err(ArtifactError::schema(
                "scaler",
                format!(
                    "scales {} features but the classifier expects {}",
                    scaler.n_features(),
                    classifier.n_features()
                ),
            ));
        }

        let labels = encoders
            .get(WORKOUT_LABEL)
            .map_err(|e| ArtifactError::schema("encoders", e.to_string()))?;
        for &code in classifier.classes() {
            labels.decode(code).map_err(|_| {
                ArtifactError::schema(
                    "classifier",
                    format!("class code {} has no {} label", code, WORKOUT_LABEL),
                )
            })?;
        }

        Ok(Self { classifier, encoders, scaler })
    }

    /// Encoder for an exact field name
    pub fn encoder(&self, field: &str) -> Result<&LabelEncoder> {
        self.encoders.get(field)
    }

    pub fn encoders(&self) -> &EncoderSet {
        &self.encoders
    }

    pub fn classifier(&self) -> &RandomForestClassifier {
        &self.classifier
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }
}
