//! Label encoders for the categorical fields
//!
//! Each encoder is the persisted vocabulary of a fitted label encoder: the class at
//! position `i` encodes to `i`. Both directions are plain lookups built once at load.

use crate::error::{ArtifactError, PredictionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

const ARTIFACT: &str = "encoders";

/// Bidirectional mapping between one field's vocabulary and dense integer codes
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    field: String,
    classes: Vec<String>,
    codes: HashMap<String, usize>,
}

impl LabelEncoder {
    /// Build an encoder from a vocabulary in code order
    pub fn new(
        field: impl Into<String>,
        classes: Vec<String>,
    ) -> std::result::Result<Self, ArtifactError> {
        let field = field.into();
        if classes.is_empty() {
            return Err(ArtifactError::schema(
                ARTIFACT,
                format!("encoder for {} has an empty vocabulary", field),
            ));
        }

        let mut codes = HashMap::with_capacity(classes.len());
        for (code, class) in classes.iter().enumerate() {
            if codes.insert(class.clone(), code).is_some() {
                return Err(ArtifactError::schema(
                    ARTIFACT,
                    format!("encoder for {} lists {:?} more than once", field, class),
                ));
            }
        }

        Ok(Self { field, classes, codes })
    }

    /// Map a category to its code
    pub fn encode(&self, value: &str) -> Result<usize> {
        self.codes
            .get(value)
            .copied()
            .ok_or_else(|| PredictionError::UnknownCategory {
                field: self.field.clone(),
                value: value.to_string(),
            })
    }

    /// Map a code back to its category
    pub fn decode(&self, code: i64) -> Result<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| self.classes.get(idx))
            .map(String::as_str)
            .ok_or_else(|| PredictionError::UnknownCode {
                field: self.field.clone(),
                code,
            })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Vocabulary in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// On-disk form: field name -> vocabulary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncoderVocabularies(pub BTreeMap<String, Vec<String>>);

/// All label encoders, keyed by exact field name
#[derive(Debug, Clone)]
pub struct EncoderSet {
    encoders: BTreeMap<String, LabelEncoder>,
}

impl EncoderSet {
    /// Load the encoder set from a JSON artifact
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ArtifactError> {
        let vocabularies: EncoderVocabularies = super::read_json(ARTIFACT, path.as_ref())?;
        Self::from_vocabularies(vocabularies)
    }

    pub fn from_vocabularies(
        vocabularies: EncoderVocabularies,
    ) -> std::result::Result<Self, ArtifactError> {
        let encoders = vocabularies
            .0
            .into_iter()
            .map(|(field, classes)| {
                let encoder = LabelEncoder::new(field.clone(), classes)?;
                Ok((field, encoder))
            })
            .collect::<std::result::Result<BTreeMap<_, _>, ArtifactError>>()?;

        Ok(Self { encoders })
    }

    /// Fail unless every named field has an encoder
    pub fn require(&self, fields: &[&str]) -> std::result::Result<(), ArtifactError> {
        let missing: Vec<&str> = fields
            .iter()
            .copied()
            .filter(|f| !self.encoders.contains_key(*f))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ArtifactError::schema(
                ARTIFACT,
                format!("missing encoders for {}", missing.join(", ")),
            ))
        }
    }

    /// Look up an encoder by exact field name
    pub fn get(&self, field: &str) -> Result<&LabelEncoder> {
        self.encoders
            .get(field)
            .ok_or_else(|| PredictionError::MissingEncoder(field.to_string()))
    }

    /// Encoders in field-name order
    pub fn iter(&self) -> impl Iterator<Item = &LabelEncoder> {
        self.encoders.values()
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}
