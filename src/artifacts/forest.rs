//! Random forest classifier (inference only)
//!
//! Trees are evaluated independently and their normalized leaf distributions averaged
//! (soft voting). The predicted class is the first argmax of the averaged distribution,
//! so `predict_class` and `predict_proba` always agree.

use crate::error::{ArtifactError, PredictionError, Result};
use ndarray::Array1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

const ARTIFACT: &str = "classifier";

/// Decision tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Leaf node with per-class sample weights
    Leaf {
        distribution: Vec<f64>,
        #[serde(default)]
        n_samples: usize,
    },
    /// Internal node; samples with `x[feature_idx] <= threshold` go left
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn validate(&self, n_features: usize, n_classes: usize) -> std::result::Result<(), String> {
        match self {
            TreeNode::Leaf { distribution, .. } => {
                if distribution.len() != n_classes {
                    return Err(format!(
                        "leaf has {} class weights, expected {}",
                        distribution.len(),
                        n_classes
                    ));
                }
                if distribution.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err("leaf has a negative or non-finite class weight".to_string());
                }
                if distribution.iter().sum::<f64>() <= 0.0 {
                    return Err("leaf has no class weight".to_string());
                }
                Ok(())
            }
            TreeNode::Split { feature_idx, threshold, left, right } => {
                if *feature_idx >= n_features {
                    return Err(format!(
                        "split on feature {} but model has {} features",
                        feature_idx, n_features
                    ));
                }
                if !threshold.is_finite() {
                    return Err(format!("non-finite threshold on feature {}", feature_idx));
                }
                left.validate(n_features, n_classes)?;
                right.validate(n_features, n_classes)
            }
        }
    }
}

/// A single fitted tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: TreeNode,
}

impl DecisionTree {
    pub fn new(root: TreeNode) -> Self {
        Self { root }
    }

    /// Class distribution of the leaf `x` falls into, normalized to sum to 1
    pub fn predict_proba(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { distribution, .. } => {
                    let total: f64 = distribution.iter().sum();
                    return Ok(distribution.iter().map(|w| w / total).collect());
                }
                TreeNode::Split { feature_idx, threshold, left, right } => {
                    let value = x.get(*feature_idx).ok_or(PredictionError::ShapeError {
                        expected: feature_idx + 1,
                        actual: x.len(),
                    })?;
                    node = if *value <= *threshold { &**left } else { &**right };
                }
            }
        }
    }

    /// Get tree depth
    pub fn depth(&self) -> usize {
        fn node_depth(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Split { left, right, .. } => 1 + node_depth(left).max(node_depth(right)),
            }
        }
        node_depth(&self.root)
    }
}

/// Random forest classifier loaded from a persisted artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    /// Number of input features
    n_features: usize,
    /// Class codes in training order
    classes: Vec<i64>,
    /// Individual trees
    trees: Vec<DecisionTree>,
}

impl RandomForestClassifier {
    /// Build a forest from fitted parts
    pub fn new(
        n_features: usize,
        classes: Vec<i64>,
        trees: Vec<DecisionTree>,
    ) -> std::result::Result<Self, ArtifactError> {
        let forest = Self { n_features, classes, trees };
        forest.validate()?;
        Ok(forest)
    }

    /// Load a forest from a JSON artifact
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ArtifactError> {
        let forest: Self = super::read_json(ARTIFACT, path.as_ref())?;
        forest.validate()?;
        Ok(forest)
    }

    fn validate(&self) -> std::result::Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::schema(ARTIFACT, "forest has no trees"));
        }
        if self.classes.is_empty() {
            return Err(ArtifactError::schema(ARTIFACT, "forest has no classes"));
        }

        let mut sorted = self.classes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != self.classes.len() {
            return Err(ArtifactError::schema(ARTIFACT, "duplicate class codes"));
        }

        for (idx, tree) in self.trees.iter().enumerate() {
            tree.root
                .validate(self.n_features, self.classes.len())
                .map_err(|reason| ArtifactError::schema(ARTIFACT, format!("tree {}: {}", idx, reason)))?;
        }

        Ok(())
    }

    fn check_shape(&self, x: &Array1<f64>) -> Result<()> {
        if x.len() != self.n_features {
            return Err(PredictionError::ShapeError {
                expected: self.n_features,
                actual: x.len(),
            });
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(PredictionError::Internal(
                "feature vector contains a non-finite value".to_string(),
            ));
        }
        Ok(())
    }

    /// Averaged class probabilities, aligned with [`classes`](Self::classes)
    pub fn probabilities(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        self.check_shape(x)?;

        // Collect in tree order before summing so results do not depend on scheduling
        let per_tree: Vec<Array1<f64>> = self.trees
            .par_iter()
            .map(|tree| tree.predict_proba(x))
            .collect::<Result<_>>()?;

        let mut proba: Array1<f64> = Array1::zeros(self.classes.len());
        for dist in &per_tree {
            proba += dist;
        }
        proba /= per_tree.len() as f64;

        Ok(proba)
    }

    /// Class probabilities as `(class code, probability)` in training class order
    pub fn predict_proba(&self, x: &Array1<f64>) -> Result<Vec<(i64, f64)>> {
        let proba = self.probabilities(x)?;
        Ok(self.classes.iter().copied().zip(proba.iter().copied()).collect())
    }

    /// Most probable class code; ties resolve to the earliest class
    pub fn predict_class(&self, x: &Array1<f64>) -> Result<i64> {
        let proba = self.predict_proba(x)?;
        Self::argmax(&proba).ok_or_else(|| {
            PredictionError::Internal("classifier returned no probabilities".to_string())
        })
    }

    /// First class with the highest probability in a `predict_proba` result
    pub fn argmax(proba: &[(i64, f64)]) -> Option<i64> {
        let (&first, rest) = proba.split_first()?;
        let (best, _) = rest
            .iter()
            .fold(first, |best, &item| if item.1 > best.1 { item } else { best });
        Some(best)
    }

    /// Class codes in training order
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Get number of trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(DecisionTree::depth).max().unwrap_or(0)
    }
}
