//! Binary logistic regression over sparse term counts
//!
//! Weights and intercept are fitted offline and loaded as an artifact; this
//! module only evaluates the fitted function. Class 1 is the genuine class,
//! class 0 the fake class, and the decision boundary sits at score zero
//! with ties resolved toward class 0.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::errors::{InferenceError, LoadError};
use crate::vectorizer::FeatureVector;

/// Fitted binary logistic regression model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    /// One weight per feature index of the fitted vocabulary.
    pub weights: Vec<f64>,
    /// Bias term added to every decision score.
    pub intercept: f64,
}

impl LogisticModel {
    pub fn new(weights: Vec<f64>, intercept: f64) -> Self {
        Self { weights, intercept }
    }

    /// Number of features the model was fitted on.
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    /// Check structural soundness of the fitted parameters.
    ///
    /// The model must cover at least one feature and every parameter must
    /// be finite; a NaN or infinite weight would poison every score.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.weights.is_empty() {
            return Err(LoadError::InvalidModel("weight vector is empty".to_string()));
        }
        if let Some(position) = self.weights.iter().position(|w| !w.is_finite()) {
            return Err(LoadError::InvalidModel(format!(
                "weight at index {position} is not finite"
            )));
        }
        if !self.intercept.is_finite() {
            return Err(LoadError::InvalidModel("intercept is not finite".to_string()));
        }
        Ok(())
    }

    /// Raw decision score for a sparse feature vector.
    ///
    /// Computes `intercept + sum(weight[i] * count)` over the present
    /// indices. The empty vector is valid input and scores exactly the
    /// intercept.
    pub fn decision_score(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let mut score = self.intercept;
        for &(index, count) in features {
            let Some(weight) = self.weights.get(index) else {
                warn!("Feature index {} out of bounds for dimension {}", index, self.weights.len());
                return Err(InferenceError::FeatureOutOfBounds {
                    index,
                    dimension: self.weights.len(),
                });
            };
            score += weight * count;
        }
        if !score.is_finite() {
            warn!("Non-finite decision score from {} features", features.len());
            return Err(InferenceError::NonFiniteScore);
        }
        Ok(score)
    }

    /// Probability distribution `[p_fake, p_genuine]` for a feature vector.
    ///
    /// The two entries always sum to 1 and each lies in `(0, 1)`.
    ///
    /// # Example
    /// ```
    /// use veridict_core::LogisticModel;
    ///
    /// let model = LogisticModel::new(vec![2.0, -1.0], 0.0);
    /// let probabilities = model.predict_proba(&vec![(0, 1.0)]).unwrap();
    /// assert!(probabilities[1] > probabilities[0]);
    /// assert!((probabilities[0] + probabilities[1] - 1.0).abs() < 1e-12);
    /// ```
    pub fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2], InferenceError> {
        let score = self.decision_score(features)?;
        let genuine = sigmoid(score);
        Ok([1.0 - genuine, genuine])
    }

    /// Stable content fingerprint of the fitted parameters.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(b"veridict.model.v1");
        hasher.update((self.weights.len() as u64).to_be_bytes());
        for weight in &self.weights {
            hasher.update(weight.to_be_bytes());
        }
        hasher.update(self.intercept.to_be_bytes());
        hex::encode(hasher.finalize())
    }

    /// Load and validate a model from a JSON artifact.
    pub fn from_json_file(path: &Path) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_slice(&bytes).map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Load and validate a model from a bincode artifact.
    pub fn from_binary_file(path: &Path) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = bincode::deserialize(&bytes).map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Write the model as a pretty-printed JSON artifact.
    pub fn save_json(&self, path: &Path) -> Result<(), LoadError> {
        let data = serde_json::to_vec_pretty(self).map_err(|e| LoadError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, data).map_err(|e| LoadError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Write the model as a bincode artifact.
    pub fn save_binary(&self, path: &Path) -> Result<(), LoadError> {
        let data = bincode::serialize(self).map_err(|e| LoadError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, data).map_err(|e| LoadError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Numerically stable logistic function.
///
/// Splitting on the sign keeps the exponent argument non-positive, so
/// neither branch can overflow for finite input.
fn sigmoid(score: f64) -> f64 {
    if score >= 0.0 {
        1.0 / (1.0 + (-score).exp())
    } else {
        let e = score.exp();
        e / (1.0 + e)
    }
}
