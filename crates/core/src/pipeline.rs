//! Classification pipeline
//!
//! Pairs a validated vectorizer with a validated model and runs the full
//! normalize, transform, predict chain. The pipeline is immutable once
//! constructed, so a single instance can be shared freely across threads.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{InferenceError, LoadError};
use crate::model::LogisticModel;
use crate::normalize::normalize;
use crate::vectorizer::CountVectorizer;

/// Verdict class for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Genuine,
    Fake,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Genuine => "genuine",
            Label::Fake => "fake",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Winning class.
    pub label: Label,
    /// Probability of the winning class, in `[0, 1]`.
    pub confidence: f64,
}

impl Classification {
    /// Pick the winning class from a `[p_fake, p_genuine]` distribution.
    ///
    /// Confidence is the maximum of the two entries. A tied distribution
    /// resolves to `Fake`, matching a decision score of exactly zero.
    pub fn from_probabilities(probabilities: [f64; 2]) -> Self {
        let [fake, genuine] = probabilities;
        if genuine > fake {
            Self {
                label: Label::Genuine,
                confidence: genuine,
            }
        } else {
            Self {
                label: Label::Fake,
                confidence: fake,
            }
        }
    }
}

impl fmt::Display for Classification {
    /// Renders as `label (confidence)` with two decimal places, e.g.
    /// `genuine (0.87)`. The stored confidence keeps full precision.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.label, self.confidence)
    }
}

/// Immutable vectorizer and model pair.
///
/// Construction validates both artifacts and their dimensional agreement;
/// after that every classification is pure computation over shared state,
/// so `&ClassifierPipeline` is safe to hand to any number of threads.
#[derive(Debug, Clone)]
pub struct ClassifierPipeline {
    vectorizer: CountVectorizer,
    model: LogisticModel,
}

impl ClassifierPipeline {
    /// Pair a vectorizer with a model, validating both.
    ///
    /// Fails with the first structural problem found, or with
    /// [`LoadError::DimensionMismatch`] when the two artifacts disagree on
    /// the feature-space dimension.
    pub fn new(vectorizer: CountVectorizer, model: LogisticModel) -> Result<Self, LoadError> {
        vectorizer.validate()?;
        model.validate()?;
        if vectorizer.dimension() != model.dimension() {
            return Err(LoadError::DimensionMismatch {
                vectorizer: vectorizer.dimension(),
                model: model.dimension(),
            });
        }
        Ok(Self { vectorizer, model })
    }

    /// Load the artifact pair from JSON files and construct the pipeline.
    ///
    /// Intended to run once at application startup; any error here is
    /// fatal for classification service.
    pub fn load(vectorizer_path: &Path, model_path: &Path) -> Result<Self, LoadError> {
        let vectorizer = CountVectorizer::from_json_file(vectorizer_path)?;
        let model = LogisticModel::from_json_file(model_path)?;
        let pipeline = Self::new(vectorizer, model)?;
        info!(
            "Classifier loaded: {} terms, vectorizer {}, model {}",
            pipeline.vectorizer.dimension(),
            &pipeline.vectorizer.fingerprint()[..12],
            &pipeline.model.fingerprint()[..12]
        );
        Ok(pipeline)
    }

    /// Classify one review.
    ///
    /// Normalizes the text, maps it onto the fitted feature space and
    /// evaluates the model. Total over all string input; text that
    /// normalizes to nothing is scored as the zero vector. Rejecting blank
    /// submissions is the caller's concern, not this function's.
    pub fn classify(&self, text: &str) -> Result<Classification, InferenceError> {
        let canonical = normalize(text);
        let features = self.vectorizer.transform(&canonical);
        let probabilities = self.model.predict_proba(&features)?;
        let classification = Classification::from_probabilities(probabilities);
        debug!(
            "Classified review: {} active features, verdict {}",
            features.len(),
            classification
        );
        Ok(classification)
    }

    pub fn vectorizer(&self) -> &CountVectorizer {
        &self.vectorizer
    }

    pub fn model(&self) -> &LogisticModel {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_pipeline() -> ClassifierPipeline {
        let vocabulary = BTreeMap::from([
            ("amazing".to_string(), 0),
            ("great".to_string(), 1),
            ("scam".to_string(), 2),
            ("terrible".to_string(), 3),
        ]);
        let vectorizer = CountVectorizer::new(vocabulary);
        let model = LogisticModel::new(vec![1.2, 0.8, -2.5, -1.7], 0.1);
        ClassifierPipeline::new(vectorizer, model).unwrap()
    }

    #[test]
    fn test_new_rejects_dimension_mismatch() {
        let vocabulary = BTreeMap::from([("great".to_string(), 0)]);
        let vectorizer = CountVectorizer::new(vocabulary);
        let model = LogisticModel::new(vec![1.0, 2.0], 0.0);
        assert!(matches!(
            ClassifierPipeline::new(vectorizer, model),
            Err(LoadError::DimensionMismatch {
                vectorizer: 1,
                model: 2
            })
        ));
    }

    #[test]
    fn test_classify_positive_review_is_genuine() {
        let pipeline = sample_pipeline();
        let verdict = pipeline.classify("Great product!! <b>AMAZING</b>").unwrap();
        assert_eq!(verdict.label, Label::Genuine);
        assert!(verdict.confidence > 0.5 && verdict.confidence <= 1.0);
    }

    #[test]
    fn test_classify_negative_review_is_fake() {
        let pipeline = sample_pipeline();
        let verdict = pipeline.classify("scam scam terrible").unwrap();
        assert_eq!(verdict.label, Label::Fake);
        assert!(verdict.confidence > 0.5);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let pipeline = sample_pipeline();
        let first = pipeline.classify("great amazing purchase").unwrap();
        for _ in 0..10 {
            assert_eq!(pipeline.classify("great amazing purchase").unwrap(), first);
        }
    }

    #[test]
    fn test_classify_ignores_case_and_noise() {
        let pipeline = sample_pipeline();
        let plain = pipeline.classify("great amazing").unwrap();
        let noisy = pipeline.classify("GREAT!!! 999 <i>amazing</i>...").unwrap();
        assert_eq!(plain, noisy);
    }

    #[test]
    fn test_classify_blank_text_scores_zero_vector() {
        let pipeline = sample_pipeline();
        let verdict = pipeline.classify("   \n\t ").unwrap();
        // Score is the bare intercept (0.1 > 0), so the empty review leans
        // genuine under this fitted model.
        assert_eq!(verdict.label, Label::Genuine);
    }

    #[test]
    fn test_confidence_is_max_of_distribution() {
        let pipeline = sample_pipeline();
        let verdict = pipeline.classify("terrible scam great").unwrap();
        let canonical = normalize("terrible scam great");
        let features = pipeline.vectorizer().transform(&canonical);
        let [fake, genuine] = pipeline.model().predict_proba(&features).unwrap();
        assert_eq!(verdict.confidence, fake.max(genuine));
    }

    #[test]
    fn test_tied_distribution_resolves_to_fake() {
        let classification = Classification::from_probabilities([0.5, 0.5]);
        assert_eq!(classification.label, Label::Fake);
        assert_eq!(classification.confidence, 0.5);
    }

    #[test]
    fn test_display_rounds_to_two_decimals() {
        let classification = Classification {
            label: Label::Genuine,
            confidence: 0.876_54,
        };
        assert_eq!(classification.to_string(), "genuine (0.88)");

        let other = Classification {
            label: Label::Fake,
            confidence: 0.5,
        };
        assert_eq!(other.to_string(), "fake (0.50)");
    }

    #[test]
    fn test_label_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Label::Genuine).unwrap(), "\"genuine\"");
        assert_eq!(serde_json::to_string(&Label::Fake).unwrap(), "\"fake\"");
    }

    #[test]
    fn test_pipeline_shared_across_threads() {
        let pipeline = std::sync::Arc::new(sample_pipeline());
        let expected = pipeline.classify("great amazing").unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pipeline = std::sync::Arc::clone(&pipeline);
                std::thread::spawn(move || pipeline.classify("great amazing").unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
