//! Deterministic review classification core
//!
//! Normalizes raw review text into a canonical form and scores it with a
//! fitted vectorizer and logistic regression pair loaded once from disk.
//! The same text against the same artifact pair always produces the same
//! verdict, on any thread.
//!
//! Modules:
//! - `normalize`: Canonical text normalization
//! - `vectorizer`: Fixed-vocabulary term counting
//! - `model`: Binary logistic regression evaluation
//! - `pipeline`: Artifact pairing and the classify entry point
//! - `errors`: Load-time and inference-time error taxonomy

pub mod errors;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod vectorizer;

pub use errors::{InferenceError, LoadError};
pub use model::LogisticModel;
pub use normalize::normalize;
pub use pipeline::{Classification, ClassifierPipeline, Label};
pub use vectorizer::{CountVectorizer, FeatureVector};

/// Crate version string for artifact reports and diagnostics
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_public_surface_end_to_end() {
        let vocabulary = BTreeMap::from([
            ("amazing".to_string(), 0),
            ("great".to_string(), 1),
            ("product".to_string(), 2),
        ]);
        let vectorizer = CountVectorizer::new(vocabulary);
        let model = LogisticModel::new(vec![1.0, 1.0, 0.5], -0.25);
        let pipeline = ClassifierPipeline::new(vectorizer, model).unwrap();

        let verdict = pipeline
            .classify("Great product!! 5/5 <b>AMAZING</b>")
            .unwrap();
        assert_eq!(verdict.label, Label::Genuine);

        let again = pipeline
            .classify("Great product!! 5/5 <b>AMAZING</b>")
            .unwrap();
        assert_eq!(verdict, again);
    }
}
