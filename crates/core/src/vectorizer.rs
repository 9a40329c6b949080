//! Fixed-vocabulary term counting
//!
//! The vectorizer carries the vocabulary the model was trained against and
//! maps canonical text onto that feature space. Vocabulary and weights are
//! fitted offline; at runtime the mapping is frozen, so tokens outside the
//! vocabulary contribute nothing rather than growing the dimension.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::LoadError;

/// Sparse feature vector: `(feature index, term count)` pairs in ascending
/// index order. Absent indices are implicitly zero.
pub type FeatureVector = Vec<(usize, f64)>;

/// Token-to-index vocabulary fitted offline.
///
/// The map is ordered so that serialization and fingerprinting are stable
/// across runs regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountVectorizer {
    /// Canonical token to feature index, a bijection onto `0..dimension`.
    pub vocabulary: BTreeMap<String, usize>,
}

impl CountVectorizer {
    pub fn new(vocabulary: BTreeMap<String, usize>) -> Self {
        Self { vocabulary }
    }

    /// Number of features this vectorizer produces.
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check structural soundness of the vocabulary.
    ///
    /// Tokens must be non-empty and free of whitespace (a token containing
    /// whitespace can never come out of tokenization), and the indices must
    /// form a permutation of `0..dimension` so every transform output stays
    /// inside the model's weight vector.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.vocabulary.is_empty() {
            return Err(LoadError::InvalidVectorizer(
                "vocabulary is empty".to_string(),
            ));
        }

        let dimension = self.vocabulary.len();
        let mut seen = vec![false; dimension];

        for (token, &index) in &self.vocabulary {
            if token.is_empty() {
                return Err(LoadError::InvalidVectorizer(
                    "vocabulary contains an empty token".to_string(),
                ));
            }
            if token.chars().any(char::is_whitespace) {
                return Err(LoadError::InvalidVectorizer(format!(
                    "token {token:?} contains whitespace"
                )));
            }
            if index >= dimension {
                return Err(LoadError::InvalidVectorizer(format!(
                    "token {token:?} has index {index} outside 0..{dimension}"
                )));
            }
            if seen[index] {
                return Err(LoadError::InvalidVectorizer(format!(
                    "feature index {index} assigned to more than one token"
                )));
            }
            seen[index] = true;
        }

        Ok(())
    }

    /// Map canonical text onto the fitted feature space.
    ///
    /// Splits on whitespace and counts occurrences of known tokens; unknown
    /// tokens are skipped. Infallible and total: empty canonical text yields
    /// an empty vector, which is the all-zeros point of the feature space.
    pub fn transform(&self, canonical_text: &str) -> FeatureVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in canonical_text.split_whitespace() {
            if let Some(&index) = self.vocabulary.get(token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }
        counts.into_iter().collect()
    }

    /// Stable content fingerprint of the vocabulary.
    ///
    /// Hashes a length-prefixed encoding of every `(token, index)` pair in
    /// map order, so equal vocabularies fingerprint identically no matter
    /// how they were built or stored.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(b"veridict.vectorizer.v1");
        hasher.update((self.vocabulary.len() as u64).to_be_bytes());
        for (token, &index) in &self.vocabulary {
            hasher.update((token.len() as u64).to_be_bytes());
            hasher.update(token.as_bytes());
            hasher.update((index as u64).to_be_bytes());
        }
        hex::encode(hasher.finalize())
    }

    /// Load and validate a vectorizer from a JSON artifact.
    pub fn from_json_file(path: &Path) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let vectorizer: Self =
            serde_json::from_slice(&bytes).map_err(|e| LoadError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Load and validate a vectorizer from a bincode artifact.
    pub fn from_binary_file(path: &Path) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let vectorizer: Self =
            bincode::deserialize(&bytes).map_err(|e| LoadError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Write the vectorizer as a pretty-printed JSON artifact.
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

    /// Write the vectorizer as a bincode artifact.
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vectorizer() -> CountVectorizer {
        let vocabulary = BTreeMap::from([
            ("amazing".to_string(), 0),
            ("great".to_string(), 1),
            ("product".to_string(), 2),
            ("terrible".to_string(), 3),
        ]);
        CountVectorizer::new(vocabulary)
    }

    #[test]
    fn test_transform_counts_known_tokens() {
        let vectorizer = sample_vectorizer();
        let features = vectorizer.transform("great great product amazing");
        assert_eq!(features, vec![(0, 1.0), (1, 2.0), (2, 1.0)]);
    }

    #[test]
    fn test_transform_skips_unknown_tokens() {
        let vectorizer = sample_vectorizer();
        let features = vectorizer.transform("utterly great unknown words");
        assert_eq!(features, vec![(1, 1.0)]);
    }

    #[test]
    fn test_transform_empty_text_is_zero_vector() {
        let vectorizer = sample_vectorizer();
        assert!(vectorizer.transform("").is_empty());
    }

    #[test]
    fn test_transform_output_sorted_by_index() {
        let vectorizer = sample_vectorizer();
        let features = vectorizer.transform("terrible amazing product great");
        let indices: Vec<usize> = features.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample_vectorizer().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_vocabulary() {
        let vectorizer = CountVectorizer::new(BTreeMap::new());
        assert!(matches!(
            vectorizer.validate(),
            Err(LoadError::InvalidVectorizer(_))
        ));
    }

    #[test]
    fn test_validate_rejects_index_gap() {
        let vocabulary = BTreeMap::from([
            ("great".to_string(), 0),
            ("product".to_string(), 2),
        ]);
        let vectorizer = CountVectorizer::new(vocabulary);
        assert!(matches!(
            vectorizer.validate(),
            Err(LoadError::InvalidVectorizer(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_index() {
        let vocabulary = BTreeMap::from([
            ("great".to_string(), 0),
            ("product".to_string(), 0),
        ]);
        let vectorizer = CountVectorizer::new(vocabulary);
        assert!(matches!(
            vectorizer.validate(),
            Err(LoadError::InvalidVectorizer(_))
        ));
    }

    #[test]
    fn test_validate_rejects_whitespace_token() {
        let vocabulary = BTreeMap::from([
            ("great product".to_string(), 0),
            ("amazing".to_string(), 1),
        ]);
        let vectorizer = CountVectorizer::new(vocabulary);
        assert!(matches!(
            vectorizer.validate(),
            Err(LoadError::InvalidVectorizer(_))
        ));
    }

    #[test]
    fn test_fingerprint_is_stable_and_content_sensitive() {
        let a = sample_vectorizer();
        let b = sample_vectorizer();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let mut shifted = sample_vectorizer();
        shifted.vocabulary.insert("awful".to_string(), 3);
        shifted.vocabulary.insert("terrible".to_string(), 4);
        assert_ne!(a.fingerprint(), shifted.fingerprint());
    }
}
