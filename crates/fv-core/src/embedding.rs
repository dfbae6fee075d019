//! Face embeddings and unit normalization
//!
//! The face-analysis model returns a fixed-dimension real vector per detected
//! face plus a confidence score. Embeddings are normalized to unit L2 norm
//! before encryption so the upstream encrypted similarity reduces to a plain
//! dot product.

use serde::{Deserialize, Serialize};

use crate::error::{FvError, FvResult};

/// Default minimum detection confidence, matching the gateway's acceptance
/// policy for the face-analysis collaborator.
pub const DETECTION_THRESHOLD: f64 = 0.3;

/// A raw embedding from the face-analysis model.
///
/// Ephemeral: exists only within a single request's processing and is never
/// persisted in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceEmbedding {
    pub vector: Vec<f64>,
    /// Detection confidence in [0, 1]
    pub detection_score: f64,
}

impl FaceEmbedding {
    pub fn new(vector: Vec<f64>, detection_score: f64) -> Self {
        Self {
            vector,
            detection_score,
        }
    }

    /// Apply the acceptance policy: a below-threshold detection is a
    /// data-quality rejection, not a crypto error.
    pub fn accept(self, threshold: f64) -> FvResult<Self> {
        if self.detection_score < threshold {
            return Err(FvError::LowConfidenceDetection {
                score: self.detection_score,
                threshold,
            });
        }
        Ok(self)
    }
}

/// An embedding scaled to unit L2 norm.
///
/// Never constructed from a zero vector; `new` fails fast instead.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEmbedding(Vec<f64>);

impl NormalizedEmbedding {
    pub fn new(vector: &[f64]) -> FvResult<Self> {
        let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Err(FvError::ZeroVector);
        }
        Ok(Self(vector.iter().map(|x| x / norm).collect()))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l2_norm(v: &[f64]) -> f64 {
        v.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    #[test]
    fn test_normalize_unit_norm() {
        let n = NormalizedEmbedding::new(&[3.0, 4.0]).unwrap();
        assert!((l2_norm(n.as_slice()) - 1.0).abs() < 1e-12);
        assert!((n.as_slice()[0] - 0.6).abs() < 1e-12);
        assert!((n.as_slice()[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_idempotent() {
        let once = NormalizedEmbedding::new(&[1.0, -2.0, 0.5, 7.25]).unwrap();
        let twice = NormalizedEmbedding::new(once.as_slice()).unwrap();
        for (a, b) in once.as_slice().iter().zip(twice.as_slice()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_normalize_zero_vector_fails() {
        let result = NormalizedEmbedding::new(&[0.0; 16]);
        assert!(matches!(result, Err(FvError::ZeroVector)));
    }

    #[test]
    fn test_normalize_empty_vector_fails() {
        // An empty vector has zero norm
        assert!(matches!(
            NormalizedEmbedding::new(&[]),
            Err(FvError::ZeroVector)
        ));
    }

    #[test]
    fn test_accept_below_threshold() {
        let emb = FaceEmbedding::new(vec![1.0, 2.0], 0.2);
        let result = emb.accept(DETECTION_THRESHOLD);
        assert!(matches!(
            result,
            Err(FvError::LowConfidenceDetection { score, threshold })
                if score == 0.2 && threshold == DETECTION_THRESHOLD
        ));
    }

    #[test]
    fn test_accept_at_threshold() {
        let emb = FaceEmbedding::new(vec![1.0, 2.0], DETECTION_THRESHOLD);
        assert!(emb.accept(DETECTION_THRESHOLD).is_ok());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_normalized_has_unit_norm(
                v in prop::collection::vec(-1e6f64..1e6, 1..256)
            ) {
                prop_assume!(l2_norm(&v) > 1e-9);
                let n = NormalizedEmbedding::new(&v).unwrap();
                prop_assert!((l2_norm(n.as_slice()) - 1.0).abs() < 1e-9);
            }

            #[test]
            fn prop_normalize_idempotent(
                v in prop::collection::vec(-1e6f64..1e6, 1..256)
            ) {
                prop_assume!(l2_norm(&v) > 1e-9);
                let once = NormalizedEmbedding::new(&v).unwrap();
                let twice = NormalizedEmbedding::new(once.as_slice()).unwrap();
                for (a, b) in once.as_slice().iter().zip(twice.as_slice()) {
                    prop_assert!((a - b).abs() < 1e-9);
                }
            }
        }
    }
}
