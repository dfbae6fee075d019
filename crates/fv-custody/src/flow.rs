//! Registration and verification adapters
//!
//! The encrypted-ciphertext flow: embeddings are accepted against the
//! detection policy, unit-normalized, and encrypted under the session's
//! context before anything leaves the gateway. Verification decrypts the
//! similarity ciphertext computed upstream and extracts the single
//! meaningful scalar at index 0.

use fv_ckks::{CkksContext, EncryptedVector};
use fv_core::config::DetectionConfig;
use fv_core::{FaceEmbedding, FvError, NormalizedEmbedding, SessionId};

use crate::error::CustodyResult;
use crate::manager::CustodyManager;

/// Accept, normalize, and encrypt one embedding under an opened context.
pub fn encrypt_embedding(
    context: &CkksContext,
    embedding: FaceEmbedding,
    policy: &DetectionConfig,
) -> CustodyResult<EncryptedVector> {
    if embedding.vector.len() != policy.embedding_dim {
        return Err(FvError::EmbeddingDimension {
            got: embedding.vector.len(),
            expected: policy.embedding_dim,
        }
        .into());
    }

    let accepted = embedding.accept(policy.min_score)?;
    let normalized = NormalizedEmbedding::new(&accepted.vector)?;

    Ok(fv_ckks::encrypt(context, normalized.as_slice())?)
}

/// Decrypt an upstream similarity result; only index 0 is meaningful.
pub fn similarity_score(
    context: &CkksContext,
    result: &EncryptedVector,
) -> CustodyResult<f64> {
    Ok(fv_ckks::decrypt_score(context, result)?)
}

impl CustodyManager {
    /// Registration/verification entry point: encrypt an embedding under the
    /// session's opened context.
    pub fn encrypt_for_session(
        &self,
        session: &SessionId,
        embedding: FaceEmbedding,
        policy: &DetectionConfig,
    ) -> CustodyResult<EncryptedVector> {
        let context = self.opened_context(session)?;
        encrypt_embedding(&context, embedding, policy)
    }

    /// Decrypt the upstream similarity ciphertext with the session's context.
    pub fn score_for_session(
        &self,
        session: &SessionId,
        result: &EncryptedVector,
    ) -> CustodyResult<f64> {
        let context = self.opened_context(session)?;
        similarity_score(&context, result)
    }
}
