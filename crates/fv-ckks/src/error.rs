use thiserror::Error;

pub type CkksResult<T> = Result<T, CkksError>;

#[derive(Debug, Error)]
pub enum CkksError {
    /// Decrypt attempted on a public-only context.
    #[error("context holds no secret key; decryption requires the full context")]
    MissingSecretKey,

    #[error("vector of {len} components exceeds the {slots} slots of this context")]
    VectorTooLong { len: usize, slots: usize },

    /// A scaled component would not fit under the ciphertext modulus.
    #[error("component {index} too large to encode at the configured scale")]
    EncodingOverflow { index: usize },

    #[error("invalid scheme parameters: {0}")]
    InvalidParams(String),

    #[error("context serialization failed: {0}")]
    Serialization(String),
}
