use thiserror::Error;

pub type CryptoResult<T> = Result<T, CryptoError>;

#[derive(Debug, Error)]
pub enum CryptoError {
    /// The blob is structurally too short to contain the salt + nonce prefix.
    #[error("malformed envelope: {len} bytes, shorter than the 28-byte fixed header")]
    MalformedEnvelope { len: usize },

    /// AEAD tag mismatch: wrong recovery phrase or tampered envelope.
    /// No partial plaintext is ever returned.
    #[error("envelope authentication failure: wrong recovery phrase or tampered data")]
    AuthenticationFailure,

    #[error("invalid recovery mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("envelope encryption failed: {0}")]
    Encryption(String),
}
