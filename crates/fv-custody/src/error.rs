use fv_ckks::CkksError;
use fv_core::{FvError, SessionId};
use fv_crypto::CryptoError;
use thiserror::Error;

pub type CustodyResult<T> = Result<T, CustodyError>;

#[derive(Debug, Error)]
pub enum CustodyError {
    /// No opened context exists for this session.
    #[error("no opened context for session {0}")]
    ContextNotFound(SessionId),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Ckks(#[from] CkksError),

    #[error(transparent)]
    Core(#[from] FvError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CustodyError {
    /// True when the failure is the AEAD tag mismatch (wrong phrase or
    /// tampered envelope). Retrying with the same inputs always fails again.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::Crypto(CryptoError::AuthenticationFailure))
    }
}
