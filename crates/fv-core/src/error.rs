use thiserror::Error;

pub type FvResult<T> = Result<T, FvError>;

/// Data-quality and boundary errors shared across the gateway core.
///
/// Every variant is recoverable at the request boundary; error messages must
/// never carry mnemonic phrases or key material.
#[derive(Debug, Error)]
pub enum FvError {
    #[error("cannot normalize a zero-norm embedding")]
    ZeroVector,

    #[error("face detection score {score:.3} below acceptance threshold {threshold:.3}")]
    LowConfidenceDetection { score: f64, threshold: f64 },

    #[error("embedding has {got} components, expected {expected}")]
    EmbeddingDimension { got: usize, expected: usize },

    #[error("invalid session id: {0}")]
    InvalidSessionId(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
