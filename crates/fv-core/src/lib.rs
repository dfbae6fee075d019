pub mod config;
pub mod embedding;
pub mod error;
pub mod types;

pub use embedding::{FaceEmbedding, NormalizedEmbedding, DETECTION_THRESHOLD};
pub use error::{FvError, FvResult};
pub use types::SessionId;
