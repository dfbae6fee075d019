use serde::{Deserialize, Serialize};

use crate::error::{FvError, FvResult};

/// An authenticated session identifier, used to key custody files.
///
/// Restricted to a filename-safe alphabet so a session id can never escape
/// the custody directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    pub fn new(raw: impl Into<String>) -> FvResult<Self> {
        let raw = raw.into();
        if raw.is_empty() || raw.len() > 128 {
            return Err(FvError::InvalidSessionId(format!(
                "length {} out of range 1..=128",
                raw.len()
            )));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(FvError::InvalidSessionId(
                "allowed characters are [A-Za-z0-9._-]".into(),
            ));
        }
        // "." and ".." are valid per the alphabet but are path components
        if raw.chars().all(|c| c == '.') {
            return Err(FvError::InvalidSessionId("dots-only id".into()));
        }
        Ok(Self(raw))
    }

    /// A fresh random session id (UUIDv4).
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SessionId {
    type Error = FvError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionId> for String {
    fn from(value: SessionId) -> Self {
        value.0
    }
}

/// Base64 helpers for binary blobs carried in JSON (envelopes, ciphertexts).
pub mod b64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    pub fn encode(data: &[u8]) -> String {
        STANDARD.encode(data)
    }

    pub fn decode(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(data)
    }
}
