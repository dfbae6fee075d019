use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::embedding::DETECTION_THRESHOLD;
use crate::error::{FvError, FvResult};

/// Top-level gateway configuration (loaded from facevault.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FvConfig {
    pub custody: CustodyConfig,
    pub kdf: KdfConfig,
    pub scheme: SchemeConfig,
    pub detection: DetectionConfig,
    pub logging: LoggingConfig,
}

impl FvConfig {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> FvResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| FvError::Config(format!("{}: {e}", path.display())))
    }
}

/// Session custody of opened (plaintext) contexts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CustodyConfig {
    /// Directory holding per-session context files (one `<session>.ctx` each)
    pub dir: PathBuf,
}

/// Argon2id parameters for the envelope key derivation.
///
/// Seal and open must run with identical values or the derived keys silently
/// differ and every AEAD open fails authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfConfig {
    /// Memory cost in KiB (default: 65536 = 64 MiB)
    pub mem_cost_kib: u32,
    /// Time cost / iterations (default: 1)
    pub time_cost: u32,
    /// Parallel lanes (default: 4)
    pub lanes: u32,
}

/// CKKS scheme parameters for context generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeConfig {
    /// Ring dimension, a power of two (default: 8192)
    pub poly_modulus_degree: usize,
    /// Coefficient-modulus chain bit sizes (default: [60, 40, 40, 60])
    pub coeff_mod_bit_sizes: Vec<u8>,
    /// Global scale exponent; encoded values are scaled by 2^scale_bits
    pub scale_bits: u8,
}

/// Face-detection acceptance policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Minimum detection confidence for an embedding to be accepted
    pub min_score: f64,
    /// Expected embedding dimension from the face-analysis model
    pub embedding_dim: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl Default for CustodyConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("/run/facevault/sessions"),
        }
    }
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            mem_cost_kib: 65536,
            time_cost: 1,
            lanes: 4,
        }
    }
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            poly_modulus_degree: 8192,
            coeff_mod_bit_sizes: vec![60, 40, 40, 60],
            scale_bits: 40,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_score: DETECTION_THRESHOLD,
            embedding_dim: 512,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}
