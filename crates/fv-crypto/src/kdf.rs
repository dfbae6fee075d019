//! Key derivation: Argon2id mnemonic seed → envelope key

use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroize;

use crate::error::{CryptoError, CryptoResult};
use crate::{KEY_SIZE, SALT_LEN};

/// A 256-bit envelope key derived from a mnemonic seed via Argon2id.
///
/// Zeroized on drop to prevent secrets lingering in memory.
#[derive(Clone)]
pub struct SymmetricKey {
    bytes: [u8; KEY_SIZE],
}

impl SymmetricKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Argon2id parameters for the envelope KDF.
///
/// Seal and open must use identical values; a mismatch silently derives a
/// different key and every subsequent AEAD open fails authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 65536 = 64 MiB)
    pub mem_cost_kib: u32,
    /// Time cost / iterations (default: 1)
    pub time_cost: u32,
    /// Parallel lanes (default: 4)
    pub lanes: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            mem_cost_kib: 65536,
            time_cost: 1,
            lanes: 4,
        }
    }
}

impl KdfParams {
    /// Cheap profile for tests; never use for real envelopes.
    pub fn insecure_fast() -> Self {
        Self {
            mem_cost_kib: 1024,
            time_cost: 1,
            lanes: 1,
        }
    }
}

/// Derive a 256-bit envelope key from a mnemonic seed and salt using Argon2id.
///
/// The salt is 16 bytes, freshly random per seal, and stored in the envelope
/// prefix (it does not need to be secret). No associated data and no secret
/// beyond the seed itself. Deterministic: the same (seed, salt) always yields
/// the same key.
pub fn derive_key(
    seed: &[u8],
    salt: &[u8; SALT_LEN],
    params: &KdfParams,
) -> CryptoResult<SymmetricKey> {
    let argon2_params = Params::new(
        params.mem_cost_kib,
        params.time_cost,
        params.lanes,
        Some(KEY_SIZE),
    )
    .map_err(|e| CryptoError::KeyDerivation(format!("invalid Argon2id params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut key = [0u8; KEY_SIZE];
    argon2
        .hash_password_into(seed, salt, &mut key)
        .map_err(|e| CryptoError::KeyDerivation(format!("Argon2id failed: {e}")))?;

    Ok(SymmetricKey::from_bytes(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kdf_deterministic() {
        let seed = [7u8; 64];
        let salt = [1u8; SALT_LEN];
        let params = KdfParams::insecure_fast();

        let key1 = derive_key(&seed, &salt, &params).unwrap();
        let key2 = derive_key(&seed, &salt, &params).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes(), "KDF must be deterministic");
    }

    #[test]
    fn test_kdf_different_seeds() {
        let salt = [1u8; SALT_LEN];
        let params = KdfParams::insecure_fast();

        let key1 = derive_key(&[1u8; 64], &salt, &params).unwrap();
        let key2 = derive_key(&[2u8; 64], &salt, &params).unwrap();

        assert_ne!(
            key1.as_bytes(),
            key2.as_bytes(),
            "different seeds must produce different keys"
        );
    }

    #[test]
    fn test_kdf_different_salts() {
        let seed = [7u8; 64];
        let params = KdfParams::insecure_fast();

        let key1 = derive_key(&seed, &[1u8; SALT_LEN], &params).unwrap();
        let key2 = derive_key(&seed, &[2u8; SALT_LEN], &params).unwrap();

        assert_ne!(
            key1.as_bytes(),
            key2.as_bytes(),
            "different salts must produce different keys"
        );
    }

    #[test]
    fn test_kdf_different_params_differ() {
        let seed = [7u8; 64];
        let salt = [1u8; SALT_LEN];

        let fast = KdfParams::insecure_fast();
        let heavier = KdfParams {
            mem_cost_kib: 2048,
            ..KdfParams::insecure_fast()
        };

        let key1 = derive_key(&seed, &salt, &fast).unwrap();
        let key2 = derive_key(&seed, &salt, &heavier).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_key_debug_redacted() {
        let key = SymmetricKey::from_bytes([42u8; KEY_SIZE]);
        let debug = format!("{key:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("42"));
    }
}
