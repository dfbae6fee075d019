//! BIP-39 recovery mnemonic generation and seed expansion
//!
//! A 24-word English mnemonic (256 bits of entropy plus checksum) is generated
//! when a context is sealed. It is shown to the user exactly once and never
//! stored server-side; losing it means the sealed context is unrecoverable.
//! `to_seed` is the standard BIP-39 PBKDF2-HMAC-SHA512 stretch with an empty
//! passphrase, so the phrase alone deterministically reproduces the seed.

use bip39::Mnemonic;
use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroize;

use crate::error::{CryptoError, CryptoResult};

/// Byte length of the expanded BIP-39 seed
pub const SEED_LEN: usize = 64;

/// The fixed-length seed expanded from a recovery phrase. Zeroized on drop.
pub struct Seed {
    bytes: [u8; SEED_LEN],
}

impl Seed {
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.bytes
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seed").field("bytes", &"[REDACTED]").finish()
    }
}

/// A 24-word recovery phrase, held behind `SecretString` so it never ends up
/// in logs or debug output. Surfaced to the user exactly once via
/// `expose_phrase`.
pub struct RecoveryMnemonic {
    phrase: SecretString,
}

impl RecoveryMnemonic {
    /// Generate a fresh 24-word mnemonic from 256 bits of OS entropy.
    pub fn generate() -> CryptoResult<Self> {
        let mut entropy = [0u8; 32];
        OsRng.fill_bytes(&mut entropy);

        let mnemonic = Mnemonic::from_entropy(&entropy)
            .map_err(|e| CryptoError::InvalidMnemonic(format!("generation failed: {e}")))?;
        entropy.zeroize();

        Ok(Self {
            phrase: SecretString::from(mnemonic.to_string()),
        })
    }

    /// Wrap a user-supplied phrase, validating words and checksum.
    pub fn from_phrase(phrase: &str) -> CryptoResult<Self> {
        let mnemonic: Mnemonic = phrase
            .parse()
            .map_err(|e| CryptoError::InvalidMnemonic(format!("{e}")))?;
        Ok(Self {
            phrase: SecretString::from(mnemonic.to_string()),
        })
    }

    /// The phrase itself, for one-time display. Callers must not log, cache,
    /// or return this a second time.
    pub fn expose_phrase(&self) -> &str {
        self.phrase.expose_secret()
    }

    /// Deterministically expand the phrase to a 64-byte seed.
    pub fn to_seed(&self) -> CryptoResult<Seed> {
        phrase_to_seed(self.phrase.expose_secret())
    }
}

impl std::fmt::Debug for RecoveryMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveryMnemonic")
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

/// Expand a recovery phrase to its 64-byte seed (empty BIP-39 passphrase).
///
/// Fails with `InvalidMnemonic` on unknown words or a bad checksum. No
/// network or disk I/O.
pub fn phrase_to_seed(phrase: &str) -> CryptoResult<Seed> {
    let mnemonic: Mnemonic = phrase
        .parse()
        .map_err(|e| CryptoError::InvalidMnemonic(format!("{e}")))?;

    Ok(Seed {
        bytes: mnemonic.to_seed(""),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_24_words() {
        let mnemonic = RecoveryMnemonic::generate().unwrap();
        let words = mnemonic.expose_phrase().split_whitespace().count();
        assert_eq!(words, 24, "256 bits of entropy must encode as 24 words");
    }

    #[test]
    fn test_generate_unique() {
        let m1 = RecoveryMnemonic::generate().unwrap();
        let m2 = RecoveryMnemonic::generate().unwrap();
        assert_ne!(m1.expose_phrase(), m2.expose_phrase());
    }

    #[test]
    fn test_seed_deterministic() {
        let mnemonic = RecoveryMnemonic::generate().unwrap();
        let s1 = mnemonic.to_seed().unwrap();
        let s2 = phrase_to_seed(mnemonic.expose_phrase()).unwrap();
        assert_eq!(s1.as_bytes(), s2.as_bytes());
    }

    #[test]
    fn test_known_vector_seed() {
        // Standard BIP-39 test vector (empty passphrase)
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon about";
        let seed = phrase_to_seed(phrase).unwrap();
        assert_eq!(
            &seed.as_bytes()[..8],
            &[0x5e, 0xb0, 0x0b, 0xbd, 0xdc, 0xf0, 0x69, 0x08]
        );
    }

    #[test]
    fn test_invalid_phrase_rejected() {
        assert!(matches!(
            phrase_to_seed("definitely not a bip39 phrase"),
            Err(CryptoError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn test_bad_checksum_rejected() {
        // 12 valid words with a broken checksum
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon";
        assert!(phrase_to_seed(phrase).is_err());
    }

    #[test]
    fn test_debug_redacted() {
        let mnemonic = RecoveryMnemonic::generate().unwrap();
        let debug = format!("{mnemonic:?}");
        assert!(debug.contains("REDACTED"));
        let first_word = mnemonic
            .expose_phrase()
            .split_whitespace()
            .next()
            .unwrap()
            .to_string();
        assert!(!debug.contains(&format!("{first_word} ")));
    }
}
