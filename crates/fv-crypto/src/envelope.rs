//! The at-rest encryption envelope: `salt[16] ‖ nonce[12] ‖ ciphertext`
//!
//! Field widths are fixed and bounds-checked; the AES-GCM tag is the trailing
//! 16 bytes of the ciphertext. Salt and nonce are freshly random on every
//! seal. The fresh salt yields an independent Argon2id key, which keeps the
//! nonce domain safe even across contexts sealed from the same phrase.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{CryptoError, CryptoResult};
use crate::kdf::{derive_key, KdfParams};
use crate::mnemonic::Seed;
use crate::{HEADER_LEN, NONCE_LEN, SALT_LEN};

/// A decoded encryption envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Concatenate salt, nonce, and ciphertext in fixed field order.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Slice a blob back into salt / nonce / ciphertext by the fixed offsets.
    ///
    /// Fails with `MalformedEnvelope` when the blob cannot contain the
    /// 28-byte prefix; never returns partially sliced fields.
    pub fn decode(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(CryptoError::MalformedEnvelope { len: bytes.len() });
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&bytes[..SALT_LEN]);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&bytes[SALT_LEN..HEADER_LEN]);

        Ok(Self {
            salt,
            nonce,
            ciphertext: bytes[HEADER_LEN..].to_vec(),
        })
    }
}

/// Seal a serialized context under a key derived from the mnemonic seed.
///
/// Draws a fresh random salt and nonce, derives the envelope key with
/// Argon2id, and AEAD-encrypts the plaintext (tag appended by AES-GCM).
pub fn seal(plaintext: &[u8], seed: &Seed, params: &KdfParams) -> CryptoResult<Envelope> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let key = derive_key(seed.as_bytes(), &salt, params)?;
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::Encryption(format!("AES-GCM seal failed: {e}")))?;

    tracing::debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "sealed context envelope"
    );

    Ok(Envelope {
        salt,
        nonce,
        ciphertext,
    })
}

/// Open an envelope with the key re-derived from the supplied seed and the
/// envelope's own salt.
///
/// Any tag mismatch (wrong phrase, corrupted or tampered blob) is
/// `AuthenticationFailure`; no partial plaintext is returned. Retrying with
/// the same inputs always fails again.
pub fn open(envelope: &Envelope, seed: &Seed, params: &KdfParams) -> CryptoResult<Vec<u8>> {
    let key = derive_key(seed.as_bytes(), &envelope.salt, params)?;
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    cipher
        .decrypt(Nonce::from_slice(&envelope.nonce), envelope.ciphertext.as_slice())
        .map_err(|_| CryptoError::AuthenticationFailure)
}
