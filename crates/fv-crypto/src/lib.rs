//! fv-crypto: encryption-at-rest for homomorphic-encryption contexts
//!
//! On-disk envelope format (binary):
//! ```text
//! [16 bytes: Argon2id salt][12 bytes: AES-GCM nonce][N bytes: ciphertext + 16-byte tag]
//! ```
//!
//! Key path: 24-word BIP-39 mnemonic → 64-byte seed (PBKDF2-HMAC-SHA512, the
//! standard BIP-39 stretch) → 32-byte envelope key (Argon2id over a fresh
//! random salt). The mnemonic is the only recovery path; it is shown to the
//! user once and never stored.
//!
//! A wrong phrase and a tampered envelope are indistinguishable: both surface
//! as the AEAD tag mismatch (`CryptoError::AuthenticationFailure`). That is
//! the intended typo/tamper signal, not a separate error path.

pub mod envelope;
pub mod error;
pub mod kdf;
pub mod mnemonic;

pub use envelope::{open, seal, Envelope};
pub use error::{CryptoError, CryptoResult};
pub use kdf::{derive_key, KdfParams, SymmetricKey};
pub use mnemonic::{phrase_to_seed, RecoveryMnemonic, Seed};

/// Size of the derived envelope key in bytes (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of the Argon2id salt prefix
pub const SALT_LEN: usize = 16;

/// Size of the AES-GCM nonce
pub const NONCE_LEN: usize = 12;

/// Fixed envelope prefix: salt followed by nonce
pub const HEADER_LEN: usize = SALT_LEN + NONCE_LEN;

/// Size of the AES-GCM authentication tag (appended to the ciphertext)
pub const TAG_LEN: usize = 16;
