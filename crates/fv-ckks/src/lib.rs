//! fv-ckks: CKKS-style homomorphic encryption over the ring Z_q[X]/(X^N + 1)
//!
//! Encrypt/decrypt level only. The gateway encrypts normalized embeddings and
//! decrypts similarity results; the homomorphic arithmetic itself runs in the
//! upstream verifier, which receives a public-only context (no secret key)
//! together with the Galois and relinearization keys it needs for the
//! encrypted dot product.
//!
//! A context bundles the scheme parameters with all key material and is an
//! opaque serialized blob to every other crate. Security rests on Ring-LWE:
//! the public key (b, a) with b = -(a·s + e) is indistinguishable from
//! uniform without s.

pub mod context;
pub mod encode;
pub mod error;
pub mod eval_key;
pub mod keys;
pub mod params;
pub mod poly;
pub mod sampling;
pub mod vector;

pub use context::CkksContext;
pub use error::{CkksError, CkksResult};
pub use keys::{keygen, PublicKey, SecretKey};
pub use params::SchemeParams;
pub use vector::{decrypt, decrypt_score, encrypt, EncryptedVector};
