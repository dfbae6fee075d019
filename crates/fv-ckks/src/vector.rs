//! Vector encryption and decryption under a context
//!
//! RLWE encryption with the public key (b, a):
//!
//! ```text
//! c0 = b·u + e0 + m        c1 = a·u + e1        (u ternary, e Gaussian)
//! ```
//!
//! Decryption recovers m ≈ c0 + c1·s and decodes at the global scale. In the
//! similarity-score convention only index 0 of a decrypted result carries
//! meaning (the upstream dot product folds its sum into the first slot), so
//! `decrypt_score` extracts exactly that scalar.

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::context::CkksContext;
use crate::encode::{decode, encode};
use crate::error::{CkksError, CkksResult};
use crate::poly::Poly;
use crate::sampling::{sample_gaussian, sample_ternary};

/// An encrypted vector: an RLWE ciphertext pair plus the encoded length.
///
/// Opaque to everything but a context holding the matching secret key.
#[derive(Clone, Serialize, Deserialize)]
pub struct EncryptedVector {
    pub c0: Poly,
    pub c1: Poly,
    pub len: usize,
}

impl std::fmt::Debug for EncryptedVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedVector")
            .field("degree", &self.c0.degree())
            .field("len", &self.len)
            .finish()
    }
}

/// Encrypt a real vector under the context's public key.
pub fn encrypt(context: &CkksContext, values: &[f64]) -> CkksResult<EncryptedVector> {
    encrypt_with_rng(context, values, &mut OsRng)
}

pub fn encrypt_with_rng<R: Rng + CryptoRng>(
    context: &CkksContext,
    values: &[f64],
    rng: &mut R,
) -> CkksResult<EncryptedVector> {
    let m = encode(values, &context.params)?;
    let degree = context.params.poly_modulus_degree;

    let u = sample_ternary(degree, rng);
    let e0 = sample_gaussian(degree, rng);
    let e1 = sample_gaussian(degree, rng);

    let c0 = context.public.b.mul(&u).add(&e0).add(&m);
    let c1 = context.public.a.mul(&u).add(&e1);

    Ok(EncryptedVector {
        c0,
        c1,
        len: values.len(),
    })
}

/// Decrypt an encrypted vector. Requires the secret key.
pub fn decrypt(context: &CkksContext, encrypted: &EncryptedVector) -> CkksResult<Vec<f64>> {
    let secret = context.secret.as_ref().ok_or(CkksError::MissingSecretKey)?;

    if encrypted.c0.degree() != context.params.poly_modulus_degree {
        return Err(CkksError::InvalidParams(format!(
            "ciphertext degree {} does not match context degree {}",
            encrypted.c0.degree(),
            context.params.poly_modulus_degree
        )));
    }

    let m = encrypted.c0.add(&encrypted.c1.mul(secret.poly()));
    Ok(decode(&m, &context.params, encrypted.len))
}

/// Decrypt a similarity result and extract the single meaningful scalar
/// (index 0).
pub fn decrypt_score(context: &CkksContext, encrypted: &EncryptedVector) -> CkksResult<f64> {
    let values = decrypt(context, encrypted)?;
    values
        .first()
        .copied()
        .ok_or_else(|| CkksError::InvalidParams("empty ciphertext payload".into()))
}
