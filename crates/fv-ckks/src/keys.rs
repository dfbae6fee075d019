//! Ring-LWE key generation
//!
//! The public key is an RLWE instance (b, a) with b = -(a·s + e); security
//! relies on the hardness of distinguishing it from uniform.

use rand::Rng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::poly::Poly;
use crate::sampling::{sample_gaussian, sample_ternary, sample_uniform};

/// CKKS public encryption key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicKey {
    /// b = -(a·s + e) mod q
    pub b: Poly,
    /// Uniform random polynomial
    pub a: Poly,
}

/// CKKS secret decryption key. Zeroized on drop, redacted in Debug.
#[derive(Clone, Serialize, Deserialize)]
pub struct SecretKey {
    pub(crate) s: Poly,
}

impl SecretKey {
    pub(crate) fn poly(&self) -> &Poly {
        &self.s
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.s.coeffs.zeroize();
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("s", &"[REDACTED]")
            .finish()
    }
}

/// Generate a fresh key pair at the given ring dimension.
///
/// 1. s ← ternary distribution (secret key)
/// 2. a ← uniform over Z_q
/// 3. e ← discrete Gaussian (small error)
/// 4. b = -(a·s + e) mod q
pub fn keygen<R: Rng>(degree: usize, rng: &mut R) -> (PublicKey, SecretKey) {
    let s = sample_ternary(degree, rng);
    let a = sample_uniform(degree, rng);
    let e = sample_gaussian(degree, rng);

    let b = a.mul(&s).add(&e).neg();

    (PublicKey { b, a }, SecretKey { s })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const N: usize = 256;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_keygen_dimensions() {
        let (pk, sk) = keygen(N, &mut test_rng());
        assert_eq!(pk.a.degree(), N);
        assert_eq!(pk.b.degree(), N);
        assert_eq!(sk.poly().degree(), N);
    }

    #[test]
    fn test_secret_key_ternary() {
        let (_, sk) = keygen(N, &mut test_rng());
        assert!(sk.poly().coeffs.iter().all(|&c| (-1..=1).contains(&c)));
    }

    #[test]
    fn test_rlwe_error_is_small() {
        // b + a·s = -e, so every coefficient must be Gaussian-small
        let (pk, sk) = keygen(N, &mut test_rng());
        let residue = pk.b.add(&pk.a.mul(sk.poly()));
        assert!(
            residue.coeffs.iter().all(|&c| c.abs() < 100),
            "RLWE residue must be the negated error term"
        );
    }

    #[test]
    fn test_secret_key_debug_redacted() {
        let (_, sk) = keygen(N, &mut test_rng());
        let debug = format!("{sk:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("coeffs"));
    }
}
