//! Evaluation keys: relinearization and Galois rotation keys
//!
//! Both are key-switching keys: digit-decomposed RLWE encryptions of a
//! target polynomial under the secret key. For digit d in [0, NUM_DIGITS):
//!
//! ```text
//! b_d = -(a_d·s + e_d) + target·T^d
//! a_d = uniform random
//! ```
//!
//! Relinearization targets s² (collapsing a ciphertext triple after
//! multiplication); the Galois key for element g targets s(X^g) (realigning
//! a rotated ciphertext). Both are public material, shipped to the upstream
//! evaluator with the public context.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::keys::SecretKey;
use crate::params::{DECOMP_BASE, NUM_DIGITS};
use crate::poly::Poly;
use crate::sampling::{sample_gaussian, sample_uniform};

/// Relinearization key: RLWE encryptions of s²·T^d.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelinKey {
    pub keys: Vec<(Poly, Poly)>,
}

/// Rotation key for one Galois element.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GaloisKey {
    /// The automorphism exponent g (X → X^g)
    pub element: usize,
    pub keys: Vec<(Poly, Poly)>,
}

/// Rotation keys for the power-of-two rotation set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GaloisKeys {
    pub keys: Vec<GaloisKey>,
}

/// Digit-decomposed key-switching key for an arbitrary target polynomial.
fn key_switch_key<R: Rng>(target: &Poly, sk: &SecretKey, rng: &mut R) -> Vec<(Poly, Poly)> {
    let degree = target.degree();
    let mut keys = Vec::with_capacity(NUM_DIGITS);
    let mut power_of_t: i64 = 1;

    for _ in 0..NUM_DIGITS {
        let a_d = sample_uniform(degree, rng);
        let e_d = sample_gaussian(degree, rng);

        let b_d = a_d
            .mul(sk.poly())
            .add(&e_d)
            .neg()
            .add(&target.scalar_mul(power_of_t));

        keys.push((b_d, a_d));
        power_of_t = power_of_t.saturating_mul(DECOMP_BASE);
    }

    keys
}

/// Generate the relinearization key (target s²).
pub fn gen_relin_key<R: Rng>(sk: &SecretKey, rng: &mut R) -> RelinKey {
    let s_squared = sk.poly().mul(sk.poly());
    RelinKey {
        keys: key_switch_key(&s_squared, sk, rng),
    }
}

/// Galois elements 5^(2^j) mod 2N for the power-of-two rotation set.
///
/// Rotations by arbitrary amounts compose from these, which is how the
/// upstream dot product folds a slotwise product into slot 0.
pub fn galois_elements(degree: usize) -> Vec<usize> {
    let modulus = 2 * degree;
    let slots = degree / 2;
    let mut elements = Vec::new();
    let mut g: usize = 5 % modulus;
    let mut step = 1;
    while step < slots {
        elements.push(g);
        g = (g * g) % modulus;
        step *= 2;
    }
    elements
}

/// Generate rotation keys for every power-of-two rotation.
pub fn gen_galois_keys<R: Rng>(sk: &SecretKey, rng: &mut R) -> GaloisKeys {
    let keys = galois_elements(sk.poly().degree())
        .into_iter()
        .map(|element| {
            let rotated_s = sk.poly().automorphism(element);
            GaloisKey {
                element,
                keys: key_switch_key(&rotated_s, sk, rng),
            }
        })
        .collect();

    GaloisKeys { keys }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keygen;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const N: usize = 256;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_relin_key_digit_count() {
        let mut rng = test_rng();
        let (_, sk) = keygen(N, &mut rng);
        let rlk = gen_relin_key(&sk, &mut rng);
        assert_eq!(rlk.keys.len(), NUM_DIGITS);
    }

    #[test]
    fn test_relin_key_decrypts_to_target() {
        // b_d + a_d·s ≈ s²·T^d up to the Gaussian noise e_d
        let mut rng = test_rng();
        let (_, sk) = keygen(N, &mut rng);
        let rlk = gen_relin_key(&sk, &mut rng);
        let s_squared = sk.poly().mul(sk.poly());

        let mut power_of_t: i64 = 1;
        for (d, (b_d, a_d)) in rlk.keys.iter().enumerate() {
            let recovered = b_d.add(&a_d.mul(sk.poly()));
            let expected = s_squared.scalar_mul(power_of_t);
            let noise = recovered.sub(&expected);
            assert!(
                noise.coeffs.iter().all(|&c| c.abs() < 100),
                "digit {d} noise too large"
            );
            power_of_t = power_of_t.saturating_mul(DECOMP_BASE);
        }
    }

    #[test]
    fn test_galois_elements_are_odd() {
        for g in galois_elements(N) {
            assert_eq!(g % 2, 1, "Galois element {g} must be odd");
        }
    }

    #[test]
    fn test_galois_key_count_covers_rotations() {
        // One key per power-of-two rotation up to N/2 slots
        let elements = galois_elements(N);
        assert_eq!(elements.len(), (N / 2).trailing_zeros() as usize);
    }

    #[test]
    fn test_galois_keys_decrypt_to_rotated_secret() {
        let mut rng = test_rng();
        let (_, sk) = keygen(N, &mut rng);
        let glk = gen_galois_keys(&sk, &mut rng);

        for gk in &glk.keys {
            let rotated = sk.poly().automorphism(gk.element);
            let (b_0, a_0) = &gk.keys[0];
            let recovered = b_0.add(&a_0.mul(sk.poly()));
            let noise = recovered.sub(&rotated);
            assert!(
                noise.coeffs.iter().all(|&c| c.abs() < 100),
                "element {} key does not encrypt the rotated secret",
                gk.element
            );
        }
    }
}
