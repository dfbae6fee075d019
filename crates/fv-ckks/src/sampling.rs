//! Coefficient samplers: uniform, ternary, and discrete Gaussian

use rand::Rng;

use crate::params::{CIPHER_MODULUS, SIGMA};
use crate::poly::Poly;

/// Uniform polynomial over the centered coefficient range.
pub fn sample_uniform<R: Rng>(degree: usize, rng: &mut R) -> Poly {
    let half = CIPHER_MODULUS / 2;
    Poly {
        coeffs: (0..degree).map(|_| rng.gen_range(-half..=half)).collect(),
    }
}

/// Ternary polynomial with coefficients in {-1, 0, 1}.
pub fn sample_ternary<R: Rng>(degree: usize, rng: &mut R) -> Poly {
    Poly {
        coeffs: (0..degree).map(|_| rng.gen_range(-1i64..=1)).collect(),
    }
}

/// Discrete Gaussian polynomial, σ = 3.2, rounded Box-Muller.
pub fn sample_gaussian<R: Rng>(degree: usize, rng: &mut R) -> Poly {
    Poly {
        coeffs: (0..degree)
            .map(|_| {
                let u1: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
                let u2: f64 = rng.gen();
                let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
                (z * SIGMA).round() as i64
            })
            .collect(),
    }
}
