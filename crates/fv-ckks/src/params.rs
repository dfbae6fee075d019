//! CKKS scheme parameters.
//!
//! Arithmetic runs over a single 54-bit prime ciphertext modulus; the
//! coefficient-modulus chain is declared, validated, and carried in the
//! context for the upstream evaluator, which owns rescaling across levels.

use serde::{Deserialize, Serialize};

use crate::error::{CkksError, CkksResult};

/// Ciphertext modulus. Prime, fits in i64, and N·Q² fits in i128.
pub const CIPHER_MODULUS: i64 = (1i64 << 54) - 33;

/// Standard deviation for discrete Gaussian error sampling.
pub const SIGMA: f64 = 3.2;

/// Digit-decomposition base for key-switching keys.
pub const DECOMP_BASE: i64 = 1i64 << 18;

/// Number of decomposition digits; DECOMP_BASE^NUM_DIGITS covers the modulus.
pub const NUM_DIGITS: usize = 3;

/// Scheme configuration for context generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeParams {
    /// Ring dimension, a power of two.
    pub poly_modulus_degree: usize,
    /// Declared coefficient-modulus chain (bit sizes per level).
    pub coeff_mod_bit_sizes: Vec<u8>,
    /// Global scale exponent; values are scaled by 2^scale_bits on encoding.
    pub scale_bits: u8,
}

impl SchemeParams {
    /// The production profile: CKKS at 128-bit security.
    pub fn production() -> Self {
        Self {
            poly_modulus_degree: 8192,
            coeff_mod_bit_sizes: vec![60, 40, 40, 60],
            scale_bits: 40,
        }
    }

    /// Reduced profile for tests. Far below the security floor; keygen and
    /// encryption at degree 8192 are too slow for unit-test loops.
    pub fn insecure_test() -> Self {
        Self {
            poly_modulus_degree: 1024,
            coeff_mod_bit_sizes: vec![40, 32, 40],
            scale_bits: 32,
        }
    }

    pub fn validate(&self) -> CkksResult<()> {
        let n = self.poly_modulus_degree;
        if !n.is_power_of_two() || !(1024..=32768).contains(&n) {
            return Err(CkksError::InvalidParams(format!(
                "poly_modulus_degree {n} must be a power of two in 1024..=32768"
            )));
        }
        if self.coeff_mod_bit_sizes.is_empty() {
            return Err(CkksError::InvalidParams(
                "coefficient-modulus chain is empty".into(),
            ));
        }
        if let Some(&bad) = self
            .coeff_mod_bit_sizes
            .iter()
            .find(|&&b| !(20..=60).contains(&b))
        {
            return Err(CkksError::InvalidParams(format!(
                "chain entry {bad} outside 20..=60 bits"
            )));
        }
        if !(20..=48).contains(&self.scale_bits) {
            return Err(CkksError::InvalidParams(format!(
                "scale_bits {} outside 20..=48",
                self.scale_bits
            )));
        }
        Ok(())
    }

    /// Usable vector slots (N/2, the CKKS convention).
    pub fn slot_count(&self) -> usize {
        self.poly_modulus_degree / 2
    }

    /// The encoding scale 2^scale_bits.
    pub fn delta(&self) -> i64 {
        1i64 << self.scale_bits
    }
}
