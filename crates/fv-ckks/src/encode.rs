//! Coefficient encoding of real vectors at the global scale
//!
//! Component i is scaled by 2^scale_bits and rounded into coefficient i.
//! Decoding divides back out, so the decrypt error is the lattice noise over
//! the scale, around 2^-30 for unit-norm inputs at the production profile.

use crate::error::{CkksError, CkksResult};
use crate::params::{SchemeParams, CIPHER_MODULUS};
use crate::poly::Poly;

/// Encode a real vector into a plaintext polynomial.
pub fn encode(values: &[f64], params: &SchemeParams) -> CkksResult<Poly> {
    let slots = params.slot_count();
    if values.len() > slots {
        return Err(CkksError::VectorTooLong {
            len: values.len(),
            slots,
        });
    }

    let delta = params.delta() as f64;
    let limit = (CIPHER_MODULUS / 2) as f64;

    let mut poly = Poly::zero(params.poly_modulus_degree);
    for (i, &v) in values.iter().enumerate() {
        let scaled = v * delta;
        if !scaled.is_finite() || scaled.abs() >= limit {
            return Err(CkksError::EncodingOverflow { index: i });
        }
        poly.coeffs[i] = scaled.round() as i64;
    }
    Ok(poly)
}

/// Decode the first `len` coefficients of a plaintext polynomial.
pub fn decode(poly: &Poly, params: &SchemeParams, len: usize) -> Vec<f64> {
    let delta = params.delta() as f64;
    poly.coeffs
        .iter()
        .take(len)
        .map(|&c| c as f64 / delta)
        .collect()
}
