//! Polynomial arithmetic in Z_q[X]/(X^N + 1)
//!
//! Coefficients are kept centered in (-q/2, q/2]. Multiplication is
//! negacyclic schoolbook with i128 accumulation: |a_i·b_j| < 2^106 and at
//! most 2^15 terms per output coefficient, so the accumulator never
//! overflows before the final reduction.

use serde::{Deserialize, Serialize};

use crate::params::CIPHER_MODULUS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poly {
    pub coeffs: Vec<i64>,
}

/// Centered reduction into (-q/2, q/2].
pub(crate) fn reduce(x: i128) -> i64 {
    let q = CIPHER_MODULUS as i128;
    let mut r = x % q;
    if r > q / 2 {
        r -= q;
    } else if r < -(q / 2) {
        r += q;
    }
    r as i64
}

impl Poly {
    pub fn zero(degree: usize) -> Self {
        Self {
            coeffs: vec![0; degree],
        }
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len()
    }

    pub fn add(&self, other: &Poly) -> Poly {
        debug_assert_eq!(self.coeffs.len(), other.coeffs.len());
        Poly {
            coeffs: self
                .coeffs
                .iter()
                .zip(&other.coeffs)
                .map(|(&a, &b)| reduce(a as i128 + b as i128))
                .collect(),
        }
    }

    pub fn sub(&self, other: &Poly) -> Poly {
        debug_assert_eq!(self.coeffs.len(), other.coeffs.len());
        Poly {
            coeffs: self
                .coeffs
                .iter()
                .zip(&other.coeffs)
                .map(|(&a, &b)| reduce(a as i128 - b as i128))
                .collect(),
        }
    }

    pub fn neg(&self) -> Poly {
        Poly {
            coeffs: self.coeffs.iter().map(|&a| reduce(-(a as i128))).collect(),
        }
    }

    pub fn scalar_mul(&self, k: i64) -> Poly {
        Poly {
            coeffs: self
                .coeffs
                .iter()
                .map(|&a| reduce(a as i128 * k as i128))
                .collect(),
        }
    }

    /// Negacyclic product: X^N ≡ -1, so terms past degree N wrap with a sign
    /// flip.
    pub fn mul(&self, other: &Poly) -> Poly {
        let n = self.coeffs.len();
        debug_assert_eq!(n, other.coeffs.len());

        let mut acc = vec![0i128; n];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            let a = a as i128;
            for (j, &b) in other.coeffs.iter().enumerate() {
                let prod = a * b as i128;
                let k = i + j;
                if k < n {
                    acc[k] += prod;
                } else {
                    acc[k - n] -= prod;
                }
            }
        }

        Poly {
            coeffs: acc.into_iter().map(reduce).collect(),
        }
    }

    /// The ring automorphism X → X^k for odd k (coprime to 2N).
    ///
    /// Coefficient i lands at position i·k mod 2N, negated when it falls in
    /// the upper half. This is the slot-rotation primitive the Galois keys
    /// are generated for.
    pub fn automorphism(&self, k: usize) -> Poly {
        let n = self.coeffs.len();
        debug_assert_eq!(k % 2, 1, "automorphism exponent must be odd");

        let mut out = vec![0i64; n];
        for (i, &c) in self.coeffs.iter().enumerate() {
            let t = (i * k) % (2 * n);
            if t < n {
                out[t] = c;
            } else {
                out[t - n] = reduce(-(c as i128));
            }
        }
        Poly { coeffs: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coeffs: &[i64]) -> Poly {
        Poly {
            coeffs: coeffs.to_vec(),
        }
    }

    #[test]
    fn test_add_sub_inverse() {
        let a = poly(&[1, 2, 3, 4]);
        let b = poly(&[5, -6, 7, -8]);
        assert_eq!(a.add(&b).sub(&b), a);
    }

    #[test]
    fn test_neg_is_sub_from_zero() {
        let a = poly(&[1, -2, 3, -4]);
        assert_eq!(Poly::zero(4).sub(&a), a.neg());
    }

    #[test]
    fn test_mul_by_one() {
        let a = poly(&[7, -3, 11, 5]);
        let one = poly(&[1, 0, 0, 0]);
        assert_eq!(a.mul(&one), a);
    }

    #[test]
    fn test_mul_negacyclic_wrap() {
        // X^3 * X = X^4 = -1 in Z[X]/(X^4 + 1)
        let x3 = poly(&[0, 0, 0, 1]);
        let x = poly(&[0, 1, 0, 0]);
        assert_eq!(x3.mul(&x), poly(&[-1, 0, 0, 0]));
    }

    #[test]
    fn test_mul_commutative() {
        let a = poly(&[3, 0, -2, 9]);
        let b = poly(&[-7, 4, 1, 2]);
        assert_eq!(a.mul(&b), b.mul(&a));
    }

    #[test]
    fn test_reduce_centered() {
        let q = CIPHER_MODULUS;
        assert_eq!(reduce(q as i128), 0);
        assert_eq!(reduce((q + 1) as i128), 1);
        assert_eq!(reduce(-(q as i128) - 1), -1);
        assert!(reduce((q / 2 + 1) as i128) < 0);
    }

    #[test]
    fn test_automorphism_identity() {
        let a = poly(&[1, 2, 3, 4]);
        assert_eq!(a.automorphism(1), a);
    }

    #[test]
    fn test_automorphism_composes() {
        // σ_5 ∘ σ_5 = σ_(25 mod 2N) = σ_1 for N = 4
        let a = poly(&[1, 2, 3, 4]);
        let twice = a.automorphism(5).automorphism(5);
        let direct = a.automorphism(25 % 8);
        assert_eq!(twice, direct);
    }

    #[test]
    fn test_automorphism_respects_multiplication() {
        // σ(a·b) = σ(a)·σ(b)
        let a = poly(&[2, -1, 0, 3]);
        let b = poly(&[1, 1, -2, 0]);
        let lhs = a.mul(&b).automorphism(3);
        let rhs = a.automorphism(3).mul(&b.automorphism(3));
        assert_eq!(lhs, rhs);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn small_poly(n: usize) -> impl Strategy<Value = Poly> {
            prop::collection::vec(-1_000_000i64..1_000_000, n..=n)
                .prop_map(|coeffs| Poly { coeffs })
        }

        proptest! {
            #[test]
            fn prop_mul_distributes_over_add(
                a in small_poly(8), b in small_poly(8), c in small_poly(8)
            ) {
                let lhs = a.mul(&b.add(&c));
                let rhs = a.mul(&b).add(&a.mul(&c));
                prop_assert_eq!(lhs, rhs);
            }

            #[test]
            fn prop_coeffs_stay_centered(a in small_poly(8), b in small_poly(8)) {
                let p = a.mul(&b);
                for &c in &p.coeffs {
                    prop_assert!(c.abs() <= CIPHER_MODULUS / 2 + 1);
                }
            }
        }
    }
}
