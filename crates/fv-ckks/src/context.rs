//! Context construction, serialization, and public export
//!
//! A context is the full key bundle for one user: scheme parameters, public
//! key, evaluation keys, and (unless publicized) the secret key. Outside this
//! crate it only travels as an opaque byte blob.

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::error::{CkksError, CkksResult};
use crate::eval_key::{gen_galois_keys, gen_relin_key, GaloisKeys, RelinKey};
use crate::keys::{keygen, PublicKey, SecretKey};
use crate::params::SchemeParams;

/// Serialized context format version
pub const CONTEXT_FORMAT_VERSION: u32 = 1;

#[derive(Clone, Serialize, Deserialize)]
pub struct CkksContext {
    pub version: u32,
    pub params: SchemeParams,
    pub public: PublicKey,
    pub relin: RelinKey,
    pub galois: GaloisKeys,
    pub(crate) secret: Option<SecretKey>,
}

impl CkksContext {
    /// Generate a fresh context: key pair plus relinearization and Galois
    /// keys, all under the given scheme parameters.
    pub fn generate(params: SchemeParams) -> CkksResult<Self> {
        Self::generate_with_rng(params, &mut OsRng)
    }

    pub fn generate_with_rng<R: Rng + CryptoRng>(
        params: SchemeParams,
        rng: &mut R,
    ) -> CkksResult<Self> {
        params.validate()?;

        let degree = params.poly_modulus_degree;
        let (public, secret) = keygen(degree, rng);
        let relin = gen_relin_key(&secret, rng);
        let galois = gen_galois_keys(&secret, rng);

        tracing::debug!(
            degree,
            galois_keys = galois.keys.len(),
            "generated homomorphic context"
        );

        Ok(Self {
            version: CONTEXT_FORMAT_VERSION,
            params,
            public,
            relin,
            galois,
            secret: Some(secret),
        })
    }

    pub fn has_secret_key(&self) -> bool {
        self.secret.is_some()
    }

    /// A copy with the secret key stripped, safe to hand to the verifier:
    /// it can encrypt and evaluate but never decrypt.
    pub fn publicize(&self) -> Self {
        Self {
            version: self.version,
            params: self.params.clone(),
            public: self.public.clone(),
            relin: self.relin.clone(),
            galois: self.galois.clone(),
            secret: None,
        }
    }

    /// Serialize to an opaque blob. `with_secret` controls whether the
    /// secret key travels along (true for sealing at rest, false for
    /// transmission to the verifier).
    pub fn to_bytes(&self, with_secret: bool) -> CkksResult<Vec<u8>> {
        let view = ContextView {
            version: self.version,
            params: &self.params,
            public: &self.public,
            relin: &self.relin,
            galois: &self.galois,
            secret: if with_secret {
                self.secret.as_ref()
            } else {
                None
            },
        };
        serde_json::to_vec(&view).map_err(|e| CkksError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> CkksResult<Self> {
        let ctx: Self =
            serde_json::from_slice(bytes).map_err(|e| CkksError::Serialization(e.to_string()))?;
        if ctx.version != CONTEXT_FORMAT_VERSION {
            return Err(CkksError::Serialization(format!(
                "unsupported context format version {}",
                ctx.version
            )));
        }
        ctx.params.validate()?;
        Ok(ctx)
    }

    /// BLAKE3 hex digest of the public serialization; stable across
    /// publicize, usable as a context identity.
    pub fn fingerprint(&self) -> CkksResult<String> {
        let public_bytes = self.to_bytes(false)?;
        Ok(blake3::hash(&public_bytes).to_hex().to_string())
    }
}

impl std::fmt::Debug for CkksContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CkksContext")
            .field("version", &self.version)
            .field("params", &self.params)
            .field("secret", &if self.secret.is_some() {
                "[REDACTED]"
            } else {
                "none"
            })
            .finish()
    }
}

#[derive(Serialize)]
struct ContextView<'a> {
    version: u32,
    params: &'a SchemeParams,
    public: &'a PublicKey,
    relin: &'a RelinKey,
    galois: &'a GaloisKeys,
    secret: Option<&'a SecretKey>,
}
