//! Context lifecycle orchestration

use fv_ckks::{CkksContext, SchemeParams};
use fv_core::config::FvConfig;
use fv_core::SessionId;
use fv_crypto::envelope::{self, Envelope};
use fv_crypto::mnemonic::{phrase_to_seed, RecoveryMnemonic};
use fv_crypto::KdfParams;

use crate::error::CustodyResult;
use crate::store::SessionStore;

/// A freshly generated context, serialized with its secret key. Not yet
/// persisted anywhere.
pub struct GeneratedContext {
    pub context_bytes: Vec<u8>,
    /// BLAKE3 digest of the public serialization, stable across publicize
    pub fingerprint: String,
}

/// A sealed context envelope, ready for the upstream store to persist.
#[derive(Debug, Clone)]
pub struct SealedContext {
    /// `salt[16] ‖ nonce[12] ‖ ciphertext`
    pub envelope: Vec<u8>,
}

/// Orchestrates the context state machine over the session store.
pub struct CustodyManager {
    kdf: KdfParams,
    scheme: SchemeParams,
    store: SessionStore,
}

impl CustodyManager {
    pub fn new(config: &FvConfig) -> Self {
        Self {
            kdf: KdfParams {
                mem_cost_kib: config.kdf.mem_cost_kib,
                time_cost: config.kdf.time_cost,
                lanes: config.kdf.lanes,
            },
            scheme: SchemeParams {
                poly_modulus_degree: config.scheme.poly_modulus_degree,
                coeff_mod_bit_sizes: config.scheme.coeff_mod_bit_sizes.clone(),
                scale_bits: config.scheme.scale_bits,
            },
            store: SessionStore::new(config.custody.dir.clone()),
        }
    }

    /// Explicit construction, used by tests and by callers that already hold
    /// resolved parameters.
    pub fn with_parts(kdf: KdfParams, scheme: SchemeParams, store: SessionStore) -> Self {
        Self { kdf, scheme, store }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// `NoContext → Generated`: build a fresh context (public, secret,
    /// relinearization and Galois keys) and serialize it in full. Nothing is
    /// persisted yet.
    pub fn generate(&self) -> CustodyResult<GeneratedContext> {
        let context = CkksContext::generate(self.scheme.clone())?;
        let fingerprint = context.fingerprint()?;
        let context_bytes = context.to_bytes(true)?;

        tracing::info!(
            fingerprint = %fingerprint,
            degree = self.scheme.poly_modulus_degree,
            "generated context"
        );

        Ok(GeneratedContext {
            context_bytes,
            fingerprint,
        })
    }

    /// `Generated → Sealed`: draw a recovery mnemonic, derive the envelope
    /// key from its seed and a fresh salt, AEAD-encrypt the serialized
    /// context.
    ///
    /// The mnemonic is returned for one-time display and must never be
    /// logged, cached, or surfaced again: it is the only recovery path.
    pub fn seal(&self, context_bytes: &[u8]) -> CustodyResult<(SealedContext, RecoveryMnemonic)> {
        let mnemonic = RecoveryMnemonic::generate()?;
        let seed = mnemonic.to_seed()?;

        let envelope = envelope::seal(context_bytes, &seed, &self.kdf)?;

        tracing::info!(envelope_len = envelope.ciphertext.len(), "sealed context");

        Ok((
            SealedContext {
                envelope: envelope.encode(),
            },
            mnemonic,
        ))
    }

    /// `Sealed → Opened`: re-derive the seed from the presented phrase,
    /// decrypt the envelope, and materialize the plaintext context into this
    /// session's custody slot.
    ///
    /// On any failure (malformed envelope, bad phrase, tampered blob) no
    /// custody file is created or altered.
    pub fn open(
        &self,
        session: &SessionId,
        envelope_bytes: &[u8],
        phrase: &str,
    ) -> CustodyResult<()> {
        let envelope = Envelope::decode(envelope_bytes)?;
        let seed = phrase_to_seed(phrase)?;
        let context_bytes = envelope::open(&envelope, &seed, &self.kdf)?;

        self.store.put(session, &context_bytes)
    }

    /// Liveness probe only; existence of a custody file proves nothing about
    /// the caller's identity.
    pub fn is_open(&self, session: &SessionId) -> bool {
        self.store.is_open(session)
    }

    /// `Opened → NoContext`: destroy the session's custody file. Idempotent.
    pub fn close(&self, session: &SessionId) -> CustodyResult<()> {
        self.store.close(session)
    }

    /// Deserialize the opened context for this session.
    pub fn opened_context(&self, session: &SessionId) -> CustodyResult<CkksContext> {
        let bytes = self.store.read(session)?;
        Ok(CkksContext::from_bytes(&bytes)?)
    }

    /// Strip the secret key from a serialized context for transmission to
    /// the verification counterpart, which must encrypt and evaluate but
    /// never decrypt.
    pub fn publicize(&self, context_bytes: &[u8]) -> CustodyResult<Vec<u8>> {
        let context = CkksContext::from_bytes(context_bytes)?;
        Ok(context.publicize().to_bytes(true)?)
    }

    /// Publicize the context opened for a session (the blob handed to the
    /// verifier during registration).
    pub fn export_public(&self, session: &SessionId) -> CustodyResult<Vec<u8>> {
        let context = self.opened_context(session)?;
        Ok(context.publicize().to_bytes(true)?)
    }
}
