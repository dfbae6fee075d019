//! fv-custody: lifecycle of a user's homomorphic context
//!
//! The state machine at the center of the gateway:
//!
//! ```text
//! NoContext → Generated → Sealed(persisted upstream) → Opened(session custody) → NoContext
//! ```
//!
//! `generate` builds a fresh context with evaluation keys; `seal` wraps its
//! serialization in the mnemonic-keyed envelope and hands back the one-time
//! recovery phrase; `open` reverses the seal with a presented phrase and
//! materializes the plaintext context into per-session custody; `close`
//! destroys the custody file on logout.
//!
//! Custody is keyed by session id: one file per session under the custody
//! directory, serialized by an in-process lock registry, so concurrent
//! sessions never race on a shared path.

pub mod error;
pub mod flow;
pub mod manager;
pub mod store;

pub use error::{CustodyError, CustodyResult};
pub use manager::{CustodyManager, GeneratedContext, SealedContext};
pub use store::SessionStore;
