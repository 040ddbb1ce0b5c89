//! Attestation registry for the DAOsign three-tier signing workflow.
//!
//! Clients sign the EIP-712 digest of a proof message (see
//! [`daosign_proofs`]), then submit the signed record under a 46-byte
//! content address. The registry recovers the signer, validates the record
//! structurally and against previously stored proofs, commits it to the
//! in-memory state maps, and emits an event observers can tail.
//!
//! # Architecture
//!
//! 1. [`ProofRegistry`] - The public API: three `store_*` and three `get_*`
//!    operations
//! 2. [`validation`] - Structural and cross-referential rules
//! 3. [`ProofState`] - The five state maps, mutated only under the
//!    registry's exclusive write lock
//! 4. [`EventLog`] - Append-only event log with broadcast fan-out
//!
//! Each write is atomic: recovery, validation, commit, and event emission
//! either all happen or none do.

pub mod events;
pub mod metrics;
pub mod registry;
pub mod store;
pub mod validation;

// Re-export main types
pub use events::{EventLog, RegistryEvent};
pub use metrics::RegistryMetrics;
pub use registry::{ProofDocument, ProofRegistry};
pub use store::ProofState;

// The proofs crate is half the public surface; keep callers to one import.
pub use daosign_proofs::{
    digest, domain_separator, recover, struct_hash, Eip712Domain, Message, ProofError,
    ProofOfAgreementMsg, ProofOfAuthorityMsg, ProofOfSignatureMsg, ProofTypes, Result, Signer,
    SignedProofOfAgreement, SignedProofOfAuthority, SignedProofOfSignature,
};
