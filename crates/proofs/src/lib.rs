//! Typed-data primitives for the DAOsign attestation registry.
//!
//! This crate is pure computation over cryptographic data structures: no
//! storage, no I/O, no shared state. It provides everything a client or a
//! registry needs to produce and check the 32-byte signing digest of an
//! attestation message.
//!
//! # Message Types
//!
//! - **Proof-of-Authority**: who is entitled to sign a given agreement
//! - **Proof-of-Signature**: one signer's acknowledgment of an agreement
//! - **Proof-of-Agreement**: the completed bundle of acknowledgments
//!
//! # Architecture
//!
//! 1. [`Message`] - Borrowed view over any hashable message variant
//! 2. [`struct_hash`] / [`digest`] - EIP-712 struct hashing and the final
//!    `0x19 0x01`-prefixed signing digest
//! 3. [`recover`] - secp256k1 signer recovery from a 65-byte signature
//! 4. [`schema`] - Static EIP-712 field descriptors served with reads

pub mod error;
pub mod recovery;
pub mod schema;
pub mod typed_data;
pub mod types;

// Re-export main types
pub use error::{ProofError, Result};
pub use recovery::{recover, SIGNATURE_LENGTH};
pub use schema::{primary_type, ProofTypes, TypedDataField};
pub use typed_data::{digest, domain_separator, struct_hash, Message};
pub use types::{
    Eip712Domain, ProofOfAgreementMsg, ProofOfAuthorityMsg, ProofOfSignatureMsg, Signer,
    SignedProofOfAgreement, SignedProofOfAuthority, SignedProofOfSignature, APP_NAME, CID_LENGTH,
    PROOF_OF_AUTHORITY_NAME, PROOF_OF_SIGNATURE_NAME,
};
