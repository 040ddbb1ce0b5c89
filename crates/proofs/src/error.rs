//! Proof-specific error types.
//!
//! The `Display` strings are the client-visible error surface and are stable;
//! callers receive them verbatim.

use thiserror::Error;

/// Errors raised while validating, recovering, or storing a proof.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProofError {
    /// Proof CID is not 46 bytes long.
    #[error("Invalid proof CID")]
    InvalidProofCid,

    /// Agreement CID is not 46 bytes long.
    #[error("Invalid agreement CID")]
    InvalidAgreementCid,

    /// The `app` field is not the expected literal.
    #[error("Invalid app name")]
    InvalidAppName,

    /// The `name` field is not the expected literal for its proof kind.
    #[error("Invalid proof name")]
    InvalidProofName,

    /// A zero-address signer, or a signer not registered on the referenced
    /// authority.
    #[error("Invalid signer")]
    InvalidSigner,

    /// The record referenced as an authority is missing or not a
    /// Proof-of-Authority.
    #[error("Invalid Proof-of-Authority name")]
    InvalidAuthorityName,

    /// Signature-CID count does not match the authority's signer count.
    #[error("Invalid Proofs-of-Signatures length")]
    InvalidSignaturesLength,

    /// A referenced Proof-of-Signature is missing or its signer is not in
    /// the authority's signer set.
    #[error("Invalid Proofs-of-Signature signer")]
    InvalidSignatureSigner,

    /// Malformed signature, failed recovery, or recovered address not
    /// matching the declared one.
    #[error("Invalid signature")]
    InvalidSignature,
}

/// Result type for proof operations.
pub type Result<T> = std::result::Result<T, ProofError>;
