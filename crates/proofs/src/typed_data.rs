//! EIP-712 structured-data hashing for registry messages.
//!
//! Every message variant reduces to a 32-byte struct hash,
//! `keccak256(TYPEHASH || slot0 || slot1 || …)`, with one 32-byte slot per
//! field in type-string order. The signing digest prefixes the cached
//! domain separator:
//!
//! ```text
//! digest = keccak256( 0x19 || 0x01 || domainSeparator || structHash(message) )
//! ```
//!
//! The output is bit-compatible with a wallet's `signTypedData_v4` over the
//! same type strings and domain values.

use std::sync::OnceLock;

use alloy_primitives::{keccak256, Address, B256, U256};

use crate::types::{
    Eip712Domain, ProofOfAgreementMsg, ProofOfAuthorityMsg, ProofOfSignatureMsg, Signer,
};

/// Canonical EIP-712 type strings.
///
/// The schema descriptors in [`crate::schema`] and the struct encoders below
/// must stay in sync with these, field for field.
pub mod type_strings {
    /// EIP712Domain type string.
    pub const EIP712_DOMAIN: &[u8] =
        b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
    /// Signer type string.
    pub const SIGNER: &[u8] = b"Signer(address addr,string metadata)";
    /// ProofOfAuthority type string, with the referenced Signer type
    /// appended per the EIP-712 encoding of nested struct types.
    pub const PROOF_OF_AUTHORITY: &[u8] =
        b"ProofOfAuthority(string name,address from,string agreementCID,Signer[] signers,string app,uint256 timestamp,string metadata)Signer(address addr,string metadata)";
    /// ProofOfSignature type string.
    pub const PROOF_OF_SIGNATURE: &[u8] =
        b"ProofOfSignature(string name,address signer,string agreementCID,string app,uint256 timestamp,string metadata)";
    /// ProofOfAgreement type string.
    pub const PROOF_OF_AGREEMENT: &[u8] =
        b"ProofOfAgreement(string agreementCID,string[] signatureCIDs,string app,uint256 timestamp,string metadata)";
}

/// keccak256 of the EIP712Domain type string.
pub fn domain_typehash() -> B256 {
    static HASH: OnceLock<B256> = OnceLock::new();
    *HASH.get_or_init(|| keccak256(type_strings::EIP712_DOMAIN))
}

/// keccak256 of the Signer type string.
pub fn signer_typehash() -> B256 {
    static HASH: OnceLock<B256> = OnceLock::new();
    *HASH.get_or_init(|| keccak256(type_strings::SIGNER))
}

/// keccak256 of the ProofOfAuthority type string.
pub fn proof_of_authority_typehash() -> B256 {
    static HASH: OnceLock<B256> = OnceLock::new();
    *HASH.get_or_init(|| keccak256(type_strings::PROOF_OF_AUTHORITY))
}

/// keccak256 of the ProofOfSignature type string.
pub fn proof_of_signature_typehash() -> B256 {
    static HASH: OnceLock<B256> = OnceLock::new();
    *HASH.get_or_init(|| keccak256(type_strings::PROOF_OF_SIGNATURE))
}

/// keccak256 of the ProofOfAgreement type string.
pub fn proof_of_agreement_typehash() -> B256 {
    static HASH: OnceLock<B256> = OnceLock::new();
    *HASH.get_or_init(|| keccak256(type_strings::PROOF_OF_AGREEMENT))
}

/// A borrowed view over any hashable message variant.
///
/// One enum, one dispatch: [`struct_hash`] is total over every type the
/// registry ever hashes, so the type-string table above is exercised in one
/// place.
#[derive(Debug, Clone, Copy)]
pub enum Message<'a> {
    /// The signing domain itself; its struct hash is the domain separator.
    Domain(&'a Eip712Domain),
    /// A single signer entry, hashed as an element of `Signer[]`.
    Signer(&'a Signer),
    /// A Proof-of-Authority message.
    Authority(&'a ProofOfAuthorityMsg),
    /// A Proof-of-Signature message.
    Signature(&'a ProofOfSignatureMsg),
    /// A Proof-of-Agreement message.
    Agreement(&'a ProofOfAgreementMsg),
}

// A dynamic `string` occupies its slot as the keccak256 of its UTF-8 bytes.
fn encode_string(value: &str) -> B256 {
    keccak256(value.as_bytes())
}

// An `address` is left-zero-padded into its 32-byte slot.
fn encode_address(value: Address) -> B256 {
    value.into_word()
}

// A `uint256` (timestamps and chain ids are u64 here) is big-endian encoded.
fn encode_u64(value: u64) -> B256 {
    B256::from(U256::from(value))
}

/// keccak256 over `TYPEHASH || slots`, the EIP-712 struct encoding.
fn hash_encoded(typehash: B256, slots: &[B256]) -> B256 {
    let mut buf = Vec::with_capacity(32 * (slots.len() + 1));
    buf.extend_from_slice(typehash.as_slice());
    for slot in slots {
        buf.extend_from_slice(slot.as_slice());
    }
    keccak256(&buf)
}

// `Signer[]` hashes as keccak256 of the concatenated element struct hashes:
// no length prefix, no separators.
fn hash_signer_array(signers: &[Signer]) -> B256 {
    let mut buf = Vec::with_capacity(32 * signers.len());
    for signer in signers {
        buf.extend_from_slice(struct_hash(Message::Signer(signer)).as_slice());
    }
    keccak256(&buf)
}

// `string[]` hashes as keccak256 of the concatenated per-string hashes.
fn hash_string_array(values: &[String]) -> B256 {
    let mut buf = Vec::with_capacity(32 * values.len());
    for value in values {
        buf.extend_from_slice(encode_string(value).as_slice());
    }
    keccak256(&buf)
}

/// EIP-712 struct hash of a message, polymorphic over every variant.
pub fn struct_hash(message: Message<'_>) -> B256 {
    match message {
        Message::Domain(domain) => hash_encoded(
            domain_typehash(),
            &[
                encode_string(&domain.name),
                encode_string(&domain.version),
                encode_u64(domain.chain_id),
                encode_address(domain.verifying_contract),
            ],
        ),
        Message::Signer(signer) => hash_encoded(
            signer_typehash(),
            &[encode_address(signer.addr), encode_string(&signer.metadata)],
        ),
        Message::Authority(msg) => hash_encoded(
            proof_of_authority_typehash(),
            &[
                encode_string(&msg.name),
                encode_address(msg.from),
                encode_string(&msg.agreement_cid),
                hash_signer_array(&msg.signers),
                encode_string(&msg.app),
                encode_u64(msg.timestamp),
                encode_string(&msg.metadata),
            ],
        ),
        Message::Signature(msg) => hash_encoded(
            proof_of_signature_typehash(),
            &[
                encode_string(&msg.name),
                encode_address(msg.signer),
                encode_string(&msg.agreement_cid),
                encode_string(&msg.app),
                encode_u64(msg.timestamp),
                encode_string(&msg.metadata),
            ],
        ),
        Message::Agreement(msg) => hash_encoded(
            proof_of_agreement_typehash(),
            &[
                encode_string(&msg.agreement_cid),
                hash_string_array(&msg.signature_cids),
                encode_string(&msg.app),
                encode_u64(msg.timestamp),
                encode_string(&msg.metadata),
            ],
        ),
    }
}

/// Domain separator for the fixed registry domain, computed once.
pub fn domain_separator() -> B256 {
    static SEPARATOR: OnceLock<B256> = OnceLock::new();
    *SEPARATOR.get_or_init(|| struct_hash(Message::Domain(&Eip712Domain::registry())))
}

/// The 32-byte signing digest of a message under the registry domain.
pub fn digest(message: Message<'_>) -> B256 {
    let mut buf = Vec::with_capacity(2 + 64);
    buf.extend_from_slice(&[0x19, 0x01]);
    buf.extend_from_slice(domain_separator().as_slice());
    buf.extend_from_slice(struct_hash(message).as_slice());
    keccak256(&buf)
}
