//! Static EIP-712 schema descriptors.
//!
//! Read responses decorate the stored message with the field lists a wallet
//! needs to re-derive the signing digest. Values are fixed at init and must
//! mirror the type strings in [`crate::typed_data`].

use serde::Serialize;

/// Primary type names per proof kind.
pub mod primary_type {
    /// Primary type of a Proof-of-Authority document.
    pub const PROOF_OF_AUTHORITY: &str = "ProofOfAuthority";
    /// Primary type of a Proof-of-Signature document.
    pub const PROOF_OF_SIGNATURE: &str = "ProofOfSignature";
    /// Primary type of a Proof-of-Agreement document.
    pub const PROOF_OF_AGREEMENT: &str = "ProofOfAgreement";
}

/// One `{ name, type }` entry in an EIP-712 `types` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypedDataField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

const fn field(name: &'static str, kind: &'static str) -> TypedDataField {
    TypedDataField { name, kind }
}

/// Field list for `EIP712Domain`.
pub const EIP712_DOMAIN_FIELDS: &[TypedDataField] = &[
    field("name", "string"),
    field("version", "string"),
    field("chainId", "uint256"),
    field("verifyingContract", "address"),
];

/// Field list for `Signer`.
pub const SIGNER_FIELDS: &[TypedDataField] =
    &[field("addr", "address"), field("metadata", "string")];

/// Field list for `ProofOfAuthority`.
pub const PROOF_OF_AUTHORITY_FIELDS: &[TypedDataField] = &[
    field("name", "string"),
    field("from", "address"),
    field("agreementCID", "string"),
    field("signers", "Signer[]"),
    field("app", "string"),
    field("timestamp", "uint256"),
    field("metadata", "string"),
];

/// Field list for `ProofOfSignature`.
pub const PROOF_OF_SIGNATURE_FIELDS: &[TypedDataField] = &[
    field("name", "string"),
    field("signer", "address"),
    field("agreementCID", "string"),
    field("app", "string"),
    field("timestamp", "uint256"),
    field("metadata", "string"),
];

/// Field list for `ProofOfAgreement`.
pub const PROOF_OF_AGREEMENT_FIELDS: &[TypedDataField] = &[
    field("agreementCID", "string"),
    field("signatureCIDs", "string[]"),
    field("app", "string"),
    field("timestamp", "uint256"),
    field("metadata", "string"),
];

/// The `types` object of a `signTypedData_v4` request: the domain fields
/// plus the field lists the primary type references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProofTypes {
    #[serde(rename = "EIP712Domain")]
    pub eip712_domain: &'static [TypedDataField],
    #[serde(rename = "Signer", skip_serializing_if = "Option::is_none")]
    pub signer: Option<&'static [TypedDataField]>,
    #[serde(rename = "ProofOfAuthority", skip_serializing_if = "Option::is_none")]
    pub proof_of_authority: Option<&'static [TypedDataField]>,
    #[serde(rename = "ProofOfSignature", skip_serializing_if = "Option::is_none")]
    pub proof_of_signature: Option<&'static [TypedDataField]>,
    #[serde(rename = "ProofOfAgreement", skip_serializing_if = "Option::is_none")]
    pub proof_of_agreement: Option<&'static [TypedDataField]>,
}

impl ProofTypes {
    /// Types table for a Proof-of-Authority document.
    pub const fn authority() -> Self {
        Self {
            eip712_domain: EIP712_DOMAIN_FIELDS,
            signer: Some(SIGNER_FIELDS),
            proof_of_authority: Some(PROOF_OF_AUTHORITY_FIELDS),
            proof_of_signature: None,
            proof_of_agreement: None,
        }
    }

    /// Types table for a Proof-of-Signature document.
    pub const fn signature() -> Self {
        Self {
            eip712_domain: EIP712_DOMAIN_FIELDS,
            signer: None,
            proof_of_authority: None,
            proof_of_signature: Some(PROOF_OF_SIGNATURE_FIELDS),
            proof_of_agreement: None,
        }
    }

    /// Types table for a Proof-of-Agreement document.
    pub const fn agreement() -> Self {
        Self {
            eip712_domain: EIP712_DOMAIN_FIELDS,
            signer: None,
            proof_of_authority: None,
            proof_of_signature: None,
            proof_of_agreement: Some(PROOF_OF_AGREEMENT_FIELDS),
        }
    }
}
