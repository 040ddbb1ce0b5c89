//! Message and signed-record types for the attestation registry.
//!
//! These are the shapes clients sign and submit. Serde field names follow
//! the EIP-712 type strings in [`crate::typed_data`], so the serialized form
//! of a message is exactly what a wallet's `signTypedData_v4` request
//! carries.

use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

/// Expected `app` field literal on every submitted message. Also the name
/// of the signing domain.
pub const APP_NAME: &str = "daosign";

/// Domain version, bumped only on breaking digest changes.
pub const DOMAIN_VERSION: &str = "0.1.0";

/// Expected `name` literal on a Proof-of-Authority message.
pub const PROOF_OF_AUTHORITY_NAME: &str = "Proof-of-Authority";

/// Expected `name` literal on a Proof-of-Signature message.
pub const PROOF_OF_SIGNATURE_NAME: &str = "Proof-of-Signature";

/// Byte length of an IPFS v0 base58 CID. CIDs are opaque here; only the
/// length is checked.
pub const CID_LENGTH: usize = 46;

/// EIP-712 signing domain.
///
/// The registry signs under one fixed domain: `chain_id` is zero and the
/// verifying contract is the zero address, because the registry itself is
/// chain-agnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// The fixed registry domain.
    pub fn registry() -> Self {
        Self {
            name: APP_NAME.to_owned(),
            version: DOMAIN_VERSION.to_owned(),
            chain_id: 0,
            verifying_contract: Address::ZERO,
        }
    }
}

impl Default for Eip712Domain {
    fn default() -> Self {
        Self::registry()
    }
}

/// One entitled signer inside a Proof-of-Authority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub addr: Address,
    pub metadata: String,
}

/// Declares who may sign the agreement stored at `agreement_cid`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOfAuthorityMsg {
    pub name: String,
    pub from: Address,
    #[serde(rename = "agreementCID")]
    pub agreement_cid: String,
    pub signers: Vec<Signer>,
    pub app: String,
    pub timestamp: u64,
    pub metadata: String,
}

/// One signer's acknowledgment. `agreement_cid` points at the proof CID of
/// a stored Proof-of-Authority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOfSignatureMsg {
    pub name: String,
    pub signer: Address,
    #[serde(rename = "agreementCID")]
    pub agreement_cid: String,
    pub app: String,
    pub timestamp: u64,
    pub metadata: String,
}

/// The completed bundle: one signature CID per authority signer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOfAgreementMsg {
    #[serde(rename = "agreementCID")]
    pub agreement_cid: String,
    #[serde(rename = "signatureCIDs")]
    pub signature_cids: Vec<String>,
    pub app: String,
    pub timestamp: u64,
    pub metadata: String,
}

/// A submitted Proof-of-Authority: message, 65-byte `r || s || v` signature,
/// and the content address the record is stored under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedProofOfAuthority {
    pub message: ProofOfAuthorityMsg,
    pub signature: Bytes,
    #[serde(rename = "proofCID")]
    pub proof_cid: String,
}

/// A submitted Proof-of-Signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedProofOfSignature {
    pub message: ProofOfSignatureMsg,
    pub signature: Bytes,
    #[serde(rename = "proofCID")]
    pub proof_cid: String,
}

/// A submitted Proof-of-Agreement. The signature is stored verbatim but
/// never recovered; agreements are system-generated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedProofOfAgreement {
    pub message: ProofOfAgreementMsg,
    pub signature: Bytes,
    #[serde(rename = "proofCID")]
    pub proof_cid: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_domain_is_fixed() {
        let domain = Eip712Domain::registry();
        assert_eq!(domain.name, "daosign");
        assert_eq!(domain.version, "0.1.0");
        assert_eq!(domain.chain_id, 0);
        assert_eq!(domain.verifying_contract, Address::ZERO);
        assert_eq!(domain, Eip712Domain::default());
    }

    #[test]
    fn test_serde_field_names_match_type_strings() {
        let msg = ProofOfAuthorityMsg {
            name: PROOF_OF_AUTHORITY_NAME.to_owned(),
            agreement_cid: "Q".repeat(CID_LENGTH),
            app: APP_NAME.to_owned(),
            ..Default::default()
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("agreementCID").is_some());
        assert!(json.get("agreement_cid").is_none());

        let agr = ProofOfAgreementMsg::default();
        let json = serde_json::to_value(&agr).unwrap();
        assert!(json.get("signatureCIDs").is_some());

        let signed = SignedProofOfSignature::default();
        let json = serde_json::to_value(&signed).unwrap();
        assert!(json.get("proofCID").is_some());
    }

    #[test]
    fn test_signed_record_json_roundtrip() {
        let signed = SignedProofOfAuthority {
            message: ProofOfAuthorityMsg {
                name: PROOF_OF_AUTHORITY_NAME.to_owned(),
                from: Address::repeat_byte(0x11),
                agreement_cid: "Q".repeat(CID_LENGTH),
                signers: vec![Signer {
                    addr: Address::repeat_byte(0x11),
                    metadata: "some metadata".to_owned(),
                }],
                app: APP_NAME.to_owned(),
                timestamp: 1_700_000_000,
                metadata: "proof metadata".to_owned(),
            },
            signature: Bytes::from(vec![0u8; 65]),
            proof_cid: "Q".repeat(CID_LENGTH),
        };

        let json = serde_json::to_string(&signed).unwrap();
        let back: SignedProofOfAuthority = serde_json::from_str(&json).unwrap();
        assert_eq!(signed, back);
    }
}
