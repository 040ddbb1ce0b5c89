//! Structural and cross-referential validation for incoming proofs.
//!
//! Authority checks are stateless. Signature and agreement checks also read
//! stored state; the registry runs them under the same lock that guards the
//! commit, so the state they see is the state the write lands on.

use alloy_primitives::Address;
use daosign_proofs::error::{ProofError, Result};
use daosign_proofs::types::{
    SignedProofOfAgreement, SignedProofOfAuthority, SignedProofOfSignature, APP_NAME, CID_LENGTH,
    PROOF_OF_AUTHORITY_NAME, PROOF_OF_SIGNATURE_NAME,
};

use crate::store::ProofState;

// CIDs are opaque; only the v0 base58 length is enforced.
fn is_valid_cid(cid: &str) -> bool {
    cid.len() == CID_LENGTH
}

/// Structural checks for a Proof-of-Authority.
pub fn validate_proof_of_authority(proof: &SignedProofOfAuthority) -> Result<()> {
    if !is_valid_cid(&proof.proof_cid) {
        return Err(ProofError::InvalidProofCid);
    }
    if proof.message.app != APP_NAME {
        return Err(ProofError::InvalidAppName);
    }
    if proof.message.name != PROOF_OF_AUTHORITY_NAME {
        return Err(ProofError::InvalidProofName);
    }
    if !is_valid_cid(&proof.message.agreement_cid) {
        return Err(ProofError::InvalidAgreementCid);
    }
    if proof.message.signers.iter().any(|s| s.addr == Address::ZERO) {
        return Err(ProofError::InvalidSigner);
    }
    Ok(())
}

/// Checks for a Proof-of-Signature against stored state.
///
/// The referenced agreement CID must name a stored authority that lists
/// `message.signer`; an unknown authority and an unregistered signer fail
/// identically.
pub fn validate_proof_of_signature(
    proof: &SignedProofOfSignature,
    state: &ProofState,
) -> Result<()> {
    if !is_valid_cid(&proof.proof_cid) {
        return Err(ProofError::InvalidProofCid);
    }
    if proof.message.app != APP_NAME {
        return Err(ProofError::InvalidAppName);
    }
    if proof.message.name != PROOF_OF_SIGNATURE_NAME {
        return Err(ProofError::InvalidProofName);
    }

    let index = state
        .signer_index(&proof.message.agreement_cid, proof.message.signer)
        .ok_or(ProofError::InvalidSigner)?;
    let authority = state
        .authority(&proof.message.agreement_cid)
        .ok_or(ProofError::InvalidSigner)?;
    match authority.message.signers.get(index) {
        Some(signer) if signer.addr == proof.message.signer => Ok(()),
        _ => Err(ProofError::InvalidSigner),
    }
}

/// Checks for a Proof-of-Agreement against stored state.
///
/// Requires a stored, well-named authority, one signature CID per authority
/// signer, and every referenced Proof-of-Signature to be signed by a member
/// of the authority's signer set. Signature CIDs are not checked for
/// distinctness; the length equality is the only cardinality guard.
pub fn validate_proof_of_agreement(
    proof: &SignedProofOfAgreement,
    state: &ProofState,
) -> Result<()> {
    if !is_valid_cid(&proof.proof_cid) {
        return Err(ProofError::InvalidProofCid);
    }
    if proof.message.app != APP_NAME {
        return Err(ProofError::InvalidAppName);
    }

    let authority = state
        .authority(&proof.message.agreement_cid)
        .filter(|a| a.message.name == PROOF_OF_AUTHORITY_NAME)
        .ok_or(ProofError::InvalidAuthorityName)?;

    if authority.message.signers.len() != proof.message.signature_cids.len() {
        return Err(ProofError::InvalidSignaturesLength);
    }

    for cid in &proof.message.signature_cids {
        let signer = state
            .signature(cid)
            .map(|s| s.message.signer)
            .ok_or(ProofError::InvalidSignatureSigner)?;
        if state
            .signer_index(&proof.message.agreement_cid, signer)
            .is_none()
        {
            return Err(ProofError::InvalidSignatureSigner);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use daosign_proofs::types::{
        ProofOfAgreementMsg, ProofOfAuthorityMsg, ProofOfSignatureMsg, Signer,
    };

    fn cid(fill: char) -> String {
        std::iter::repeat(fill).take(CID_LENGTH).collect()
    }

    fn valid_authority() -> SignedProofOfAuthority {
        let signer = Address::repeat_byte(0xaa);
        SignedProofOfAuthority {
            message: ProofOfAuthorityMsg {
                name: PROOF_OF_AUTHORITY_NAME.to_owned(),
                from: signer,
                agreement_cid: cid('A'),
                signers: vec![Signer {
                    addr: signer,
                    metadata: "some metadata".to_owned(),
                }],
                app: APP_NAME.to_owned(),
                timestamp: 1_700_000_000,
                metadata: "proof metadata".to_owned(),
            },
            signature: Default::default(),
            proof_cid: cid('P'),
        }
    }

    fn state_with_authority(proof: &SignedProofOfAuthority) -> ProofState {
        let mut state = ProofState::new();
        state.insert_authority(proof.clone(), proof.message.from);
        state
    }

    #[test]
    fn test_authority_accepts_valid() {
        assert_eq!(validate_proof_of_authority(&valid_authority()), Ok(()));
    }

    #[test]
    fn test_authority_rejects_bad_cid_lengths() {
        let mut proof = valid_authority();
        proof.proof_cid = "...".to_owned();
        assert_eq!(
            validate_proof_of_authority(&proof),
            Err(ProofError::InvalidProofCid)
        );

        let mut proof = valid_authority();
        proof.proof_cid = cid('P') + "x"; // 47 bytes
        assert_eq!(
            validate_proof_of_authority(&proof),
            Err(ProofError::InvalidProofCid)
        );

        let mut proof = valid_authority();
        proof.message.agreement_cid.pop(); // 45 bytes
        assert_eq!(
            validate_proof_of_authority(&proof),
            Err(ProofError::InvalidAgreementCid)
        );
    }

    #[test]
    fn test_authority_rejects_wrong_literals() {
        let mut proof = valid_authority();
        proof.message.app = "DAOsign".to_owned();
        assert_eq!(
            validate_proof_of_authority(&proof),
            Err(ProofError::InvalidAppName)
        );

        let mut proof = valid_authority();
        proof.message.name = "Proof of Authority".to_owned();
        assert_eq!(
            validate_proof_of_authority(&proof),
            Err(ProofError::InvalidProofName)
        );
    }

    #[test]
    fn test_authority_rejects_zero_address_signer() {
        let mut proof = valid_authority();
        proof.message.signers.push(Signer {
            addr: Address::ZERO,
            metadata: "some metadata".to_owned(),
        });
        assert_eq!(
            validate_proof_of_authority(&proof),
            Err(ProofError::InvalidSigner)
        );
    }

    #[test]
    fn test_authority_accepts_empty_signer_list() {
        let mut proof = valid_authority();
        proof.message.signers.clear();
        assert_eq!(validate_proof_of_authority(&proof), Ok(()));
    }

    fn valid_signature_proof(authority: &SignedProofOfAuthority) -> SignedProofOfSignature {
        SignedProofOfSignature {
            message: ProofOfSignatureMsg {
                name: PROOF_OF_SIGNATURE_NAME.to_owned(),
                signer: authority.message.from,
                agreement_cid: authority.proof_cid.clone(),
                app: APP_NAME.to_owned(),
                timestamp: 1_700_000_100,
                metadata: String::new(),
            },
            signature: Default::default(),
            proof_cid: cid('S'),
        }
    }

    #[test]
    fn test_signature_requires_registered_signer() {
        let authority = valid_authority();
        let state = state_with_authority(&authority);

        let proof = valid_signature_proof(&authority);
        assert_eq!(validate_proof_of_signature(&proof, &state), Ok(()));

        let mut stranger = proof.clone();
        stranger.message.signer = Address::repeat_byte(0xdd);
        assert_eq!(
            validate_proof_of_signature(&stranger, &state),
            Err(ProofError::InvalidSigner)
        );

        let mut unknown_authority = proof;
        unknown_authority.message.agreement_cid = cid('Z');
        assert_eq!(
            validate_proof_of_signature(&unknown_authority, &state),
            Err(ProofError::InvalidSigner)
        );
    }

    #[test]
    fn test_agreement_cardinality_and_signers() {
        let authority = valid_authority();
        let mut state = state_with_authority(&authority);
        let signature = valid_signature_proof(&authority);
        state.insert_signature(signature.clone(), signature.message.signer);

        let proof = SignedProofOfAgreement {
            message: ProofOfAgreementMsg {
                agreement_cid: authority.proof_cid.clone(),
                signature_cids: vec![signature.proof_cid.clone()],
                app: APP_NAME.to_owned(),
                timestamp: 1_700_000_200,
                metadata: String::new(),
            },
            signature: Default::default(),
            proof_cid: cid('G'),
        };
        assert_eq!(validate_proof_of_agreement(&proof, &state), Ok(()));

        let mut short = proof.clone();
        short.message.signature_cids.clear();
        assert_eq!(
            validate_proof_of_agreement(&short, &state),
            Err(ProofError::InvalidSignaturesLength)
        );

        let mut unknown_signature = proof.clone();
        unknown_signature.message.signature_cids = vec![cid('Z')];
        assert_eq!(
            validate_proof_of_agreement(&unknown_signature, &state),
            Err(ProofError::InvalidSignatureSigner)
        );

        let mut missing_authority = proof;
        missing_authority.message.agreement_cid = cid('Z');
        assert_eq!(
            validate_proof_of_agreement(&missing_authority, &state),
            Err(ProofError::InvalidAuthorityName)
        );
    }
}
