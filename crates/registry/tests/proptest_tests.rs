//! Property-based tests for digest stability and registry invariants.

use alloy_primitives::{keccak256, Address, Bytes, B256};
use daosign_registry::{
    digest, struct_hash, Message, ProofOfAuthorityMsg, ProofRegistry, Signer,
    SignedProofOfAuthority,
};
use k256::ecdsa::{signature::hazmat::PrehashSigner, SigningKey, VerifyingKey};
use proptest::prelude::*;
use rand::rngs::OsRng;

/// Helper to sign a digest into the 65-byte wire form.
fn sign_digest(signing_key: &SigningKey, digest: B256) -> Bytes {
    let (sig, recovery_id) = signing_key.sign_prehash(digest.as_ref()).unwrap();
    let mut out = Vec::with_capacity(65);
    out.extend_from_slice(&sig.r().to_bytes());
    out.extend_from_slice(&sig.s().to_bytes());
    out.push(27 + recovery_id.to_byte());
    Bytes::from(out)
}

/// Get address from signing key
fn get_address(signing_key: &SigningKey) -> Address {
    let verifying_key = VerifyingKey::from(signing_key);
    let public_key = verifying_key.to_encoded_point(false);
    let public_key_bytes = &public_key.as_bytes()[1..];
    let hash = keccak256(public_key_bytes);
    Address::from_slice(&hash[12..])
}

// ============================================================================
// Strategies
// ============================================================================

fn arb_address() -> impl Strategy<Value = Address> {
    prop::array::uniform20(1u8..).prop_map(Address::from)
}

fn arb_cid() -> impl Strategy<Value = String> {
    "[1-9A-HJ-NP-Za-km-z]{46}"
}

fn arb_metadata() -> impl Strategy<Value = String> {
    "[ -~]{0,64}"
}

fn arb_signers() -> impl Strategy<Value = Vec<Signer>> {
    prop::collection::vec(
        (arb_address(), arb_metadata()).prop_map(|(addr, metadata)| Signer { addr, metadata }),
        0..5,
    )
}

fn arb_authority_message() -> impl Strategy<Value = ProofOfAuthorityMsg> {
    (
        arb_address(),
        arb_cid(),
        arb_signers(),
        any::<u64>(),
        arb_metadata(),
    )
        .prop_map(
            |(from, agreement_cid, signers, timestamp, metadata)| ProofOfAuthorityMsg {
                name: "Proof-of-Authority".to_owned(),
                from,
                agreement_cid,
                signers,
                app: "daosign".to_owned(),
                timestamp,
                metadata,
            },
        )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_digest_is_deterministic(message in arb_authority_message()) {
        prop_assert_eq!(
            digest(Message::Authority(&message)),
            digest(Message::Authority(&message))
        );
    }

    #[test]
    fn prop_struct_hash_is_timestamp_sensitive(message in arb_authority_message()) {
        let mut changed = message.clone();
        changed.timestamp = changed.timestamp.wrapping_add(1);
        prop_assert_ne!(
            struct_hash(Message::Authority(&message)),
            struct_hash(Message::Authority(&changed))
        );
    }

    #[test]
    fn prop_v_encodings_recover_identically(message in arb_authority_message()) {
        let key = SigningKey::random(&mut OsRng);
        let d = digest(Message::Authority(&message));

        let eth = sign_digest(&key, d);
        let mut raw = eth.to_vec();
        raw[64] -= 27;

        let recovered_eth = daosign_registry::recover(d, &eth).unwrap();
        let recovered_raw = daosign_registry::recover(d, &raw).unwrap();
        prop_assert_eq!(recovered_eth, recovered_raw);
        prop_assert_eq!(recovered_eth, get_address(&key));
    }

    #[test]
    fn prop_accepted_authority_roundtrips(
        proof_cid in arb_cid(),
        agreement_cid in arb_cid(),
        timestamp in any::<u64>(),
        metadata in arb_metadata(),
    ) {
        let key = SigningKey::random(&mut OsRng);
        let addr = get_address(&key);
        let message = ProofOfAuthorityMsg {
            name: "Proof-of-Authority".to_owned(),
            from: addr,
            agreement_cid,
            signers: vec![Signer { addr, metadata: metadata.clone() }],
            app: "daosign".to_owned(),
            timestamp,
            metadata,
        };
        let signature = sign_digest(&key, digest(Message::Authority(&message)));
        let proof = SignedProofOfAuthority {
            message,
            signature,
            proof_cid: proof_cid.clone(),
        };

        let registry = ProofRegistry::new();
        registry.store_proof_of_authority(proof.clone()).unwrap();

        let doc = registry.get_proof_of_authority(&proof_cid);
        prop_assert_eq!(doc.message, proof.message);
        prop_assert_eq!(doc.signature, proof.signature);
        prop_assert_eq!(doc.proof_cid, proof_cid.clone());
        prop_assert_eq!(registry.recorded_signer(&proof_cid), Some(addr));
    }

    #[test]
    fn prop_signer_index_keeps_last_occurrence(
        proof_cid in arb_cid(),
        agreement_cid in arb_cid(),
        signers in arb_signers(),
    ) {
        let key = SigningKey::random(&mut OsRng);
        let message = ProofOfAuthorityMsg {
            name: "Proof-of-Authority".to_owned(),
            from: get_address(&key),
            agreement_cid,
            signers,
            app: "daosign".to_owned(),
            timestamp: 0,
            metadata: String::new(),
        };
        let signature = sign_digest(&key, digest(Message::Authority(&message)));
        let proof = SignedProofOfAuthority {
            message: message.clone(),
            signature,
            proof_cid: proof_cid.clone(),
        };

        let registry = ProofRegistry::new();
        registry.store_proof_of_authority(proof).unwrap();

        for signer in &message.signers {
            let index = registry.signer_index(&proof_cid, signer.addr).unwrap();
            // The index points at an entry with the same address, and it is
            // the last position the address occurs at.
            let last = message
                .signers
                .iter()
                .rposition(|s| s.addr == signer.addr)
                .unwrap();
            prop_assert_eq!(index, last);
        }
    }
}
