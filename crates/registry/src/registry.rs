//! The public registry API: three writes, three reads.

use alloy_primitives::{Address, Bytes};
use parking_lot::RwLock;
use serde::Serialize;

use daosign_proofs::error::{ProofError, Result};
use daosign_proofs::recovery::recover;
use daosign_proofs::schema::{primary_type, ProofTypes};
use daosign_proofs::typed_data::{digest, Message};
use daosign_proofs::types::{
    Eip712Domain, ProofOfAgreementMsg, ProofOfAuthorityMsg, ProofOfSignatureMsg,
    SignedProofOfAgreement, SignedProofOfAuthority, SignedProofOfSignature,
};

use crate::events::{EventLog, RegistryEvent};
use crate::metrics::RegistryMetrics;
use crate::store::ProofState;
use crate::validation;

/// A read response: the stored message decorated with the signing domain
/// and the EIP-712 schema, serializing to the `signTypedData_v4` request
/// shape.
///
/// An unknown CID yields the zero-valued document; `proof_cid` is empty
/// exactly in that case.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofDocument<M> {
    pub domain: Eip712Domain,
    pub types: ProofTypes,
    pub primary_type: &'static str,
    pub message: M,
    pub signature: Bytes,
    #[serde(rename = "proofCID")]
    pub proof_cid: String,
}

/// Content-addressed attestation registry.
///
/// One exclusive lock spans stateful validation and commit, so a failed
/// write leaves no trace and events follow commit order. Reads share the
/// lock.
pub struct ProofRegistry {
    state: RwLock<ProofState>,
    events: EventLog,
    metrics: RegistryMetrics,
}

impl ProofRegistry {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ProofState::new()),
            events: EventLog::default(),
            metrics: RegistryMetrics::new(),
        }
    }

    /// Store a signed Proof-of-Authority.
    ///
    /// The signature must recover to `message.from` over the message's
    /// EIP-712 digest.
    pub fn store_proof_of_authority(&self, proof: SignedProofOfAuthority) -> Result<()> {
        let recovered = match recover(digest(Message::Authority(&proof.message)), &proof.signature)
        {
            Ok(addr) if addr == proof.message.from => addr,
            Ok(_) => {
                return Err(self.reject(
                    "proof-of-authority",
                    &proof.proof_cid,
                    ProofError::InvalidSignature,
                ))
            }
            Err(err) => return Err(self.reject("proof-of-authority", &proof.proof_cid, err)),
        };

        if let Err(err) = validation::validate_proof_of_authority(&proof) {
            return Err(self.reject("proof-of-authority", &proof.proof_cid, err));
        }

        let mut state = self.state.write();
        if state.insert_authority(proof.clone(), recovered) {
            tracing::warn!("Replacing existing proof-of-authority: {}", proof.proof_cid);
        }
        self.events
            .emit(RegistryEvent::NewProofOfAuthority(proof.clone()));
        drop(state);

        self.metrics.authorities_stored.inc();
        tracing::info!(
            "Stored proof-of-authority {} from {}",
            proof.proof_cid,
            proof.message.from
        );
        Ok(())
    }

    /// Store a signed Proof-of-Signature referencing a stored authority.
    pub fn store_proof_of_signature(&self, proof: SignedProofOfSignature) -> Result<()> {
        let recovered = match recover(digest(Message::Signature(&proof.message)), &proof.signature)
        {
            Ok(addr) if addr == proof.message.signer => addr,
            Ok(_) => {
                return Err(self.reject(
                    "proof-of-signature",
                    &proof.proof_cid,
                    ProofError::InvalidSignature,
                ))
            }
            Err(err) => return Err(self.reject("proof-of-signature", &proof.proof_cid, err)),
        };

        let mut state = self.state.write();
        if let Err(err) = validation::validate_proof_of_signature(&proof, &state) {
            drop(state);
            return Err(self.reject("proof-of-signature", &proof.proof_cid, err));
        }
        if state.insert_signature(proof.clone(), recovered) {
            tracing::warn!("Replacing existing proof-of-signature: {}", proof.proof_cid);
        }
        self.events
            .emit(RegistryEvent::NewProofOfSignature(proof.clone()));
        drop(state);

        self.metrics.signatures_stored.inc();
        tracing::info!(
            "Stored proof-of-signature {} by {}",
            proof.proof_cid,
            proof.message.signer
        );
        Ok(())
    }

    /// Store a Proof-of-Agreement bundle.
    ///
    /// The signature is persisted verbatim but not verified; agreements are
    /// system-generated.
    pub fn store_proof_of_agreement(&self, proof: SignedProofOfAgreement) -> Result<()> {
        let mut state = self.state.write();
        if let Err(err) = validation::validate_proof_of_agreement(&proof, &state) {
            drop(state);
            return Err(self.reject("proof-of-agreement", &proof.proof_cid, err));
        }
        if state.insert_agreement(proof.clone()) {
            tracing::warn!("Replacing existing proof-of-agreement: {}", proof.proof_cid);
        }
        self.events
            .emit(RegistryEvent::NewProofOfAgreement(proof.clone()));
        drop(state);

        self.metrics.agreements_stored.inc();
        tracing::info!("Stored proof-of-agreement {}", proof.proof_cid);
        Ok(())
    }

    /// Read a Proof-of-Authority document.
    pub fn get_proof_of_authority(&self, cid: &str) -> ProofDocument<ProofOfAuthorityMsg> {
        self.metrics.reads_served.inc();
        let state = self.state.read();
        let stored = state.authority(cid);
        tracing::debug!("Read proof-of-authority {} (found: {})", cid, stored.is_some());
        match stored {
            Some(proof) => document(
                ProofTypes::authority(),
                primary_type::PROOF_OF_AUTHORITY,
                proof.message.clone(),
                proof.signature.clone(),
                proof.proof_cid.clone(),
            ),
            None => document(
                ProofTypes::authority(),
                primary_type::PROOF_OF_AUTHORITY,
                ProofOfAuthorityMsg::default(),
                Bytes::new(),
                String::new(),
            ),
        }
    }

    /// Read a Proof-of-Signature document.
    pub fn get_proof_of_signature(&self, cid: &str) -> ProofDocument<ProofOfSignatureMsg> {
        self.metrics.reads_served.inc();
        let state = self.state.read();
        let stored = state.signature(cid);
        tracing::debug!("Read proof-of-signature {} (found: {})", cid, stored.is_some());
        match stored {
            Some(proof) => document(
                ProofTypes::signature(),
                primary_type::PROOF_OF_SIGNATURE,
                proof.message.clone(),
                proof.signature.clone(),
                proof.proof_cid.clone(),
            ),
            None => document(
                ProofTypes::signature(),
                primary_type::PROOF_OF_SIGNATURE,
                ProofOfSignatureMsg::default(),
                Bytes::new(),
                String::new(),
            ),
        }
    }

    /// Read a Proof-of-Agreement document.
    pub fn get_proof_of_agreement(&self, cid: &str) -> ProofDocument<ProofOfAgreementMsg> {
        self.metrics.reads_served.inc();
        let state = self.state.read();
        let stored = state.agreement(cid);
        tracing::debug!("Read proof-of-agreement {} (found: {})", cid, stored.is_some());
        match stored {
            Some(proof) => document(
                ProofTypes::agreement(),
                primary_type::PROOF_OF_AGREEMENT,
                proof.message.clone(),
                proof.signature.clone(),
                proof.proof_cid.clone(),
            ),
            None => document(
                ProofTypes::agreement(),
                primary_type::PROOF_OF_AGREEMENT,
                ProofOfAgreementMsg::default(),
                Bytes::new(),
                String::new(),
            ),
        }
    }

    /// Signer recorded at write time for `proof_cid`, if any.
    pub fn recorded_signer(&self, proof_cid: &str) -> Option<Address> {
        self.state.read().recorded_signer(proof_cid)
    }

    /// Position of `signer` on the authority stored at `authority_cid`.
    pub fn signer_index(&self, authority_cid: &str, signer: Address) -> Option<usize> {
        self.state.read().signer_index(authority_cid, signer)
    }

    /// The registry's event log.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The registry's metrics handle.
    pub fn metrics(&self) -> &RegistryMetrics {
        &self.metrics
    }

    fn reject(&self, kind: &str, cid: &str, err: ProofError) -> ProofError {
        self.metrics.writes_rejected.inc();
        tracing::debug!("Rejected {} {}: {}", kind, cid, err);
        err
    }
}

impl Default for ProofRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn document<M>(
    types: ProofTypes,
    primary_type: &'static str,
    message: M,
    signature: Bytes,
    proof_cid: String,
) -> ProofDocument<M> {
    ProofDocument {
        domain: Eip712Domain::registry(),
        types,
        primary_type,
        message,
        signature,
        proof_cid,
    }
}
