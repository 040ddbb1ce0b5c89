//! In-memory registry state: the five proof maps.
//!
//! `ProofState` is plain data plus indexing; it assumes validation already
//! passed and performs no checks of its own. All maps move together under
//! the registry's single write lock, so a caller never observes a record
//! without its signer index.

use std::collections::HashMap;

use alloy_primitives::Address;
use daosign_proofs::types::{
    SignedProofOfAgreement, SignedProofOfAuthority, SignedProofOfSignature,
};

/// The registry's persistent state.
#[derive(Debug, Default)]
pub struct ProofState {
    /// Proof-of-Authority records by proof CID.
    poaus: HashMap<String, SignedProofOfAuthority>,
    /// Proof-of-Signature records by proof CID.
    posis: HashMap<String, SignedProofOfSignature>,
    /// Proof-of-Agreement records by proof CID.
    poags: HashMap<String, SignedProofOfAgreement>,
    /// Signer recovered at write time, by proof CID. Agreements carry no
    /// recovered signer and never appear here.
    proof_signers: HashMap<String, Address>,
    /// Per-authority reverse index: signer address -> position in the
    /// authority's `signers` list.
    authority_signer_index: HashMap<String, HashMap<Address, usize>>,
}

impl ProofState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored authority at `cid`, if any.
    pub fn authority(&self, cid: &str) -> Option<&SignedProofOfAuthority> {
        self.poaus.get(cid)
    }

    /// Stored signature proof at `cid`, if any.
    pub fn signature(&self, cid: &str) -> Option<&SignedProofOfSignature> {
        self.posis.get(cid)
    }

    /// Stored agreement at `cid`, if any.
    pub fn agreement(&self, cid: &str) -> Option<&SignedProofOfAgreement> {
        self.poags.get(cid)
    }

    /// Position of `signer` in the signer list of the authority stored at
    /// `authority_cid`. `None` means the authority is unknown or the signer
    /// is not registered on it; for a duplicated address it is the last
    /// declared position.
    pub fn signer_index(&self, authority_cid: &str, signer: Address) -> Option<usize> {
        self.authority_signer_index
            .get(authority_cid)?
            .get(&signer)
            .copied()
    }

    /// Signer recorded at write time for `proof_cid`.
    pub fn recorded_signer(&self, proof_cid: &str) -> Option<Address> {
        self.proof_signers.get(proof_cid).copied()
    }

    /// Store a validated authority and rebuild its signer index.
    ///
    /// Returns `true` when an existing record under the same CID was
    /// replaced.
    pub fn insert_authority(&mut self, proof: SignedProofOfAuthority, recovered: Address) -> bool {
        let mut index = HashMap::with_capacity(proof.message.signers.len());
        for (position, signer) in proof.message.signers.iter().enumerate() {
            // Later occurrence of a duplicated address wins.
            index.insert(signer.addr, position);
        }
        self.authority_signer_index
            .insert(proof.proof_cid.clone(), index);
        self.proof_signers.insert(proof.proof_cid.clone(), recovered);
        self.poaus.insert(proof.proof_cid.clone(), proof).is_some()
    }

    /// Store a validated signature proof.
    pub fn insert_signature(&mut self, proof: SignedProofOfSignature, recovered: Address) -> bool {
        self.proof_signers.insert(proof.proof_cid.clone(), recovered);
        self.posis.insert(proof.proof_cid.clone(), proof).is_some()
    }

    /// Store a validated agreement. No signer is recorded.
    pub fn insert_agreement(&mut self, proof: SignedProofOfAgreement) -> bool {
        self.poags.insert(proof.proof_cid.clone(), proof).is_some()
    }

    /// Number of stored records across all three proof kinds.
    pub fn len(&self) -> usize {
        self.poaus.len() + self.posis.len() + self.poags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
