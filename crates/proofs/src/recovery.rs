//! Ethereum-style signer recovery from 65-byte signatures.

use std::sync::OnceLock;

use alloy_primitives::{b256, keccak256, Address, B256};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message as SecpMessage, Secp256k1};

use crate::error::{ProofError, Result};

/// Byte length of an `r || s || v` signature.
pub const SIGNATURE_LENGTH: usize = 65;

// Half the secp256k1 group order. Signatures with `s` above it have a
// second valid `(r, -s mod n, v')` form and are rejected as malleable.
const MAX_LOW_S: B256 = b256!("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0");

/// Recover the signer address of `digest` from a 65-byte signature.
///
/// Accepts `v` as a raw recovery id (0/1) or in Ethereum form (27/28).
/// Fails with [`ProofError::InvalidSignature`] on any malformed input,
/// high-`s` signature, or a recovery yielding the zero address.
pub fn recover(digest: B256, signature: &[u8]) -> Result<Address> {
    let bytes: &[u8; SIGNATURE_LENGTH] = signature
        .try_into()
        .map_err(|_| ProofError::InvalidSignature)?;

    // Wallets emit v as 27/28; raw recovery ids come in as 0/1.
    let v = match bytes[SIGNATURE_LENGTH - 1] {
        v @ (0 | 1) => v + 27,
        v => v,
    };
    if v != 27 && v != 28 {
        return Err(ProofError::InvalidSignature);
    }

    let s = B256::from_slice(bytes.get(32..64).ok_or(ProofError::InvalidSignature)?);
    if s > MAX_LOW_S {
        return Err(ProofError::InvalidSignature);
    }

    let recid =
        RecoveryId::from_i32(i32::from(v - 27)).map_err(|_| ProofError::InvalidSignature)?;
    let compact = bytes.get(..64).ok_or(ProofError::InvalidSignature)?;
    let recoverable = RecoverableSignature::from_compact(compact, recid)
        .map_err(|_| ProofError::InvalidSignature)?;

    let message = SecpMessage::from_digest_slice(digest.as_slice())
        .map_err(|_| ProofError::InvalidSignature)?;
    let pubkey = secp()
        .recover_ecdsa(&message, &recoverable)
        .map_err(|_| ProofError::InvalidSignature)?;

    let uncompressed = pubkey.serialize_uncompressed();
    let pubkey_payload = uncompressed.get(1..).ok_or(ProofError::InvalidSignature)?;
    let hash = keccak256(pubkey_payload);
    let address_bytes = hash.as_slice().get(12..).ok_or(ProofError::InvalidSignature)?;
    let recovered = Address::from_slice(address_bytes);

    // The zero address is the failure sentinel, never a valid signer.
    if recovered == Address::ZERO {
        return Err(ProofError::InvalidSignature);
    }
    Ok(recovered)
}

fn secp() -> &'static Secp256k1<All> {
    static SECP: OnceLock<Secp256k1<All>> = OnceLock::new();
    SECP.get_or_init(Secp256k1::new)
}
