// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Response verification.
//!
//! A reply is accepted only if all of the following hold, checked in
//! order:
//!
//! 1. The delegation signature verifies under the server's long-term key
//!    over `DELEGATION_CONTEXT || DELE-bytes`.
//! 2. The response signature verifies under the delegated key over
//!    `RESPONSE_CONTEXT || SREP-bytes`.
//! 3. Rebuilding the Merkle root from the client nonce along `PATH`
//!    (leaves hashed with domain byte `0x00`, interior nodes with `0x01`,
//!    sibling side chosen by the low bit of `INDX` at each level)
//!    reproduces `ROOT`.
//! 4. The midpoint lies inside the delegation window,
//!    `MINT ≤ MIDP ≤ MAXT`.
//!
//! The signature subjects are the framed nested payloads captured at
//! decode time; the context and payload are concatenated into a single
//! contiguous Ed25519 input.

use std::time::Duration;

use ring::{digest, signature};

use crate::error::VerifyError;
use crate::message::{self, HASH_SIZE, NONCE_SIZE};
use crate::timestamp::Timestamp;

/// Context prefixed to the delegation bytes before signing (36 bytes,
/// including the trailing NUL).
pub const DELEGATION_CONTEXT: &[u8] = b"RoughTime v1 delegation signature--\x00";

/// Context prefixed to the signed-response bytes before signing (32
/// bytes, including the trailing NUL).
pub const RESPONSE_CONTEXT: &[u8] = b"RoughTime v1 response signature\x00";

/// A verified statement of the current time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerifiedTime {
    /// The server's asserted current time.
    pub midpoint: Timestamp,
    /// Half-width of the server's uncertainty interval.
    pub radius: Duration,
}

/// Verifies `reply` against the `nonce` it answers and the server's
/// long-term `public_key`, returning the attested time.
pub fn verify_response(
    reply: &[u8],
    nonce: &[u8; NONCE_SIZE],
    public_key: &[u8; 32],
) -> Result<VerifiedTime, VerifyError> {
    let resp = message::decode_response(reply)?;

    verify_signature(
        public_key,
        DELEGATION_CONTEXT,
        resp.cert.delegation_raw,
        &resp.cert.signature,
    )
    .map_err(|_| VerifyError::BadDelegation)?;

    verify_signature(
        &resp.cert.delegation.public_key,
        RESPONSE_CONTEXT,
        resp.signed_raw,
        &resp.signature,
    )
    .map_err(|_| VerifyError::BadSignature)?;

    let mut hash = hash_leaf(nonce);
    let mut index = resp.index;
    for sibling in resp.path.chunks_exact(HASH_SIZE) {
        if index & 1 == 0 {
            hash = hash_node(&hash, sibling);
        } else {
            hash = hash_node(sibling, &hash);
        }
        index >>= 1;
    }
    if hash != resp.signed.root {
        return Err(VerifyError::NonceMismatch);
    }

    let midpoint = resp.signed.midpoint;
    if midpoint < resp.cert.delegation.min || midpoint > resp.cert.delegation.max {
        return Err(VerifyError::InvalidMidpoint);
    }

    Ok(VerifiedTime {
        midpoint,
        radius: resp.signed.radius,
    })
}

fn verify_signature(
    public_key: &[u8; 32],
    context: &[u8],
    payload: &[u8],
    sig: &[u8; 64],
) -> Result<(), ring::error::Unspecified> {
    let key = signature::UnparsedPublicKey::new(&signature::ED25519, public_key);
    let mut subject = Vec::with_capacity(context.len() + payload.len());
    subject.extend_from_slice(context);
    subject.extend_from_slice(payload);
    key.verify(&subject, sig)
}

/// Hashes a leaf value: `SHA-512(0x00 || data)`.
pub fn hash_leaf(data: &[u8]) -> [u8; HASH_SIZE] {
    let mut ctx = digest::Context::new(&digest::SHA512);
    ctx.update(&[0x00]);
    ctx.update(data);
    to_hash(ctx.finish())
}

/// Hashes an interior node: `SHA-512(0x01 || left || right)`.
pub fn hash_node(left: &[u8], right: &[u8]) -> [u8; HASH_SIZE] {
    let mut ctx = digest::Context::new(&digest::SHA512);
    ctx.update(&[0x01]);
    ctx.update(left);
    ctx.update(right);
    to_hash(ctx.finish())
}

fn to_hash(d: digest::Digest) -> [u8; HASH_SIZE] {
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(d.as_ref());
    out
}
