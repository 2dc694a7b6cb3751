// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! The five Roughtime message schemas.
//!
//! Each type decodes and encodes itself field by field in the ascending
//! numeric tag order the protocol mandates: requests are `NONC, PAD`;
//! responses `SIG, PATH, SREP, CERT, INDX`; signed responses
//! `RADI, MIDP, ROOT`; certificates `SIG, DELE`; delegations
//! `PUBK, MINT, MAXT`.
//!
//! [`Response`] and [`Certificate`] additionally capture the raw framed
//! bytes of their nested `SREP` and `DELE` payloads. Signature
//! verification must run over exactly the bytes the server signed, so
//! those slices alias the reply buffer rather than being re-encoded.

use std::time::Duration;

use crate::error::ParseError;
use crate::tag::Tag;
use crate::timestamp::Timestamp;
use crate::wire::{self, Decoder, Encoder, DATAGRAM_SIZE};

/// Byte length of a client nonce.
pub const NONCE_SIZE: usize = 64;

/// Byte length of a SHA-512 hash, and therefore of Merkle tree nodes.
pub const HASH_SIZE: usize = 64;

/// A client request: a 64-byte nonce padded out to a full datagram.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Request {
    /// The random challenge the server must incorporate into its proof.
    pub nonce: [u8; NONCE_SIZE],
}

impl Request {
    /// Reads a request. The padding field is not interpreted.
    pub fn decode_from(st: &mut Decoder<'_>) -> Result<Request, ParseError> {
        Ok(Request {
            nonce: st.bytes64(Tag::NONC)?,
        })
    }

    /// Writes the request, sizing `PAD` so the message is exactly
    /// [`DATAGRAM_SIZE`] bytes.
    pub fn encode_into(&self, st: &mut Encoder<'_>) {
        st.ntags(2);
        st.bytes64(Tag::NONC, &self.nonce);
        st.bytes(Tag::PAD, DATAGRAM_SIZE - 2 * 8 - NONCE_SIZE).fill(0);
    }
}

/// Encodes a request datagram for `nonce`. Always 1024 bytes.
pub fn encode_request(nonce: &[u8; NONCE_SIZE]) -> Vec<u8> {
    let msg = wire::encode(|st| Request { nonce: *nonce }.encode_into(st));
    debug_assert_eq!(msg.len(), DATAGRAM_SIZE);
    msg
}

/// The signed portion of a response.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SignedResponse {
    /// Half-width of the server's uncertainty interval.
    pub radius: Duration,
    /// The server's asserted current time.
    pub midpoint: Timestamp,
    /// Root of the Merkle tree covering the batch of client nonces.
    pub root: [u8; HASH_SIZE],
}

impl SignedResponse {
    /// Reads a signed response.
    pub fn decode_from(st: &mut Decoder<'_>) -> Result<SignedResponse, ParseError> {
        Ok(SignedResponse {
            radius: st.duration(Tag::RADI)?,
            midpoint: st.time(Tag::MIDP)?,
            root: st.bytes64(Tag::ROOT)?,
        })
    }

    /// Writes a signed response.
    pub fn encode_into(&self, st: &mut Encoder<'_>) {
        st.ntags(3);
        st.duration(Tag::RADI, self.radius);
        st.time(Tag::MIDP, self.midpoint);
        st.bytes64(Tag::ROOT, &self.root);
    }
}

/// A delegation: the server's short-lived online key and its validity
/// window.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Delegation {
    /// The delegated Ed25519 public key signing responses in the window.
    pub public_key: [u8; 32],
    /// Start of the validity window.
    pub min: Timestamp,
    /// End of the validity window.
    pub max: Timestamp,
}

impl Delegation {
    /// Reads a delegation.
    pub fn decode_from(st: &mut Decoder<'_>) -> Result<Delegation, ParseError> {
        Ok(Delegation {
            public_key: st.bytes32(Tag::PUBK)?,
            min: st.time(Tag::MINT)?,
            max: st.time(Tag::MAXT)?,
        })
    }

    /// Writes a delegation.
    pub fn encode_into(&self, st: &mut Encoder<'_>) {
        st.ntags(3);
        st.bytes32(Tag::PUBK, &self.public_key);
        st.time(Tag::MINT, self.min);
        st.time(Tag::MAXT, self.max);
    }
}

/// A certificate: a delegation signed by the server's long-term key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Certificate<'m> {
    /// Signature by the long-term key over the raw delegation bytes.
    pub signature: [u8; 64],
    /// The parsed delegation.
    pub delegation: Delegation,
    /// The framed `DELE` payload exactly as received; this, not a
    /// re-encoding, is the signature's subject.
    pub delegation_raw: &'m [u8],
}

impl<'m> Certificate<'m> {
    /// Reads a certificate, keeping the raw delegation bytes.
    pub fn decode_from(st: &mut Decoder<'m>) -> Result<Certificate<'m>, ParseError> {
        let signature = st.bytes64(Tag::SIG)?;
        let (delegation, delegation_raw) = st.message(Tag::DELE, Delegation::decode_from)?;
        Ok(Certificate {
            signature,
            delegation,
            delegation_raw,
        })
    }

    /// Writes the certificate, re-encoding the delegation.
    pub fn encode_into(&self, st: &mut Encoder<'_>) {
        st.ntags(2);
        st.bytes64(Tag::SIG, &self.signature);
        st.message(Tag::DELE, |sub| self.delegation.encode_into(sub));
    }
}

/// A server response to a single request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Response<'m> {
    /// Signature by the delegated key over the raw signed-response bytes.
    pub signature: [u8; 64],
    /// Merkle authentication path: zero or more 64-byte sibling hashes,
    /// leaf first.
    pub path: &'m [u8],
    /// The parsed signed response.
    pub signed: SignedResponse,
    /// The framed `SREP` payload exactly as received.
    pub signed_raw: &'m [u8],
    /// The certificate delegating to the signing key.
    pub cert: Certificate<'m>,
    /// Index of the client's leaf in the Merkle tree.
    pub index: u32,
}

impl<'m> Response<'m> {
    /// Reads a response, keeping the raw `SREP` and `DELE` bytes for
    /// signature verification.
    pub fn decode_from(st: &mut Decoder<'m>) -> Result<Response<'m>, ParseError> {
        let signature = st.bytes64(Tag::SIG)?;
        let path = st.bytes(Tag::PATH)?;
        if path.len() % HASH_SIZE != 0 {
            return Err(ParseError::InvalidPath);
        }
        let (signed, signed_raw) = st.message(Tag::SREP, SignedResponse::decode_from)?;
        let (cert, _) = st.message(Tag::CERT, Certificate::decode_from)?;
        let index = st.uint32(Tag::INDX)?;
        Ok(Response {
            signature,
            path,
            signed,
            signed_raw,
            cert,
            index,
        })
    }

    /// Writes the response, re-encoding the nested messages.
    pub fn encode_into(&self, st: &mut Encoder<'_>) {
        st.ntags(5);
        st.bytes64(Tag::SIG, &self.signature);
        st.bytes(Tag::PATH, self.path.len()).copy_from_slice(self.path);
        st.message(Tag::SREP, |sub| self.signed.encode_into(sub));
        st.message(Tag::CERT, |sub| self.cert.encode_into(sub));
        st.uint32(Tag::INDX, self.index);
    }
}

/// Decodes a reply datagram into a [`Response`].
pub fn decode_response(reply: &[u8]) -> Result<Response<'_>, ParseError> {
    wire::decode(reply, Response::decode_from)
}
