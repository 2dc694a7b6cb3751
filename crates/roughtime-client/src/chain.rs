// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Chains of verified exchanges.
//!
//! A chain visits each directory server in order. The first link's nonce
//! is the caller's seed; every later link draws a fresh 64-byte blind and
//! uses `SHA-512(SHA-512(previous reply) || blind)` as its nonce, so the
//! chain cannot have been assembled before the earlier replies existed.
//! Each link stores the server's key, its seed (nonce or blind), and the
//! raw reply, which is everything needed to re-verify offline.
//!
//! The serialized form is a JSON document:
//!
//! ```json
//! { "links": [ { "publicKeyType": "ed25519",
//!                "serverPublicKey": "...", "nonceOrBlind": "...",
//!                "reply": "..." } ] }
//! ```
//!
//! with the byte fields in standard base64.

use std::collections::HashMap;
use std::io::{self, Read, Write};

use log::debug;
use ring::digest;
use serde::{Deserialize, Serialize};

use roughtime_proto::message::{encode_request, HASH_SIZE, NONCE_SIZE};
use roughtime_proto::verify_response;

use crate::directory::Server;
use crate::error::{ChainError, ClientError, ConfigError};
use crate::{transport, DEFAULT_TIMEOUT};

/// A serialized chain of exchanges.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Chain {
    /// The links, in the order they were built.
    pub links: Vec<Link>,
}

/// One verified exchange.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Link {
    /// Key algorithm of the server's long-term key.
    #[serde(rename = "publicKeyType")]
    pub public_key_type: String,
    /// The server's long-term public key.
    #[serde(rename = "serverPublicKey", with = "crate::b64")]
    pub server_public_key: Vec<u8>,
    /// The link's seed: the nonce itself for the first link, the blind
    /// for every later one.
    #[serde(rename = "nonceOrBlind", with = "crate::b64")]
    pub nonce_or_blind: Vec<u8>,
    /// The raw reply datagram.
    #[serde(with = "crate::b64")]
    pub reply: Vec<u8>,
}

impl Chain {
    /// Reads a chain document from JSON.
    pub fn from_reader<R: Read>(reader: R) -> io::Result<Chain> {
        serde_json::from_reader(reader)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Writes the chain document as JSON.
    pub fn to_writer<W: Write>(&self, mut writer: W) -> io::Result<()> {
        serde_json::to_writer(&mut writer, self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writer.write_all(b"\n")
    }
}

/// Builds a chain across `servers` and writes the document to `out`.
///
/// `initial_nonce` seeds the first link; pass `None` to draw 64 random
/// bytes instead. Every exchange is verified as it happens and any
/// failure aborts the whole chain with nothing written.
pub fn build_chain<W: Write>(
    out: W,
    servers: &[Server],
    initial_nonce: Option<[u8; NONCE_SIZE]>,
) -> io::Result<()> {
    if servers.is_empty() {
        return Err(ClientError::Config(ConfigError::NoServers).into());
    }
    let first_nonce = initial_nonce.unwrap_or_else(|| {
        let mut nonce = [0u8; NONCE_SIZE];
        rand::fill(&mut nonce);
        nonce
    });

    let mut links: Vec<Link> = Vec::with_capacity(servers.len());
    for (index, server) in servers.iter().enumerate() {
        let key = server
            .ed25519_key()
            .map_err(|e| io::Error::from(ClientError::Config(e)))?;
        let address = server
            .first_address()
            .map_err(|e| io::Error::from(ClientError::Config(e)))?;

        let (seed, nonce) = match links.last() {
            None => (first_nonce, first_nonce),
            Some(prev) => {
                let mut blind = [0u8; NONCE_SIZE];
                rand::fill(&mut blind);
                let nonce = derive_nonce(&sha512(&prev.reply), &blind);
                (blind, nonce)
            }
        };

        debug!("chain link {}: querying {} at {}", index, server.name, address);
        let reply = transport::exchange(address, &encode_request(&nonce), Some(DEFAULT_TIMEOUT))?;
        verify_response(&reply, &nonce, &key).map_err(|error| {
            io::Error::from(ClientError::Chain(ChainError::LinkVerification {
                index,
                error,
            }))
        })?;

        links.push(Link {
            public_key_type: server.public_key_type.clone(),
            server_public_key: server.public_key.clone(),
            nonce_or_blind: seed.to_vec(),
            reply,
        });
    }

    Chain { links }.to_writer(out)
}

/// Verifies every link of `chain` against the directory `servers`.
///
/// Each link's server key must appear in the directory, its stored reply
/// must verify under that key, and the nonces must chain: the first
/// link's seed is used directly, every later nonce is recomputed as
/// `SHA-512(SHA-512(previous reply) || seed)`.
pub fn verify_chain(chain: &Chain, servers: &[Server]) -> io::Result<()> {
    let directory: HashMap<&[u8], &Server> = servers
        .iter()
        .map(|s| (s.public_key.as_slice(), s))
        .collect();

    let mut prev_hash: Option<[u8; HASH_SIZE]> = None;
    for (index, link) in chain.links.iter().enumerate() {
        let server = directory
            .get(link.server_public_key.as_slice())
            .ok_or_else(|| io::Error::from(ClientError::Chain(ChainError::UnknownServer { index })))?;
        let key = server
            .ed25519_key()
            .map_err(|e| io::Error::from(ClientError::Config(e)))?;

        let seed: [u8; NONCE_SIZE] = link.nonce_or_blind.as_slice().try_into().map_err(|_| {
            io::Error::from(ClientError::Chain(ChainError::InvalidSeedLength {
                index,
                actual: link.nonce_or_blind.len(),
            }))
        })?;
        let nonce = match prev_hash {
            None => seed,
            Some(prev) => derive_nonce(&prev, &seed),
        };

        verify_response(&link.reply, &nonce, &key).map_err(|error| {
            io::Error::from(ClientError::Chain(ChainError::LinkVerification {
                index,
                error,
            }))
        })?;
        debug!("chain link {}: verified against {}", index, server.name);

        prev_hash = Some(sha512(&link.reply));
    }
    Ok(())
}

/// Derives a link's effective nonce from the previous reply's hash and
/// the link's blind.
fn derive_nonce(prev_hash: &[u8; HASH_SIZE], blind: &[u8; NONCE_SIZE]) -> [u8; NONCE_SIZE] {
    let mut ctx = digest::Context::new(&digest::SHA512);
    ctx.update(prev_hash);
    ctx.update(blind);
    let mut out = [0u8; NONCE_SIZE];
    out.copy_from_slice(ctx.finish().as_ref());
    out
}

fn sha512(data: &[u8]) -> [u8; HASH_SIZE] {
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(digest::digest(&digest::SHA512, data).as_ref());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_document_roundtrip() {
        let chain = Chain {
            links: vec![Link {
                public_key_type: "ed25519".into(),
                server_public_key: vec![1; 32],
                nonce_or_blind: vec![2; 64],
                reply: vec![3; 360],
            }],
        };
        let mut buf = Vec::new();
        chain.to_writer(&mut buf).unwrap();
        assert_eq!(buf.last(), Some(&b'\n'));

        let back = Chain::from_reader(buf.as_slice()).unwrap();
        assert_eq!(back.links.len(), 1);
        assert_eq!(back.links[0].server_public_key, vec![1; 32]);
        assert_eq!(back.links[0].nonce_or_blind, vec![2; 64]);
        assert_eq!(back.links[0].reply, vec![3; 360]);
    }

    #[test]
    fn test_chain_document_field_names() {
        let chain = Chain {
            links: vec![Link {
                public_key_type: "ed25519".into(),
                server_public_key: vec![0; 32],
                nonce_or_blind: vec![0; 64],
                reply: vec![],
            }],
        };
        let mut buf = Vec::new();
        chain.to_writer(&mut buf).unwrap();
        let json = String::from_utf8(buf).unwrap();
        for field in ["publicKeyType", "serverPublicKey", "nonceOrBlind", "reply"] {
            assert!(json.contains(field), "missing {field} in {json}");
        }
    }

    #[test]
    fn test_derive_nonce_matches_manual_hash() {
        let prev = sha512(b"reply bytes");
        let blind = [0x5Au8; NONCE_SIZE];
        let nonce = derive_nonce(&prev, &blind);

        let mut ctx = digest::Context::new(&digest::SHA512);
        ctx.update(&prev);
        ctx.update(&blind);
        assert_eq!(nonce.as_slice(), ctx.finish().as_ref());
    }

    #[test]
    fn test_verify_empty_chain_is_ok() {
        verify_chain(&Chain { links: vec![] }, &[]).unwrap();
    }

    #[test]
    fn test_build_chain_rejects_empty_directory() {
        let err = build_chain(Vec::new(), &[], None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_verify_unknown_server() {
        let chain = Chain {
            links: vec![Link {
                public_key_type: "ed25519".into(),
                server_public_key: vec![9; 32],
                nonce_or_blind: vec![0; 64],
                reply: vec![],
            }],
        };
        let err = verify_chain(&chain, &[]).unwrap_err();
        assert!(err.to_string().contains("not in directory"));
    }
}
