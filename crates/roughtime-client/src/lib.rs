// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Blocking Roughtime client.
//!
//! One exchange sends a 64-byte nonce in a 1024-byte UDP datagram and
//! verifies the signed reply: two Ed25519 signatures (a delegation by the
//! server's long-term key, a response by the delegated key), a Merkle
//! proof that the nonce was covered, and the delegation validity window.
//!
//! The [`chain`] module strings verified exchanges across several servers
//! so that each nonce depends on the previous server's reply, which is
//! what the `notary` tool uses to timestamp a file hash.
//!
//! # Usage
//!
//! ```no_run
//! let pk = roughtime_client::decode_public_key(
//!     "etPaaIxcBMY1oUeGpwvPMCJMwlRVNxv51KK/tktoJTQ=",
//! ).unwrap();
//! let time = roughtime_client::request("roughtime.sandbox.google.com:2002", &pk).unwrap();
//! println!(
//!     "midpoint {} (±{} µs)",
//!     time.midpoint,
//!     time.radius.as_micros()
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::io;
use std::net::ToSocketAddrs;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::ClientError;

/// Chain building and verification across several servers.
pub mod chain;
/// The server directory loaded from a JSON document.
pub mod directory;
/// Client error types.
pub mod error;

mod b64;
mod transport;

pub use roughtime_proto::message::NONCE_SIZE;
pub use roughtime_proto::{verify_response, ParseError, Timestamp, VerifiedTime, VerifyError};
pub use transport::exchange;

use roughtime_proto::message::encode_request;

/// Default timeout applied by [`request`] and [`request_with_timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Decodes a base64-encoded Ed25519 public key (32 bytes).
///
/// # Examples
///
/// ```
/// let pk = roughtime_client::decode_public_key(
///     "etPaaIxcBMY1oUeGpwvPMCJMwlRVNxv51KK/tktoJTQ=",
/// ).unwrap();
/// assert_eq!(pk.len(), 32);
/// ```
pub fn decode_public_key(base64_key: &str) -> io::Result<[u8; 32]> {
    let bytes = BASE64.decode(base64_key.trim()).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid base64 public key: {e}"),
        )
    })?;
    bytes.as_slice().try_into().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("public key must be 32 bytes, got {}", bytes.len()),
        )
    })
}

/// Queries a Roughtime server with a fresh random nonce and a 5 second
/// timeout.
///
/// # Arguments
///
/// * `addr` - Server address (e.g. `"roughtime.sandbox.google.com:2002"`)
/// * `public_key` - The server's long-term Ed25519 public key
///
/// # Errors
///
/// Returns `io::Error` if the address does not resolve, the socket I/O
/// fails or times out, or the reply fails any verification step. The
/// verification error can be recovered via [`io::Error::get_ref`] and a
/// downcast to [`error::ClientError`].
pub fn request<A: ToSocketAddrs>(addr: A, public_key: &[u8; 32]) -> io::Result<VerifiedTime> {
    request_with_timeout(addr, public_key, DEFAULT_TIMEOUT)
}

/// Queries a Roughtime server with a fresh random nonce and a
/// configurable timeout.
pub fn request_with_timeout<A: ToSocketAddrs>(
    addr: A,
    public_key: &[u8; 32],
    timeout: Duration,
) -> io::Result<VerifiedTime> {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::fill(&mut nonce);
    request_with_nonce(addr, public_key, &nonce, Some(timeout))
}

/// Queries a Roughtime server with a caller-supplied nonce.
///
/// `timeout` of `None` leaves the socket's default blocking behavior in
/// place.
pub fn request_with_nonce<A: ToSocketAddrs>(
    addr: A,
    public_key: &[u8; 32],
    nonce: &[u8; NONCE_SIZE],
    timeout: Option<Duration>,
) -> io::Result<VerifiedTime> {
    let datagram = encode_request(nonce);
    let reply = transport::exchange(addr, &datagram, timeout)?;
    verify_response(&reply, nonce, public_key)
        .map_err(|e| io::Error::from(ClientError::Verify(e)))
}
