// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Roughtime wire codec, message schemas, and response verification.
//!
//! Roughtime is an authenticated coarse time protocol: a client sends a
//! 64-byte nonce in a 1024-byte UDP datagram and receives a signed statement
//! of the current time (a midpoint and an uncertainty radius) together with
//! a Merkle proof that the nonce was covered by the signature.
//!
//! This crate contains everything that does not touch a socket: the
//! tag-value wire format ([`wire`]), the concrete message types
//! ([`message`]), and the cryptographic verification pipeline ([`verify`]).
//! Networking and chain building live in the companion client crate.
//!
//! # Usage
//!
//! ```no_run
//! use roughtime_proto::message::encode_request;
//! use roughtime_proto::verify::verify_response;
//!
//! let nonce = [0u8; 64];
//! let request = encode_request(&nonce);
//!
//! // Send `request` via UDP to a Roughtime server, receive `reply`.
//! # let reply: Vec<u8> = vec![];
//! # let server_public_key = [0u8; 32];
//!
//! let time = verify_response(&reply, &nonce, &server_public_key).unwrap();
//! println!(
//!     "midpoint {} (±{} µs)",
//!     time.midpoint,
//!     time.radius.as_micros()
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Error types for wire parsing and response verification.
pub mod error;

/// Roughtime message schemas and the request builder.
pub mod message;

/// Wire-format tags and the fourteen protocol constants.
pub mod tag;

/// Microsecond-resolution timestamps as carried on the wire.
pub mod timestamp;

/// Response verification: signatures, Merkle path, delegation window.
pub mod verify;

/// The tag-value wire codec: encoder and decoder cursors.
pub mod wire;

pub use error::{ParseError, VerifyError};
pub use tag::Tag;
pub use timestamp::Timestamp;
pub use verify::{verify_response, VerifiedTime};
