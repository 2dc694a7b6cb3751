// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! The Roughtime tag-value wire codec.
//!
//! Every Roughtime message is a header followed by a concatenated body:
//!
//! ```text
//! num_tags: u32 LE
//! offsets:  [u32 LE; N-1]   (start of fields 1..N-1 within the body;
//!                            field 0 implicitly starts at 0)
//! tags:     [u32 LE; N]     (strictly ascending numeric order)
//! body:     [u8]            (field payloads, each a multiple of 4 bytes)
//! ```
//!
//! The header occupies `8 × num_tags` bytes when `num_tags ≥ 1` and 4
//! bytes for an empty message. The codec does not interpret tag
//! semantics; both sides are single-pass cursors that visit fields in
//! ascending tag order. [`Decoder`] borrows the input buffer and hands
//! out aliasing slices; [`Encoder`] fills a datagram-sized backing buffer
//! and panics on misuse, which is a programming error rather than a
//! condition untrusted input can trigger.

mod decode;
mod encode;

pub use decode::{decode, Decoder};
pub use encode::{encode, Encoder};

/// Size of a Roughtime datagram. Requests are exactly this long and
/// responses never exceed it.
pub const DATAGRAM_SIZE: usize = 1024;

/// Maximum number of fields a message may declare.
pub const MAX_FIELDS: u32 = 128;
