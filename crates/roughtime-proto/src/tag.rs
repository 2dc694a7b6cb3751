// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Wire-format tags.
//!
//! A tag is a 32-bit identifier read little-endian from four ASCII bytes;
//! `"NONC"` is `0x434e4f4e`. Sort order everywhere in the protocol is the
//! numeric order of the little-endian value, which is why `SIG\x00` sorts
//! first and `PAD\xff` sorts last even though neither is first or last in
//! ASCII order.

use std::fmt;

/// A four-byte wire-format tag, compared by its little-endian `u32` value.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Tag(u32);

impl Tag {
    /// Ed25519 signature, both at response level and inside a certificate.
    pub const SIG: Tag = Tag(0x0047_4953);
    /// Client nonce (64 bytes).
    pub const NONC: Tag = Tag(0x434e_4f4e);
    /// Delegation, nested inside a certificate.
    pub const DELE: Tag = Tag(0x454c_4544);
    /// Merkle authentication path (N × 64 bytes, possibly empty).
    pub const PATH: Tag = Tag(0x4854_4150);
    /// Uncertainty radius (u32 microseconds).
    pub const RADI: Tag = Tag(0x4944_4152);
    /// Delegated Ed25519 public key (32 bytes).
    pub const PUBK: Tag = Tag(0x4b42_5550);
    /// Midpoint (u64 microseconds since the Unix epoch).
    pub const MIDP: Tag = Tag(0x5044_494d);
    /// Signed response, nested inside a response.
    pub const SREP: Tag = Tag(0x5045_5253);
    /// End of the delegation validity window (u64 microseconds).
    pub const MAXT: Tag = Tag(0x5458_414d);
    /// Merkle tree root (64 bytes).
    pub const ROOT: Tag = Tag(0x544f_4f52);
    /// Certificate, nested inside a response.
    pub const CERT: Tag = Tag(0x5452_4543);
    /// Start of the delegation validity window (u64 microseconds).
    pub const MINT: Tag = Tag(0x544e_494d);
    /// Leaf index in the Merkle tree (u32).
    pub const INDX: Tag = Tag(0x5844_4e49);
    /// Zero padding sizing the request datagram to 1024 bytes.
    pub const PAD: Tag = Tag(0xff44_4150);

    /// Builds a tag from its four wire bytes.
    pub const fn from_bytes(bytes: [u8; 4]) -> Tag {
        Tag(u32::from_le_bytes(bytes))
    }

    /// The four wire bytes of the tag.
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// The numeric value used for sort order.
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bytes().escape_ascii())
    }
}
