// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Error types for Roughtime message parsing and verification.
//!
//! [`ParseError`] covers everything the codec and the message schemas can
//! reject about a byte buffer; [`VerifyError`] covers the cryptographic
//! pipeline and wraps `ParseError` for decoding failures. Both convert to
//! [`std::io::Error`] so networking callers can stay on `io::Result`.

use std::fmt;

use crate::tag::Tag;

/// Errors that can occur while decoding a Roughtime message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The buffer is shorter than its header requires.
    MessageTooShort {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },
    /// The header declares more fields than the protocol allows.
    TooManyFields {
        /// The declared field count.
        count: u32,
    },
    /// An offset is decreasing or points past the end of the body.
    InvalidOffset,
    /// Tags are not in strictly ascending numeric order.
    UnsortedTags,
    /// A field's length is not a multiple of 4, or a typed read found an
    /// unexpected length.
    InvalidField {
        /// The tag of the offending field.
        tag: Tag,
    },
    /// A requested tag is not present in the message.
    FieldMissing {
        /// The tag that was requested.
        tag: Tag,
    },
    /// A nested payload is too small to be a message.
    InvalidMessage,
    /// A timestamp has its top bit set.
    InvalidTimestamp,
    /// A duration overflows when converted to nanoseconds.
    InvalidDuration,
    /// A Merkle path's length is not a multiple of 64.
    InvalidPath,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MessageTooShort { needed, available } => {
                write!(
                    f,
                    "message too short: needed {} bytes, got {}",
                    needed, available
                )
            }
            ParseError::TooManyFields { count } => {
                write!(f, "too many fields: {}", count)
            }
            ParseError::InvalidOffset => write!(f, "invalid field offset"),
            ParseError::UnsortedTags => write!(f, "tags not sorted"),
            ParseError::InvalidField { tag } => write!(f, "invalid field {}", tag),
            ParseError::FieldMissing { tag } => write!(f, "field {} missing", tag),
            ParseError::InvalidMessage => write!(f, "invalid message"),
            ParseError::InvalidTimestamp => write!(f, "invalid timestamp"),
            ParseError::InvalidDuration => write!(f, "invalid duration"),
            ParseError::InvalidPath => write!(f, "invalid Merkle path length"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for std::io::Error {
    fn from(err: ParseError) -> std::io::Error {
        let kind = match &err {
            ParseError::MessageTooShort { .. } => std::io::ErrorKind::UnexpectedEof,
            _ => std::io::ErrorKind::InvalidData,
        };
        std::io::Error::new(kind, err)
    }
}

/// Errors that can occur while verifying a Roughtime response.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerifyError {
    /// The reply could not be decoded.
    Parse(ParseError),
    /// The delegation signature does not verify under the long-term key.
    BadDelegation,
    /// The response signature does not verify under the delegated key.
    BadSignature,
    /// The Merkle root reconstructed from the nonce differs from `ROOT`.
    NonceMismatch,
    /// The midpoint lies outside the delegation's validity window.
    InvalidMidpoint,
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::Parse(e) => write!(f, "{}", e),
            VerifyError::BadDelegation => {
                write!(f, "delegation signature verification failed")
            }
            VerifyError::BadSignature => {
                write!(f, "response signature verification failed")
            }
            VerifyError::NonceMismatch => {
                write!(f, "Merkle root does not cover the nonce")
            }
            VerifyError::InvalidMidpoint => {
                write!(f, "midpoint outside delegation window")
            }
        }
    }
}

impl std::error::Error for VerifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VerifyError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for VerifyError {
    fn from(err: ParseError) -> VerifyError {
        VerifyError::Parse(err)
    }
}

impl From<VerifyError> for std::io::Error {
    fn from(err: VerifyError) -> std::io::Error {
        match err {
            VerifyError::Parse(e) => e.into(),
            _ => std::io::Error::new(std::io::ErrorKind::InvalidData, err),
        }
    }
}
