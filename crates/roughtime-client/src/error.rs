// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Client error types.
//!
//! Public networking APIs return `io::Result<T>`; internally errors are
//! built as [`ClientError`] variants and converted via
//! `From<ClientError> for io::Error`. Callers that want programmatic
//! matching can downcast through [`std::io::Error::get_ref`]:
//!
//! ```no_run
//! use roughtime_client::error::ClientError;
//!
//! # let pk = [0u8; 32];
//! match roughtime_client::request("roughtime.sandbox.google.com:2002", &pk) {
//!     Ok(time) => println!("midpoint {}", time.midpoint),
//!     Err(e) => {
//!         if let Some(client_err) = e.get_ref()
//!             .and_then(|inner| inner.downcast_ref::<ClientError>())
//!         {
//!             eprintln!("client error: {client_err}");
//!         }
//!     }
//! }
//! ```

use std::fmt;
use std::io;

use roughtime_proto::VerifyError;

/// Errors that can occur during client operations.
#[derive(Debug)]
pub enum ClientError {
    /// A server reply failed verification.
    Verify(VerifyError),
    /// The configuration (server list) is unusable.
    Config(ConfigError),
    /// A chain document failed to build or verify.
    Chain(ChainError),
    /// Underlying I/O error (resolution, bind, send, receive).
    Io(io::Error),
}

/// Server-list configuration errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// The server list is empty.
    NoServers,
    /// A server has no addresses.
    NoAddresses {
        /// The server's name.
        server: String,
    },
    /// A server's key type is not understood. Surfaced only when the
    /// server is actually used.
    UnsupportedKeyType {
        /// The unrecognized `publicKeyType` value.
        key_type: String,
    },
    /// A server's public key is not 32 bytes.
    InvalidKeyLength {
        /// The actual key length.
        actual: usize,
    },
}

/// Chain document errors.
#[derive(Debug)]
pub enum ChainError {
    /// A link's server public key is not in the directory.
    UnknownServer {
        /// Index of the offending link.
        index: usize,
    },
    /// A link's nonce-or-blind seed is not 64 bytes.
    InvalidSeedLength {
        /// Index of the offending link.
        index: usize,
        /// The actual seed length.
        actual: usize,
    },
    /// A link's stored reply failed verification.
    LinkVerification {
        /// Index of the offending link.
        index: usize,
        /// The verification failure.
        error: VerifyError,
    },
}

// ── Display implementations ─────────────────────────────────────────

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Verify(e) => write!(f, "verification failed: {e}"),
            ClientError::Config(e) => write!(f, "configuration error: {e}"),
            ClientError::Chain(e) => write!(f, "chain error: {e}"),
            ClientError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoServers => write!(f, "server list is empty"),
            ConfigError::NoAddresses { server } => {
                write!(f, "server {server} has no addresses")
            }
            ConfigError::UnsupportedKeyType { key_type } => {
                write!(f, "unsupported public key type {key_type:?}")
            }
            ConfigError::InvalidKeyLength { actual } => {
                write!(f, "public key must be 32 bytes, got {actual}")
            }
        }
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::UnknownServer { index } => {
                write!(f, "link {index}: server public key not in directory")
            }
            ChainError::InvalidSeedLength { index, actual } => {
                write!(f, "link {index}: seed must be 64 bytes, got {actual}")
            }
            ChainError::LinkVerification { index, error } => {
                write!(f, "link {index}: {error}")
            }
        }
    }
}

// ── Error trait implementations ─────────────────────────────────────

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Verify(e) => Some(e),
            ClientError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for ChainError {}

// ── From conversions ────────────────────────────────────────────────

impl From<ClientError> for io::Error {
    fn from(err: ClientError) -> io::Error {
        let kind = match &err {
            ClientError::Verify(_) | ClientError::Chain(_) => io::ErrorKind::InvalidData,
            ClientError::Config(_) => io::ErrorKind::InvalidInput,
            ClientError::Io(e) => e.kind(),
        };
        if let ClientError::Io(e) = err {
            return e;
        }
        io::Error::new(kind, err)
    }
}

impl From<io::Error> for ClientError {
    fn from(err: io::Error) -> ClientError {
        ClientError::Io(err)
    }
}

impl From<VerifyError> for ClientError {
    fn from(err: VerifyError) -> ClientError {
        ClientError::Verify(err)
    }
}

impl From<ConfigError> for ClientError {
    fn from(err: ConfigError) -> ClientError {
        ClientError::Config(err)
    }
}

impl From<ChainError> for ClientError {
    fn from(err: ChainError) -> ClientError {
        ClientError::Chain(err)
    }
}
