// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! The server directory.
//!
//! A static JSON document names the servers a chain may use:
//!
//! ```json
//! {
//!   "servers": [
//!     {
//!       "name": "Google",
//!       "publicKeyType": "ed25519",
//!       "publicKey": "etPaaIxcBMY1oUeGpwvPMCJMwlRVNxv51KK/tktoJTQ=",
//!       "addresses": [
//!         { "protocol": "udp", "address": "roughtime.sandbox.google.com:2002" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Unknown JSON fields are ignored. An unrecognized `publicKeyType` is
//! kept as-is and only surfaces as an error when the server is actually
//! used; only `ed25519` is understood.

use std::io::{self, Read};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The key type this client understands.
const ED25519: &str = "ed25519";

/// An ordered list of servers.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ServerList {
    /// The servers, in the order chains will visit them.
    pub servers: Vec<Server>,
}

/// One server record.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Server {
    /// Human-readable name.
    pub name: String,
    /// Key algorithm; only `"ed25519"` is understood.
    #[serde(rename = "publicKeyType")]
    pub public_key_type: String,
    /// The server's long-term public key.
    #[serde(rename = "publicKey", with = "crate::b64")]
    pub public_key: Vec<u8>,
    /// Transport addresses; the first one is used.
    pub addresses: Vec<ServerAddress>,
}

/// One transport address of a server.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ServerAddress {
    /// Transport protocol, normally `"udp"`.
    pub protocol: String,
    /// `host:port` of the server.
    pub address: String,
}

impl ServerList {
    /// Parses a server-list document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> io::Result<ServerList> {
        serde_json::from_reader(reader)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Parses a server-list document from a string.
    pub fn from_json(json: &str) -> io::Result<ServerList> {
        ServerList::from_reader(json.as_bytes())
    }
}

impl Server {
    /// The server's Ed25519 key, or an error if the record's key type or
    /// length is not usable.
    pub fn ed25519_key(&self) -> Result<[u8; 32], ConfigError> {
        if self.public_key_type != ED25519 {
            return Err(ConfigError::UnsupportedKeyType {
                key_type: self.public_key_type.clone(),
            });
        }
        self.public_key
            .as_slice()
            .try_into()
            .map_err(|_| ConfigError::InvalidKeyLength {
                actual: self.public_key.len(),
            })
    }

    /// The server's first address.
    pub fn first_address(&self) -> Result<&str, ConfigError> {
        self.addresses
            .first()
            .map(|a| a.address.as_str())
            .ok_or_else(|| ConfigError::NoAddresses {
                server: self.name.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "servers": [
            {
                "name": "Google",
                "publicKeyType": "ed25519",
                "publicKey": "etPaaIxcBMY1oUeGpwvPMCJMwlRVNxv51KK/tktoJTQ=",
                "addresses": [
                    { "protocol": "udp", "address": "roughtime.sandbox.google.com:2002" }
                ]
            },
            {
                "name": "Cloudflare",
                "publicKeyType": "ed25519",
                "publicKey": "gD63hSj3ScS+wuOeGrubXlq35N1c5Lby/S+T7MNTjxo=",
                "addresses": [
                    { "protocol": "udp", "address": "roughtime.cloudflare.com:2002" }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let list = ServerList::from_json(SAMPLE).unwrap();
        assert_eq!(list.servers.len(), 2);
        assert_eq!(list.servers[0].name, "Google");
        assert_eq!(list.servers[0].public_key.len(), 32);
        assert_eq!(
            list.servers[1].first_address().unwrap(),
            "roughtime.cloudflare.com:2002"
        );
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{
            "servers": [
                {
                    "name": "X",
                    "publicKeyType": "ed25519",
                    "publicKey": "etPaaIxcBMY1oUeGpwvPMCJMwlRVNxv51KK/tktoJTQ=",
                    "newField": true,
                    "addresses": [
                        { "protocol": "udp", "address": "example.net:2002", "weight": 7 }
                    ]
                }
            ],
            "version": 3
        }"#;
        let list = ServerList::from_json(json).unwrap();
        assert_eq!(list.servers.len(), 1);
    }

    #[test]
    fn test_unsupported_key_type_is_deferred() {
        let json = r#"{
            "servers": [
                {
                    "name": "Legacy",
                    "publicKeyType": "rsa",
                    "publicKey": "AQID",
                    "addresses": []
                }
            ]
        }"#;
        // Parsing succeeds; the error surfaces when the key is requested.
        let list = ServerList::from_json(json).unwrap();
        assert_eq!(
            list.servers[0].ed25519_key(),
            Err(ConfigError::UnsupportedKeyType {
                key_type: "rsa".into()
            })
        );
    }

    #[test]
    fn test_wrong_key_length() {
        let json = r#"{
            "servers": [
                {
                    "name": "Short",
                    "publicKeyType": "ed25519",
                    "publicKey": "AQID",
                    "addresses": []
                }
            ]
        }"#;
        let list = ServerList::from_json(json).unwrap();
        assert_eq!(
            list.servers[0].ed25519_key(),
            Err(ConfigError::InvalidKeyLength { actual: 3 })
        );
        assert_eq!(
            list.servers[0].first_address(),
            Err(ConfigError::NoAddresses {
                server: "Short".into()
            })
        );
    }
}
