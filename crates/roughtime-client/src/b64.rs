// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Serde adapter for byte fields carried as standard base64 strings.
//!
//! Used with `#[serde(with = "crate::b64")]` on the `Vec<u8>` fields of
//! the chain and server-list documents.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serializer};

pub(crate) fn serialize<S: Serializer>(bytes: &[u8], ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&STANDARD.encode(bytes))
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<u8>, D::Error> {
    let s = String::deserialize(de)?;
    STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Deserialize, PartialEq, Serialize)]
    struct Blob {
        #[serde(with = "crate::b64")]
        data: Vec<u8>,
    }

    #[test]
    fn test_roundtrip() {
        let blob = Blob {
            data: vec![1, 2, 3, 255],
        };
        let json = serde_json::to_string(&blob).unwrap();
        assert_eq!(json, r#"{"data":"AQID/w=="}"#);
        assert_eq!(serde_json::from_str::<Blob>(&json).unwrap(), blob);
    }

    #[test]
    fn test_rejects_invalid_base64() {
        assert!(serde_json::from_str::<Blob>(r#"{"data":"!!"}"#).is_err());
    }
}
