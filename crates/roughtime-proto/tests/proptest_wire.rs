// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Property tests for the wire codec.

use proptest::prelude::*;

use roughtime_proto::message::decode_response;
use roughtime_proto::wire::{decode, encode};
use roughtime_proto::Tag;

/// A well-formed field set: strictly ascending non-zero tags, 4-byte
/// aligned values, small enough to fit one datagram alongside the header.
fn fields() -> impl Strategy<Value = Vec<(u32, Vec<u8>)>> {
    (
        proptest::collection::btree_set(1u32..=u32::MAX, 0..10),
        proptest::collection::vec(
            proptest::collection::vec(any::<u8>(), 0..=20),
            10,
        ),
    )
        .prop_map(|(tags, values)| {
            tags.into_iter()
                .zip(values)
                .map(|(tag, mut value)| {
                    value.truncate(value.len() - value.len() % 4);
                    (tag, value)
                })
                .collect()
        })
}

proptest! {
    #[test]
    fn roundtrip(fields in fields()) {
        let msg = encode(|st| {
            st.ntags(fields.len() as u32);
            for (tag, value) in &fields {
                st.bytes(Tag::from_bytes(tag.to_le_bytes()), value.len())
                    .copy_from_slice(value);
            }
        });

        let got: Vec<Vec<u8>> = decode(&msg, |st| {
            fields
                .iter()
                .map(|(tag, _)| {
                    st.bytes(Tag::from_bytes(tag.to_le_bytes()))
                        .map(<[u8]>::to_vec)
                })
                .collect()
        })
        .unwrap();
        for ((_, want), got) in fields.iter().zip(&got) {
            prop_assert_eq!(want, got);
        }
    }

    #[test]
    fn decode_arbitrary_bytes_never_panics(data in proptest::collection::vec(any::<u8>(), 0..1200)) {
        let _ = decode_response(&data);
    }
}
