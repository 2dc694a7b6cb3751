// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! The decoding cursor.

use std::time::Duration;

use super::MAX_FIELDS;
use crate::error::ParseError;
use crate::tag::Tag;
use crate::timestamp::Timestamp;

/// A single-pass decoding cursor over one message.
///
/// Construction validates the entire header: field count, offset
/// monotonicity and bounds, tag ordering, and the 4-byte alignment of
/// every field. Field accessors then walk the fields once, in the
/// strictly ascending tag order the caller requests them in; requesting a
/// tag that is absent, or requesting out of order, yields
/// [`ParseError::FieldMissing`].
///
/// All returned slices alias the input buffer and stay valid for as long
/// as the caller keeps the buffer alive.
#[derive(Debug)]
pub struct Decoder<'m> {
    hdr: &'m [u8],
    body: &'m [u8],
    n: u32,
    i: u32,
}

/// Decodes `msg` by running `read` with a fresh cursor.
///
/// This is the usual entry point; [`Decoder::new`] is available when the
/// caller wants to drive the cursor directly.
pub fn decode<'m, T>(
    msg: &'m [u8],
    read: impl FnOnce(&mut Decoder<'m>) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    let mut st = Decoder::new(msg)?;
    read(&mut st)
}

impl<'m> Decoder<'m> {
    /// Validates the header of `msg` and returns a cursor over its fields.
    pub fn new(msg: &'m [u8]) -> Result<Decoder<'m>, ParseError> {
        if msg.len() < 4 {
            return Err(ParseError::MessageTooShort {
                needed: 4,
                available: msg.len(),
            });
        }
        let n = u32::from_le_bytes([msg[0], msg[1], msg[2], msg[3]]);
        if n > MAX_FIELDS {
            return Err(ParseError::TooManyFields { count: n });
        }
        if (msg.len() / 8) < n as usize {
            return Err(ParseError::MessageTooShort {
                needed: 8 * n as usize,
                available: msg.len(),
            });
        }
        if n == 0 {
            return Ok(Decoder {
                hdr: &msg[..4],
                body: &msg[4..],
                n: 0,
                i: 0,
            });
        }

        let hdr = &msg[..8 * n as usize];
        let body = &msg[8 * n as usize..];
        let st = Decoder { hdr, body, n, i: 0 };

        // One pass over the header: tags strictly ascending, offsets
        // non-decreasing and within the body, every field 4-byte aligned.
        let mut prev_tag = st.tag_at(0);
        let mut prev_off = 0usize;
        for i in 1..n {
            let off = st.offset_at(i) as usize;
            let tag = st.tag_at(i);
            if tag.value() <= prev_tag.value() {
                return Err(ParseError::UnsortedTags);
            }
            if off < prev_off || off > body.len() {
                return Err(ParseError::InvalidOffset);
            }
            if (off - prev_off) % 4 != 0 {
                return Err(ParseError::InvalidField { tag: prev_tag });
            }
            prev_tag = tag;
            prev_off = off;
        }
        if (body.len() - prev_off) % 4 != 0 {
            return Err(ParseError::InvalidField { tag: prev_tag });
        }

        Ok(st)
    }

    // Offset of field `i` within the body; only valid for 1 <= i < n.
    fn offset_at(&self, i: u32) -> u32 {
        let at = 4 * i as usize;
        u32::from_le_bytes([
            self.hdr[at],
            self.hdr[at + 1],
            self.hdr[at + 2],
            self.hdr[at + 3],
        ])
    }

    fn tag_at(&self, i: u32) -> Tag {
        let at = 4 * (self.n + i) as usize;
        Tag::from_bytes([
            self.hdr[at],
            self.hdr[at + 1],
            self.hdr[at + 2],
            self.hdr[at + 3],
        ])
    }

    fn value_at(&self, i: u32) -> &'m [u8] {
        let start = if i == 0 { 0 } else { self.offset_at(i) as usize };
        let end = if i + 1 < self.n {
            self.offset_at(i + 1) as usize
        } else {
            self.body.len()
        };
        &self.body[start..end]
    }

    /// Advances to the field with tag `tag` and returns its payload.
    ///
    /// Tags must be requested in strictly ascending order; any field whose
    /// tag is below `tag` at this point means the requested field cannot
    /// be present, so the error is [`ParseError::FieldMissing`].
    pub fn bytes(&mut self, tag: Tag) -> Result<&'m [u8], ParseError> {
        while self.i < self.n {
            let cur = self.tag_at(self.i);
            if cur.value() > tag.value() {
                self.i += 1;
                continue;
            }
            if cur.value() < tag.value() {
                return Err(ParseError::FieldMissing { tag });
            }
            let value = self.value_at(self.i);
            self.i += 1;
            return Ok(value);
        }
        Err(ParseError::FieldMissing { tag })
    }

    /// Reads a 4-byte field as a little-endian `u32`.
    pub fn uint32(&mut self, tag: Tag) -> Result<u32, ParseError> {
        let buf = self.bytes(tag)?;
        let arr: [u8; 4] = buf
            .try_into()
            .map_err(|_| ParseError::InvalidField { tag })?;
        Ok(u32::from_le_bytes(arr))
    }

    /// Reads an 8-byte field as a little-endian `u64`.
    pub fn uint64(&mut self, tag: Tag) -> Result<u64, ParseError> {
        let buf = self.bytes(tag)?;
        let arr: [u8; 8] = buf
            .try_into()
            .map_err(|_| ParseError::InvalidField { tag })?;
        Ok(u64::from_le_bytes(arr))
    }

    /// Reads a field that must be exactly 32 bytes long.
    pub fn bytes32(&mut self, tag: Tag) -> Result<[u8; 32], ParseError> {
        self.bytes(tag)?
            .try_into()
            .map_err(|_| ParseError::InvalidField { tag })
    }

    /// Reads a field that must be exactly 64 bytes long.
    pub fn bytes64(&mut self, tag: Tag) -> Result<[u8; 64], ParseError> {
        self.bytes(tag)?
            .try_into()
            .map_err(|_| ParseError::InvalidField { tag })
    }

    /// Decodes a nested message with a fresh cursor.
    ///
    /// Returns the value produced by `read` together with the untouched
    /// payload bytes, so callers can keep the exact framed form for
    /// signature verification.
    pub fn message<T>(
        &mut self,
        tag: Tag,
        read: impl FnOnce(&mut Decoder<'m>) -> Result<T, ParseError>,
    ) -> Result<(T, &'m [u8]), ParseError> {
        let raw = self.bytes(tag)?;
        if raw.len() < 4 {
            return Err(ParseError::InvalidMessage);
        }
        let mut sub = Decoder::new(raw)?;
        let value = read(&mut sub)?;
        Ok((value, raw))
    }

    /// Reads an 8-byte field as a microsecond timestamp.
    ///
    /// The top bit of the count is reserved; a value with it set fails
    /// with [`ParseError::InvalidTimestamp`].
    pub fn time(&mut self, tag: Tag) -> Result<Timestamp, ParseError> {
        let micros = self.uint64(tag)?;
        if micros & (1 << 63) != 0 {
            return Err(ParseError::InvalidTimestamp);
        }
        Ok(Timestamp::from_unix_micros(micros))
    }

    /// Reads a 4-byte field as a microsecond duration.
    pub fn duration(&mut self, tag: Tag) -> Result<Duration, ParseError> {
        let micros = self.uint32(tag)?;
        let nanos = u64::from(micros)
            .checked_mul(1_000)
            .ok_or(ParseError::InvalidDuration)?;
        Ok(Duration::from_nanos(nanos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &[u8; 4]) -> Tag {
        Tag::from_bytes(*s)
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            decode(&[], |_| Ok(())),
            Err(ParseError::MessageTooShort {
                needed: 4,
                available: 0
            })
        );
    }

    #[test]
    fn test_input_too_short() {
        assert!(matches!(
            decode(&[1, 2, 3], |_| Ok(())),
            Err(ParseError::MessageTooShort { .. })
        ));
    }

    #[test]
    fn test_empty_message() {
        decode(&[0, 0, 0, 0], |_| Ok(())).unwrap();
    }

    #[test]
    fn test_header_without_tags() {
        // Declares one field but has no room for its tag word.
        assert!(matches!(
            decode(&[1, 0, 0, 0], |_| Ok(())),
            Err(ParseError::MessageTooShort { .. })
        ));
    }

    #[test]
    fn test_too_many_fields() {
        let mut msg = vec![0u8; 8 * 200];
        msg[..4].copy_from_slice(&200u32.to_le_bytes());
        assert_eq!(
            decode(&msg, |_| Ok(())),
            Err(ParseError::TooManyFields { count: 200 })
        );
    }

    #[test]
    fn test_empty_field() {
        let msg = b"\x01\x00\x00\x00TEST";
        let value = decode(msg, |st| st.bytes(tag(b"TEST"))).unwrap();
        assert_eq!(value, b"");
    }

    #[test]
    fn test_field_length_not_multiple_of_four() {
        let msg = b"\x01\x00\x00\x00TESTFOO";
        assert_eq!(
            decode(msg, |st| st.bytes(tag(b"TEST"))),
            Err(ParseError::InvalidField { tag: tag(b"TEST") })
        );
    }

    #[test]
    fn test_single_field() {
        let msg = b"\x01\x00\x00\x00TESTFOO\n";
        let value = decode(msg, |st| st.bytes(tag(b"TEST"))).unwrap();
        assert_eq!(value, b"FOO\n");
    }

    #[test]
    fn test_two_fields() {
        let msg = b"\x02\x00\x00\x00\x04\x00\x00\x00SPAMEGGSFOO\nBAR\n";
        let (spam, eggs) = decode(msg, |st| {
            let spam = st.bytes(tag(b"SPAM"))?;
            let eggs = st.bytes(tag(b"EGGS"))?;
            Ok((spam, eggs))
        })
        .unwrap();
        assert_eq!(spam, b"FOO\n");
        assert_eq!(eggs, b"BAR\n");
    }

    #[test]
    fn test_unsorted_tags() {
        // EGGS before SPAM: descending numeric order.
        let msg = b"\x02\x00\x00\x00\x04\x00\x00\x00EGGSSPAMFOO\nBAR\n";
        assert_eq!(
            decode(msg, |st| st.bytes(tag(b"SPAM"))),
            Err(ParseError::UnsortedTags)
        );
    }

    #[test]
    fn test_decreasing_offsets() {
        let msg = b"\x03\x00\x00\x00\x08\x00\x00\x00\x04\x00\x00\x00SPAMEGGSTESTFOO\nBAR\n";
        assert_eq!(
            decode(msg, |st| st.bytes(tag(b"SPAM"))),
            Err(ParseError::InvalidOffset)
        );
    }

    #[test]
    fn test_offset_past_body() {
        let msg = b"\x02\x00\x00\x00\x40\x00\x00\x00SPAMEGGSFOO\nBAR\n";
        assert_eq!(
            decode(msg, |st| st.bytes(tag(b"SPAM"))),
            Err(ParseError::InvalidOffset)
        );
    }

    #[test]
    fn test_three_fields_last_empty() {
        let msg = b"\x03\x00\x00\x00\x04\x00\x00\x00\x08\x00\x00\x00SPAMEGGSTESTFOO\nBAR\n";
        let (spam, eggs, test) = decode(msg, |st| {
            Ok((
                st.bytes(tag(b"SPAM"))?,
                st.bytes(tag(b"EGGS"))?,
                st.bytes(tag(b"TEST"))?,
            ))
        })
        .unwrap();
        assert_eq!(spam, b"FOO\n");
        assert_eq!(eggs, b"BAR\n");
        assert_eq!(test, b"");
    }

    #[test]
    fn test_trailing_fields_may_be_ignored() {
        // Read only the first field; the rest of the message is unread.
        let msg = b"\x02\x00\x00\x00\x04\x00\x00\x00SPAMEGGSFOO\nBAR\n";
        let spam = decode(msg, |st| st.bytes(tag(b"SPAM"))).unwrap();
        assert_eq!(spam, b"FOO\n");
    }

    #[test]
    fn test_unread_leading_field_is_missing() {
        // Jumping over SPAM to request EGGS violates the cursor's strict
        // walk; the smaller unread tag surfaces as a missing field.
        let msg = b"\x02\x00\x00\x00\x04\x00\x00\x00SPAMEGGSFOO\nBAR\n";
        assert_eq!(
            decode(msg, |st| st.bytes(tag(b"EGGS"))),
            Err(ParseError::FieldMissing { tag: tag(b"EGGS") })
        );
    }

    #[test]
    fn test_missing_field() {
        let msg = b"\x01\x00\x00\x00TESTFOO\n";
        assert_eq!(
            decode(msg, |st| st.bytes(tag(b"ZZZZ"))),
            Err(ParseError::FieldMissing { tag: tag(b"ZZZZ") })
        );
    }

    #[test]
    fn test_request_below_cursor_is_missing() {
        // AAAA sorts below TEST, so after the header scan it cannot appear.
        let msg = b"\x01\x00\x00\x00TESTFOO\n";
        assert_eq!(
            decode(msg, |st| st.bytes(tag(b"AAAA"))),
            Err(ParseError::FieldMissing { tag: tag(b"AAAA") })
        );
    }

    #[test]
    fn test_uint32_and_uint64() {
        let mut msg = Vec::new();
        msg.extend_from_slice(&2u32.to_le_bytes());
        msg.extend_from_slice(&4u32.to_le_bytes());
        msg.extend_from_slice(b"AAAA");
        msg.extend_from_slice(b"BBBB");
        msg.extend_from_slice(&7u32.to_le_bytes());
        msg.extend_from_slice(&9u64.to_le_bytes());
        let (a, b) = decode(&msg, |st| {
            Ok((st.uint32(tag(b"AAAA"))?, st.uint64(tag(b"BBBB"))?))
        })
        .unwrap();
        assert_eq!(a, 7);
        assert_eq!(b, 9);
    }

    #[test]
    fn test_uint32_wrong_length() {
        let mut msg = Vec::new();
        msg.extend_from_slice(&1u32.to_le_bytes());
        msg.extend_from_slice(b"AAAA");
        msg.extend_from_slice(&9u64.to_le_bytes());
        assert_eq!(
            decode(&msg, |st| st.uint32(tag(b"AAAA"))),
            Err(ParseError::InvalidField { tag: tag(b"AAAA") })
        );
    }

    #[test]
    fn test_time_rejects_top_bit() {
        let mut msg = Vec::new();
        msg.extend_from_slice(&1u32.to_le_bytes());
        msg.extend_from_slice(b"MIDP");
        msg.extend_from_slice(&(1u64 << 63).to_le_bytes());
        assert_eq!(
            decode(&msg, |st| st.time(Tag::MIDP)),
            Err(ParseError::InvalidTimestamp)
        );
    }

    #[test]
    fn test_time_and_duration() {
        let mut msg = Vec::new();
        msg.extend_from_slice(&2u32.to_le_bytes());
        msg.extend_from_slice(&4u32.to_le_bytes());
        msg.extend_from_slice(&Tag::RADI.to_bytes());
        msg.extend_from_slice(&Tag::MIDP.to_bytes());
        msg.extend_from_slice(&1_500_000u32.to_le_bytes());
        msg.extend_from_slice(&1_700_000_000_000_000u64.to_le_bytes());
        let (radius, midpoint) = decode(&msg, |st| {
            Ok((st.duration(Tag::RADI)?, st.time(Tag::MIDP)?))
        })
        .unwrap();
        assert_eq!(radius, Duration::from_micros(1_500_000));
        assert_eq!(midpoint.unix_seconds(), 1_700_000_000);
    }

    #[test]
    fn test_nested_message() {
        // Inner message with a single NONC-like field.
        let mut inner = Vec::new();
        inner.extend_from_slice(&1u32.to_le_bytes());
        inner.extend_from_slice(b"AAAA");
        inner.extend_from_slice(b"DATA");

        let mut msg = Vec::new();
        msg.extend_from_slice(&1u32.to_le_bytes());
        msg.extend_from_slice(b"SUBM");
        msg.extend_from_slice(&inner);

        let (value, raw) = decode(&msg, |st| {
            st.message(tag(b"SUBM"), |sub| st_bytes(sub, tag(b"AAAA")))
        })
        .unwrap();
        assert_eq!(value, b"DATA");
        assert_eq!(raw, inner.as_slice());
    }

    fn st_bytes<'m>(st: &mut Decoder<'m>, t: Tag) -> Result<&'m [u8], ParseError> {
        st.bytes(t)
    }

    #[test]
    fn test_nested_payload_too_small() {
        let mut msg = Vec::new();
        msg.extend_from_slice(&1u32.to_le_bytes());
        msg.extend_from_slice(b"SUBM");
        assert_eq!(
            decode(&msg, |st| st.message(tag(b"SUBM"), |_| Ok(()))),
            Err(ParseError::InvalidMessage)
        );
    }
}
