// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! The encoding cursor.

use std::time::Duration;

use super::DATAGRAM_SIZE;
use crate::tag::Tag;
use crate::timestamp::Timestamp;

/// A single-pass encoding cursor over one message.
///
/// The writer first declares the field count with [`ntags`](Encoder::ntags)
/// and then emits exactly that many fields in strictly ascending tag
/// order. Violating the contract panics: these are programming errors in
/// the writer, not conditions untrusted input can trigger.
///
/// A nested [`message`](Encoder::message) is encoded directly into the
/// remaining body and then committed as a field, so nothing is copied.
#[derive(Debug)]
pub struct Encoder<'b> {
    msg: &'b mut [u8],
    n: u32,
    i: u32,
    last_tag: u32,
    body_len: usize,
}

/// Encodes a message by running `write` with a cursor over a
/// datagram-sized buffer, returning the filled prefix.
pub fn encode(write: impl FnOnce(&mut Encoder<'_>)) -> Vec<u8> {
    let mut buf = [0u8; DATAGRAM_SIZE];
    let len = {
        let mut st = Encoder::over(&mut buf);
        write(&mut st);
        st.finish()
    };
    buf[..len].to_vec()
}

impl<'b> Encoder<'b> {
    fn over(msg: &'b mut [u8]) -> Encoder<'b> {
        assert!(msg.len() >= 4, "buffer too small for a message header");
        Encoder {
            msg,
            n: 0,
            i: 0,
            last_tag: 0,
            body_len: 0,
        }
    }

    /// Declares the number of fields. Must be called before any field is
    /// emitted.
    pub fn ntags(&mut self, n: u32) {
        assert!(
            self.hdr_len_for(n) <= self.msg.len(),
            "header does not fit the buffer"
        );
        self.msg[..4].copy_from_slice(&n.to_le_bytes());
        self.n = n;
        self.i = 0;
        self.last_tag = 0;
        self.body_len = 0;
    }

    fn hdr_len_for(&self, n: u32) -> usize {
        if n == 0 {
            4
        } else {
            8 * n as usize
        }
    }

    fn hdr_len(&self) -> usize {
        self.hdr_len_for(self.n)
    }

    /// Length of the message as encoded so far.
    pub fn len(&self) -> usize {
        self.hdr_len() + self.body_len
    }

    /// True if no field has been emitted and none was declared.
    pub fn is_empty(&self) -> bool {
        self.n == 0 && self.body_len == 0
    }

    /// Reserves `len` body bytes for a field with tag `tag` and returns
    /// the region for the caller to fill.
    ///
    /// `len` must be a multiple of 4. The region is whatever the buffer
    /// currently holds; callers that reserve without filling get the
    /// previous contents (zeros at the top level).
    pub fn bytes(&mut self, tag: Tag, len: usize) -> &mut [u8] {
        assert!(len % 4 == 0, "field length not a multiple of 4");
        assert!(
            tag.value() > self.last_tag,
            "tags not written in ascending order"
        );
        assert!(self.i < self.n, "more fields written than declared");
        let start = self.hdr_len() + self.body_len;
        assert!(start + len <= self.msg.len(), "message does not fit the buffer");

        if self.i > 0 {
            let at = 4 * self.i as usize;
            self.msg[at..at + 4].copy_from_slice(&(self.body_len as u32).to_le_bytes());
        }
        let at = 4 * (self.n + self.i) as usize;
        self.msg[at..at + 4].copy_from_slice(&tag.to_bytes());

        self.last_tag = tag.value();
        self.i += 1;
        self.body_len += len;
        &mut self.msg[start..start + len]
    }

    /// Emits a 32-byte field.
    pub fn bytes32(&mut self, tag: Tag, value: &[u8; 32]) {
        self.bytes(tag, 32).copy_from_slice(value);
    }

    /// Emits a 64-byte field.
    pub fn bytes64(&mut self, tag: Tag, value: &[u8; 64]) {
        self.bytes(tag, 64).copy_from_slice(value);
    }

    /// Emits a little-endian `u32` field.
    pub fn uint32(&mut self, tag: Tag, value: u32) {
        self.bytes(tag, 4).copy_from_slice(&value.to_le_bytes());
    }

    /// Emits a little-endian `u64` field.
    pub fn uint64(&mut self, tag: Tag, value: u64) {
        self.bytes(tag, 8).copy_from_slice(&value.to_le_bytes());
    }

    /// Encodes a nested message into the remaining body with a fresh
    /// cursor, then commits it as a field with tag `tag`.
    pub fn message(&mut self, tag: Tag, write: impl FnOnce(&mut Encoder<'_>)) {
        let start = self.hdr_len() + self.body_len;
        let sub_len = {
            let mut sub = Encoder::over(&mut self.msg[start..]);
            write(&mut sub);
            sub.finish()
        };
        // The sub-message already occupies the reserved region.
        self.bytes(tag, sub_len);
    }

    /// Emits a timestamp as a `u64` count of microseconds.
    pub fn time(&mut self, tag: Tag, value: Timestamp) {
        self.uint64(tag, value.unix_micros());
    }

    /// Emits a duration as a `u32` count of microseconds.
    pub fn duration(&mut self, tag: Tag, value: Duration) {
        self.uint32(tag, (value.as_nanos() / 1_000) as u32);
    }

    // Checks the field count and returns the final length.
    fn finish(&self) -> usize {
        assert_eq!(self.i, self.n, "fewer fields written than declared");
        self.len()
    }
}
