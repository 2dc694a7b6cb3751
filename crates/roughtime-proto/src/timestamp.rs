// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Microsecond-resolution timestamps as carried on the wire.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A point in time, in microseconds since the Unix epoch.
///
/// The wire format reserves the top bit of the 64-bit count; decoding a
/// value with the top bit set fails with
/// [`InvalidTimestamp`](crate::error::ParseError::InvalidTimestamp), so a
/// `Timestamp` obtained from a message always fits in 63 bits.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timestamp {
    micros: u64,
}

impl Timestamp {
    /// Builds a timestamp from microseconds since the Unix epoch.
    pub const fn from_unix_micros(micros: u64) -> Timestamp {
        Timestamp { micros }
    }

    /// Microseconds since the Unix epoch.
    pub const fn unix_micros(self) -> u64 {
        self.micros
    }

    /// Whole seconds since the Unix epoch (truncated).
    pub const fn unix_seconds(self) -> u64 {
        self.micros / 1_000_000
    }

    /// The timestamp as a [`SystemTime`].
    pub fn to_system_time(self) -> SystemTime {
        UNIX_EPOCH + Duration::from_micros(self.micros)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:06}",
            self.micros / 1_000_000,
            self.micros % 1_000_000
        )
    }
}
