// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! One UDP round-trip.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use log::debug;

use roughtime_proto::wire::DATAGRAM_SIZE;

/// Select the appropriate bind address based on the target address family.
///
/// Returns `"0.0.0.0:0"` for IPv4 targets and `"[::]:0"` for IPv6 targets.
fn bind_addr_for(target: &SocketAddr) -> &'static str {
    match target {
        SocketAddr::V4(_) => "0.0.0.0:0",
        SocketAddr::V6(_) => "[::]:0",
    }
}

/// Sends one request datagram to `addr` and receives one reply.
///
/// The socket is bound to an ephemeral port, used for a single exchange,
/// and released on every exit path. `timeout` applies to both the send
/// and the receive; `None` leaves the socket blocking indefinitely.
///
/// # Panics
///
/// Panics if `request` is not exactly 1024 bytes: a short request means
/// the caller sized `PAD` wrong, which is a bug, not an I/O condition.
pub fn exchange<A: ToSocketAddrs>(
    addr: A,
    request: &[u8],
    timeout: Option<Duration>,
) -> io::Result<Vec<u8>> {
    assert_eq!(
        request.len(),
        DATAGRAM_SIZE,
        "request datagram must be exactly {} bytes",
        DATAGRAM_SIZE
    );

    let resolved: Vec<SocketAddr> = addr.to_socket_addrs()?.collect();
    let target = *resolved.first().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "address resolved to no socket addresses",
        )
    })?;

    let sock = UdpSocket::bind(bind_addr_for(&target))?;
    sock.set_read_timeout(timeout)?;
    sock.set_write_timeout(timeout)?;

    let sent = sock.send_to(request, target)?;
    debug!("sent {} bytes to {:?}", sent, target);

    let mut buf = [0u8; DATAGRAM_SIZE];
    let (len, src) = sock.recv_from(&mut buf)?;
    debug!("received {} bytes from {:?}", len, src);

    Ok(buf[..len].to_vec())
}
