// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Query a Roughtime server for authenticated coarse time.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example fetch
//! ```

fn main() {
    env_logger::init();

    let server = "roughtime.sandbox.google.com:2002";
    let public_key_b64 = "etPaaIxcBMY1oUeGpwvPMCJMwlRVNxv51KK/tktoJTQ=";

    let pk = roughtime_client::decode_public_key(public_key_b64).expect("invalid public key");

    println!("Querying Roughtime server: {server}");

    match roughtime_client::request(server, &pk) {
        Ok(time) => {
            println!("Midpoint:  {} seconds since Unix epoch", time.midpoint.unix_seconds());
            println!("Radius:    ±{} µs", time.radius.as_micros());
        }
        Err(e) => {
            eprintln!("request failed: {e}");
            std::process::exit(1);
        }
    }
}
