// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Timestamp a file against a set of Roughtime servers.
//!
//! ```sh
//! notary FILE > chain.json
//! notary --verify FILE < chain.json
//! ```
//!
//! Without `--verify` the tool hashes FILE with SHA-512, builds a chain
//! of exchanges seeded by that hash, and writes the chain JSON to
//! standard output. With `--verify` it reads a chain from standard
//! input, verifies every link, and additionally checks that the first
//! link's seed equals the file hash, which ties the chain to the file.
//! `--servers PATH` replaces the built-in server list.
//!
//! Exits 0 on success and non-zero on any error.

use std::fs::File;
use std::io::{self, Read};
use std::process;

use ring::digest;

use roughtime_client::chain::{self, Chain};
use roughtime_client::directory::ServerList;

/// Server list used when `--servers` is not given, as published by the
/// operators of the classic-protocol servers.
const DEFAULT_SERVERS: &str = r#"{
    "servers": [
        {
            "name": "Google",
            "publicKeyType": "ed25519",
            "publicKey": "etPaaIxcBMY1oUeGpwvPMCJMwlRVNxv51KK/tktoJTQ=",
            "addresses": [
                {
                    "protocol": "udp",
                    "address": "roughtime.sandbox.google.com:2002"
                }
            ]
        },
        {
            "name": "Cloudflare",
            "publicKeyType": "ed25519",
            "publicKey": "gD63hSj3ScS+wuOeGrubXlq35N1c5Lby/S+T7MNTjxo=",
            "addresses": [
                {
                    "protocol": "udp",
                    "address": "roughtime.cloudflare.com:2002"
                }
            ]
        }
    ]
}"#;

struct Args {
    servers: Option<String>,
    verify: bool,
    file: String,
}

fn parse_args() -> Result<Args, String> {
    let mut servers = None;
    let mut verify = false;
    let mut file = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--servers" => {
                servers = Some(args.next().ok_or("--servers requires a path")?);
            }
            "--verify" => verify = true,
            _ if arg.starts_with("--") => {
                return Err(format!("unknown flag {arg}"));
            }
            _ => {
                if file.replace(arg).is_some() {
                    return Err("exactly one file argument expected".into());
                }
            }
        }
    }

    Ok(Args {
        servers,
        verify,
        file: file.ok_or("exactly one file argument expected")?,
    })
}

fn hash_file(path: &str) -> io::Result<[u8; 64]> {
    let mut file = File::open(path)?;
    let mut ctx = digest::Context::new(&digest::SHA512);
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        ctx.update(&buf[..n]);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(ctx.finish().as_ref());
    Ok(out)
}

fn load_servers(path: Option<&str>) -> io::Result<ServerList> {
    match path {
        Some(path) => ServerList::from_reader(File::open(path)?),
        None => ServerList::from_json(DEFAULT_SERVERS),
    }
}

fn run(args: &Args) -> io::Result<()> {
    let servers = load_servers(args.servers.as_deref())?;
    let file_hash = hash_file(&args.file)?;

    if args.verify {
        let chain = Chain::from_reader(io::stdin().lock())?;
        chain::verify_chain(&chain, &servers.servers)?;
        match chain.links.first() {
            Some(link) if link.nonce_or_blind == file_hash => Ok(()),
            Some(_) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "chain nonce does not match file",
            )),
            None => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "chain is empty",
            )),
        }
    } else {
        chain::build_chain(io::stdout().lock(), &servers.servers, Some(file_hash))
    }
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: notary [--servers PATH] [--verify] FILE");
            process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("notary: {e}");
        process::exit(1);
    }
}
