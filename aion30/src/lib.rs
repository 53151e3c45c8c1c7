#![warn(clippy::all)]
#![allow(clippy::large_enum_variant)]
#![allow(clippy::pedantic)]

//! Byte-order safe and lightweight Aion web3 client.
//!
//! The chain keeps Ethereum's JSONRPC method names, so this looks a lot
//! like any other web3 library. What differs rides in `lucidity`: Ed25519
//! signatures, blake2b hashing and the FastVM contract ABI.

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

pub mod client;
mod contract_utils;
pub mod jsonrpc;
pub mod types;
