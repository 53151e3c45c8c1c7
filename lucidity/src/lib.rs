//! # Introduction
//! Lucidity is a low-level Aion transaction and contract ABI library
//! written in pure Rust.
//!
//! ## Features
//! * Any-endian, 32/64-bit support
//! * Ed25519 key handling
//! * Transaction signing and verification
//! * The FastVM contract ABI: 16 byte words, blake2b selectors, offset
//!   table layout (see the `abi` module)
//!
//! ## Getting started
//! Here's an example lifetime of an Alice-to-Bob Aion transaction:
//! ```rust,no_run
//! extern crate lucidity;
//! use lucidity::{Address, PrivateKey, Transaction};
//!
//! // A helper for filling the keys
//! let mut key_buf: [u8; 32] = rand::random();
//! let alices_key = PrivateKey::from_bytes(key_buf);
//!
//! key_buf = rand::random();
//! let bobs_key = PrivateKey::from_bytes(key_buf);
//!
//! // Create a new transaction
//! let tx = Transaction {
//!     nonce: 0u32.into(),
//!     to: Some(bobs_key.to_address()),
//!     value: 100u32.into(),
//!     data: Vec::new(),
//!     timestamp: 1_546_300_800_000_000u64.into(),
//!     nrg: 21_000u32.into(),
//!     nrg_price: 10_000_000_000u64.into(),
//!     transaction_type: lucidity::constants::TRANSACTION_TYPE,
//!     signature: None, // Not signed. Yet.
//! };
//!
//! let tx_signed: Transaction = tx.sign(&alices_key);
//! assert!(tx_signed.is_valid());
//!
//! // You can always derive the sender from a signed transaction
//! let sender: Address = tx_signed.sender().unwrap();
//!
//! // The raw bytes are ready for eth_sendRawTransaction
//! let raw = tx_signed.to_bytes().unwrap();
//! ```

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

#[macro_use]
extern crate serde_derive;

pub mod abi;
pub mod address;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod private_key;
pub mod rlp;
pub mod signature;
pub mod transaction;
pub mod utils;

pub use address::Address;
pub use error::Error;
pub use num256::Uint256;
pub use private_key::PrivateKey;
pub use signature::Signature;
pub use transaction::Transaction;
