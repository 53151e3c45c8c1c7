//! Digest helpers shared across the crate.
//!
//! Aion's designated hash is blake2b. Keccak only survives for the
//! checksum cased address scheme which was carried over from Ethereum.

use blake2::digest::consts::U32;
use blake2::Blake2b;
use sha3::{Digest, Keccak256};

/// blake2b with a 32 byte digest, the chain's standard hash.
pub type Blake2b256 = Blake2b<U32>;

pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Blake2b256::digest(data));
    out
}

pub fn keccak_256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

#[test]
fn blake2b_256_of_empty() {
    use crate::utils::bytes_to_hex_str;
    assert_eq!(
        bytes_to_hex_str(&blake2b_256(b"")),
        "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
    );
}

#[test]
fn keccak_256_of_empty() {
    use crate::utils::bytes_to_hex_str;
    assert_eq!(
        bytes_to_hex_str(&keccak_256(b"")),
        "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
    );
}
