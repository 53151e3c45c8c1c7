use crate::Address;
use num256::{Int256, Uint256};
use std::str::FromStr;

/// Width in bytes of one ABI word. The Aion FastVM uses 16 byte words
/// rather than the 32 byte words of the Ethereum ABI this format was
/// derived from, so every encoder and decoder in `abi` must use this
/// constant and never a literal.
pub const WORD_BYTE_LEN: usize = 16;

/// An account address is 32 bytes, which makes it two ABI words wide on
/// the wire. Address parameters are encoded at this natural width with no
/// additional padding.
pub const ADDRESS_BYTE_LEN: usize = 32;

/// Account addresses produced by key derivation carry this identifier in
/// their first byte.
pub const ADDRESS_IDENTIFIER: u8 = 0xa0;

/// Largest integer width the FastVM ABI supports, in bits. Exactly one
/// word. Declaring `uint256` in a type name is a configuration error on
/// this chain.
pub const MAX_INT_SIZE: usize = WORD_BYTE_LEN * 8;

/// Function selectors are the leading bytes of the blake2b signature hash.
pub const FUNCTION_SELECTOR_LEN: usize = 4;

/// Ed25519 public key length.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Ed25519 detached signature length.
pub const ED25519_SIGNATURE_LEN: usize = 64;

/// The signature blob attached to a transaction is the public key followed
/// by the detached signature.
pub const PUB_SIG_LEN: usize = PUBLIC_KEY_LEN + ED25519_SIGNATURE_LEN;

/// Base energy cost of any transaction.
pub const NRG_TRANSACTION: u32 = 21_000;

/// Base energy cost of a contract creation.
pub const NRG_CREATE_CONTRACT: u32 = 200_000;

/// Energy cost per zero byte of transaction data.
pub const NRG_TX_DATA_ZERO: u32 = 4;

/// Energy cost per nonzero byte of transaction data.
pub const NRG_TX_DATA_NONZERO: u32 = 64;

/// The default (and currently only) transaction type.
pub const TRANSACTION_TYPE: u8 = 1;

pub fn tt128() -> Uint256 {
    Uint256::from_str("340282366920938463463374607431768211456").unwrap() // 2 ** 128
}

pub fn tt128m1() -> Uint256 {
    Uint256::from_str("340282366920938463463374607431768211455").unwrap() // 2 ** 128 - 1
}

pub fn int128_max() -> Int256 {
    Int256::from_str("170141183460469231731687303715884105727").unwrap() // 2 ** 127 - 1
}

pub fn int128_min() -> Int256 {
    Int256::from_str("-170141183460469231731687303715884105728").unwrap() // -(2 ** 127)
}

pub fn zero_address() -> Address {
    "0x0000000000000000000000000000000000000000000000000000000000000000"
        .parse()
        .unwrap()
}

#[test]
fn word_capacity() {
    assert_eq!(tt128(), tt128m1() + 1u8.into());
    // 2 ** 128 is the first value that no longer fits in one word
    let be = tt128().to_be_bytes();
    assert_eq!(be[15], 1);
    assert_eq!(be[16..], [0u8; 16]);
    assert!(int128_min() < int128_max());
}

#[test]
fn zero_address_is_zeroes() {
    assert_eq!(zero_address().as_bytes(), [0u8; ADDRESS_BYTE_LEN]);
}
