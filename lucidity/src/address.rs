use crate::constants::{ADDRESS_BYTE_LEN, ADDRESS_IDENTIFIER};
use crate::crypto::{blake2b_256, keccak_256};
use crate::error::Error;
use crate::utils::{bytes_to_hex_str, hex_str_to_bytes};
use serde::de::Deserialize;
use serde::de::Deserializer;
use serde::ser::Serialize;
use serde::ser::Serializer;
use std::fmt;
use std::str::FromStr;

/// Representation of an Aion account address.
///
/// An address is 32 bytes. Addresses that belong to a keypair are derived
/// from the Ed25519 public key and always carry the `0xa0` identifier in
/// their first byte; addresses of precompiled contracts do not, so the
/// identifier is not enforced when parsing.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash, Default, Debug)]
pub struct Address {
    data: [u8; ADDRESS_BYTE_LEN],
}

impl Address {
    /// Derive the account address belonging to an Ed25519 public key:
    /// the identifier byte followed by the last 31 bytes of the key's
    /// blake2b hash.
    pub fn from_public_key(public_key: &[u8; 32]) -> Address {
        let hash = blake2b_256(public_key);
        let mut data = [0u8; ADDRESS_BYTE_LEN];
        data[0] = ADDRESS_IDENTIFIER;
        data[1..].copy_from_slice(&hash[1..]);
        Address { data }
    }

    /// Get raw bytes of the address.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// True for addresses carrying the account identifier byte.
    pub fn is_account_address(&self) -> bool {
        self.data[0] == ADDRESS_IDENTIFIER
    }

    /// The checksum cased textual form: each hex letter is uppercased when
    /// the matching nibble of the keccak hash of the lowercase address is
    /// above 7.
    pub fn to_checksum_string(&self) -> String {
        let lower = bytes_to_hex_str(&self.data);
        let hash = keccak_256(lower.as_bytes());
        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_digit() || nibble <= 7 {
                out.push(c);
            } else {
                out.push(c.to_ascii_uppercase());
            }
        }
        out
    }

    /// Parse an address and, when the input is mixed case, require the
    /// casing to be a valid checksum.
    pub fn parse_and_validate(s: &str) -> Result<Address, Error> {
        let address: Address = s.parse()?;
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let has_upper = stripped.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = stripped.chars().any(|c| c.is_ascii_lowercase());
        if has_upper && has_lower && format!("0x{stripped}") != address.to_checksum_string() {
            return Err(Error::InvalidChecksum);
        }
        Ok(address)
    }
}

impl From<[u8; ADDRESS_BYTE_LEN]> for Address {
    fn from(val: [u8; ADDRESS_BYTE_LEN]) -> Address {
        Address { data: val }
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = Error;

    fn try_from(val: &[u8]) -> Result<Address, Error> {
        if val.len() != ADDRESS_BYTE_LEN {
            return Err(Error::InvalidAddressLength {
                got: val.len(),
                expected: ADDRESS_BYTE_LEN,
            });
        }
        let mut data = [0u8; ADDRESS_BYTE_LEN];
        data.copy_from_slice(val);
        Ok(Address { data })
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Parses a textual representation of an address, with or without the
    /// `0x` prefix. The string must describe exactly 32 bytes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() != ADDRESS_BYTE_LEN * 2 {
            return Err(Error::InvalidAddressLength {
                got: s.len() / 2,
                expected: ADDRESS_BYTE_LEN,
            });
        }
        let bytes = hex_str_to_bytes(s)?;
        Address::try_from(bytes.as_slice())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", bytes_to_hex_str(&self.data))
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }
        write!(f, "{}", bytes_to_hex_str(&self.data))
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }
        write!(f, "{}", bytes_to_hex_str(&self.data).to_uppercase())
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[test]
#[should_panic]
fn decode_invalid_length() {
    "123".parse::<Address>().unwrap();
}

#[test]
#[should_panic]
fn decode_invalid_character() {
    // the four byte character plus sixty hex characters passes the length
    // check and fails during decoding
    "\u{012345}012345678901234567890123456789012345678901234567890123456789"
        .parse::<Address>()
        .unwrap();
}

#[test]
fn decode() {
    let address: Address = "a07c95cc8729a0503c5ad50eb37ec8a27cd22d65de3bb225982ec55201366920"
        .parse()
        .unwrap();
    assert_eq!(address.as_bytes()[0], 0xa0);
    assert_eq!(address.as_bytes()[31], 0x20);
    assert!(address.is_account_address());
}

#[test]
fn handle_prefixed() {
    let with_prefix: Address = "0xa05a3889b106e75baa621b8cc719679a3dbdd799afac1ca6b42d03dc93a23687"
        .parse()
        .unwrap();
    let without_prefix: Address = "a05a3889b106e75baa621b8cc719679a3dbdd799afac1ca6b42d03dc93a23687"
        .parse()
        .unwrap();
    assert_eq!(with_prefix, without_prefix);
}

#[test]
fn checksum_casing() {
    // cases sourced from the conquest test network
    let address: Address = "0xa07c95cc8729a0503c5ad50eb37ec8a27cd22d65de3bb225982ec55201366920"
        .parse()
        .unwrap();
    assert_eq!(
        address.to_checksum_string(),
        "0xA07C95cC8729a0503C5ad50eb37eC8a27cD22D65dE3BB225982Ec55201366920"
    );
    let address: Address = "0xa05a3889b106e75baa621b8cc719679a3dbdd799afac1ca6b42d03dc93a23687"
        .parse()
        .unwrap();
    assert_eq!(
        address.to_checksum_string(),
        "0xa05A3889b106e75baA621b8cC719679a3dBdD799afac1ca6B42D03DC93A23687"
    );
}

#[test]
fn validate_checksum() {
    assert!(Address::parse_and_validate(
        "0xA07C95cC8729a0503C5ad50eb37eC8a27cD22D65dE3BB225982Ec55201366920"
    )
    .is_ok());
    // all lowercase skips the checksum test
    assert!(Address::parse_and_validate(
        "0xa07c95cc8729a0503c5ad50eb37ec8a27cd22d65de3bb225982ec55201366920"
    )
    .is_ok());
    // one flipped letter
    let res = Address::parse_and_validate(
        "0xa07C95cC8729a0503C5ad50eb37eC8a27cD22D65dE3BB225982Ec55201366920",
    );
    match res {
        Err(Error::InvalidChecksum) => {}
        _ => panic!(),
    }
}

#[test]
fn derived_address_carries_identifier() {
    let a = Address::from_public_key(&[0u8; 32]);
    let b = Address::from_public_key(&[0u8; 32]);
    assert_eq!(a, b);
    assert!(a.is_account_address());
}

#[test]
fn hashed() {
    // One of the use cases for Address could be a key in a HashMap to store
    // some additional values per address.
    use std::collections::HashMap;
    let a = Address::from_str("0xa05a3889b106e75baa621b8cc719679a3dbdd799afac1ca6b42d03dc93a23687")
        .unwrap();
    let b = Address::from_str("0xa07c95cc8729a0503c5ad50eb37ec8a27cd22d65de3bb225982ec55201366920")
        .unwrap();
    let mut map = HashMap::new();
    map.insert(a, "Foo");
    map.insert(b, "Bar");

    assert_eq!(map.get(&a).unwrap(), &"Foo");
    assert_eq!(map.get(&b).unwrap(), &"Bar");
}

#[test]
fn ordered() {
    let a: Address = "a00000000000000000000000000000000000000000000000000000000000000a"
        .parse()
        .unwrap();
    let b: Address = "a00000000000000000000000000000000000000000000000000000000000000b"
        .parse()
        .unwrap();
    assert!(b > a);
    assert_ne!(a, b);
}

#[test]
fn serialize_round_trip() {
    let address: Address = "0xa05a3889b106e75baa621b8cc719679a3dbdd799afac1ca6b42d03dc93a23687"
        .parse()
        .unwrap();
    let j = serde_json::to_string(&address).unwrap();
    assert_eq!(
        j,
        r#""0xa05a3889b106e75baa621b8cc719679a3dbdd799afac1ca6b42d03dc93a23687""#
    );
    let back: Address = serde_json::from_str(&j).unwrap();
    assert_eq!(address, back);
}
