use crate::address::Address;
use crate::constants::PUBLIC_KEY_LEN;
use crate::crypto::blake2b_256;
use crate::error::Error;
use crate::signature::Signature;
use crate::utils::{bytes_to_hex_str, hex_str_to_bytes};
use ed25519_dalek::{Signer, SigningKey};
use serde::de::Deserialize;
use serde::de::Deserializer;
use serde::ser::Serialize;
use serde::ser::Serializer;
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

/// The standard Aion message signing salt. The message length is appended
/// before hashing. Prevents a signed message from ever being a valid
/// transaction payload.
pub const AION_SALT: &str = "\x19Aion Signed Message:\n";

const SEED_LEN: usize = 32;
const KEYPAIR_LEN: usize = 64;

/// Representation of an Aion private key.
///
/// A private key can be created from a textual representation or from raw
/// bytes, either the 32 byte Ed25519 seed or the 64 byte seed plus public
/// key form that nacl based tooling exports. With a PrivateKey you are
/// able to sign messages and derive the public key and account address.
/// Cryptography-related methods use the Ed25519 signature scheme.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct PrivateKey {
    seed: [u8; SEED_LEN],
    address: Address,
}

/// Hash a human readable message with the Aion preamble:
/// `blake2b(salt + len(message) + message)`.
pub fn hash_message(message: &[u8]) -> [u8; 32] {
    let preamble = format!("{}{}", AION_SALT, message.len());
    let mut buf = preamble.into_bytes();
    buf.extend(message);
    blake2b_256(&buf)
}

impl PrivateKey {
    /// Create a private key from the 32 byte Ed25519 seed. Unlike
    /// secp256k1 chains every seed value is a usable key, so this cannot
    /// fail.
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> PrivateKey {
        let signing_key = SigningKey::from_bytes(&bytes);
        let public_key = signing_key.verifying_key().to_bytes();
        PrivateKey {
            seed: bytes,
            address: Address::from_public_key(&public_key),
        }
    }

    /// Create a private key from a slice holding either the 32 byte seed
    /// or the 64 byte seed plus public key export format. For the longer
    /// form the public half must actually belong to the seed.
    pub fn from_slice(bytes: &[u8]) -> Result<PrivateKey, Error> {
        match bytes.len() {
            SEED_LEN => {
                let mut seed = [0u8; SEED_LEN];
                seed.copy_from_slice(bytes);
                Ok(PrivateKey::from_bytes(seed))
            }
            KEYPAIR_LEN => {
                let mut seed = [0u8; SEED_LEN];
                seed.copy_from_slice(&bytes[..SEED_LEN]);
                let key = PrivateKey::from_bytes(seed);
                if key.to_public_key()[..] != bytes[SEED_LEN..] {
                    return Err(Error::MismatchedKeyPair);
                }
                Ok(key)
            }
            got => Err(Error::InvalidPrivKeyLength {
                got,
                expected: SEED_LEN,
            }),
        }
    }

    /// Get the seed bytes back from a PrivateKey.
    pub fn to_bytes(self) -> [u8; SEED_LEN] {
        self.seed
    }

    /// The 64 byte seed plus public key form.
    pub fn to_keypair_bytes(self) -> [u8; KEYPAIR_LEN] {
        let mut out = [0u8; KEYPAIR_LEN];
        out[..SEED_LEN].copy_from_slice(&self.seed);
        out[SEED_LEN..].copy_from_slice(&self.to_public_key());
        out
    }

    pub fn to_public_key(self) -> [u8; PUBLIC_KEY_LEN] {
        SigningKey::from_bytes(&self.seed).verifying_key().to_bytes()
    }

    /// Get the account address for this private key.
    pub fn to_address(self) -> Address {
        self.address
    }

    /// Signs a message that has already been hashed, normally the 32 byte
    /// blake2b hash of an RLP encoded transaction. The returned signature
    /// embeds the public key, as the chain's wire format requires.
    pub fn sign_hash(&self, data: &[u8]) -> Signature {
        let signing_key = SigningKey::from_bytes(&self.seed);
        let signature = signing_key.sign(data);
        Signature::new(self.to_public_key(), signature.to_bytes())
    }

    /// Signs any message represented by a slice of data. Internally it
    /// hashes the data with blake2b and then creates a signature.
    ///
    /// No signed message salt is applied, so do not use this for
    /// user-supplied content. Use [sign_aion_msg](#method.sign_aion_msg)
    /// instead.
    pub fn sign_insecure_msg(&self, data: &[u8]) -> Signature {
        self.sign_hash(&blake2b_256(data))
    }

    /// Signs a message after applying the `\x19Aion Signed Message:\n`
    /// preamble.
    pub fn sign_aion_msg(&self, data: &[u8]) -> Signature {
        self.sign_hash(&hash_message(data))
    }
}

impl FromStr for PrivateKey {
    type Err = Error;

    /// Parse a textual representation of a private key: 64 hexadecimal
    /// characters for a seed or 128 for the keypair export form, either
    /// optionally prefixed with `0x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex_str_to_bytes(s)?;
        PrivateKey::from_slice(&bytes)
    }
}

impl Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", bytes_to_hex_str(&self.to_bytes()))
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", bytes_to_hex_str(&self.to_bytes()))
    }
}

impl Serialize for PrivateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D>(deserializer: D) -> Result<PrivateKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[test]
#[should_panic]
fn too_short() {
    PrivateKey::from_str("abcdef").unwrap();
}

#[test]
fn parse_and_derive() {
    let key: PrivateKey = "0x0101010101010101010101010101010101010101010101010101010101010101"
        .parse()
        .unwrap();
    assert_eq!(key.to_bytes(), [1u8; 32]);
    // address derivation is deterministic and account-flagged
    let address = key.to_address();
    assert!(address.is_account_address());
    assert_eq!(address, PrivateKey::from_bytes([1u8; 32]).to_address());
}

#[test]
fn keypair_form_round_trips() {
    let key = PrivateKey::from_bytes([5u8; 32]);
    let keypair = key.to_keypair_bytes();
    let back = PrivateKey::from_slice(&keypair).unwrap();
    assert_eq!(back, key);
}

#[test]
fn keypair_form_rejects_foreign_public_key() {
    let key = PrivateKey::from_bytes([5u8; 32]);
    let mut keypair = key.to_keypair_bytes();
    keypair[63] ^= 0xff;
    match PrivateKey::from_slice(&keypair) {
        Err(Error::MismatchedKeyPair) => {}
        _ => panic!(),
    }
}

#[test]
fn sign_and_verify() {
    use crate::constants::PUB_SIG_LEN;
    let key = PrivateKey::from_bytes([7u8; 32]);
    let hash = blake2b_256(b"Hello, world!");
    let sig = key.sign_hash(&hash);
    assert_eq!(sig.to_bytes().len(), PUB_SIG_LEN);
    sig.verify(&hash).unwrap();
    // the recovered signer matches the key's own address
    assert_eq!(sig.recover(&hash).unwrap(), key.to_address());

    let sig_2 = key.sign_insecure_msg(b"Hello, world!");
    assert_eq!(sig, sig_2);
}

#[test]
fn salted_message_signing_differs() {
    let key = PrivateKey::from_bytes([7u8; 32]);
    let plain = key.sign_insecure_msg(b"test message");
    let salted = key.sign_aion_msg(b"test message");
    assert_ne!(plain, salted);
    salted.verify(&hash_message(b"test message")).unwrap();
}

#[test]
fn serialize_to_json() {
    let unsafe_key: PrivateKey = "0101010101010101010101010101010101010101010101010101010101010101"
        .parse()
        .unwrap();
    let j = serde_json::to_string(&unsafe_key).unwrap();
    assert_eq!(
        j,
        r#""0x0101010101010101010101010101010101010101010101010101010101010101""#
    );
    let recovered_key: PrivateKey = serde_json::from_str(&j).unwrap();
    assert_eq!(unsafe_key, recovered_key);
}

#[test]
fn test_salt() {
    assert_eq!(
        hex_str_to_bytes("0x1941696f6e205369676e6564204d6573736167653a0a").unwrap(),
        AION_SALT.as_bytes()
    );
}
