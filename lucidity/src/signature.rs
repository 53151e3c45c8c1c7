use crate::address::Address;
use crate::constants::{ED25519_SIGNATURE_LEN, PUBLIC_KEY_LEN, PUB_SIG_LEN};
use crate::error::Error;
use crate::utils::{bytes_to_hex_str, hex_str_to_bytes};
use ed25519_dalek::VerifyingKey;
use serde::de::Deserialize;
use serde::de::Deserializer;
use serde::ser::Serialize;
use serde::ser::Serializer;
use std::fmt;
use std::str::FromStr;

/// An Aion transaction or message signature.
///
/// The chain does not recover signers the way secp256k1 chains do, so the
/// wire format carries the Ed25519 public key alongside the detached
/// signature: 32 key bytes followed by 64 signature bytes. The signer's
/// address is derived from the embedded key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    public_key: [u8; PUBLIC_KEY_LEN],
    signature: [u8; ED25519_SIGNATURE_LEN],
}

impl Signature {
    pub fn new(
        public_key: [u8; PUBLIC_KEY_LEN],
        signature: [u8; ED25519_SIGNATURE_LEN],
    ) -> Signature {
        Signature {
            public_key,
            signature,
        }
    }

    /// Parse the 96 byte public key plus signature blob used on the wire.
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature, Error> {
        if bytes.len() != PUB_SIG_LEN {
            return Err(Error::InvalidSignatureLength {
                got: bytes.len(),
                expected: PUB_SIG_LEN,
            });
        }
        let mut public_key = [0u8; PUBLIC_KEY_LEN];
        let mut signature = [0u8; ED25519_SIGNATURE_LEN];
        public_key.copy_from_slice(&bytes[..PUBLIC_KEY_LEN]);
        signature.copy_from_slice(&bytes[PUBLIC_KEY_LEN..]);
        Ok(Signature {
            public_key,
            signature,
        })
    }

    pub fn to_bytes(&self) -> [u8; PUB_SIG_LEN] {
        let mut out = [0u8; PUB_SIG_LEN];
        out[..PUBLIC_KEY_LEN].copy_from_slice(&self.public_key);
        out[PUBLIC_KEY_LEN..].copy_from_slice(&self.signature);
        out
    }

    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.public_key
    }

    /// Check this signature against the signed message, usually a 32 byte
    /// transaction hash.
    pub fn verify(&self, message: &[u8]) -> Result<(), Error> {
        let key = VerifyingKey::from_bytes(&self.public_key)?;
        let signature = ed25519_dalek::Signature::from_bytes(&self.signature);
        key.verify_strict(message, &signature)?;
        Ok(())
    }

    /// Recover the signer of `message`. Verification failure means the
    /// embedded public key did not produce this signature and no address
    /// can be trusted from it.
    pub fn recover(&self, message: &[u8]) -> Result<Address, Error> {
        self.verify(message)?;
        Ok(Address::from_public_key(&self.public_key))
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex_str_to_bytes(s)?;
        Signature::from_bytes(&bytes)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", bytes_to_hex_str(&self.to_bytes()))
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Signature, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[test]
fn blob_round_trip() {
    let sig = Signature::new([3u8; 32], [7u8; 64]);
    let blob = sig.to_bytes();
    assert_eq!(blob.len(), PUB_SIG_LEN);
    assert_eq!(Signature::from_bytes(&blob).unwrap(), sig);
}

#[test]
fn rejects_short_blob() {
    let res = Signature::from_bytes(&[0u8; 95]);
    match res {
        Err(Error::InvalidSignatureLength { got: 95, .. }) => {}
        _ => panic!(),
    }
}

#[test]
fn display_round_trip() {
    let sig = Signature::new([3u8; 32], [7u8; 64]);
    let s = sig.to_string();
    assert!(s.starts_with("0x"));
    assert_eq!(s.len(), 2 + PUB_SIG_LEN * 2);
    let back: Signature = s.parse().unwrap();
    assert_eq!(back, sig);
}

#[test]
fn garbage_does_not_verify() {
    let sig = Signature::new([3u8; 32], [7u8; 64]);
    assert!(sig.verify(b"message").is_err());
}
