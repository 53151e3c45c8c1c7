use crate::address::Address;
use crate::constants::{
    ADDRESS_BYTE_LEN, NRG_CREATE_CONTRACT, NRG_TRANSACTION, NRG_TX_DATA_NONZERO, NRG_TX_DATA_ZERO,
};
use crate::crypto::blake2b_256;
use crate::error::Error;
use crate::private_key::PrivateKey;
use crate::rlp::{pack_rlp, unpack_rlp, RlpToken};
use crate::signature::Signature;
use crate::utils::bytes_to_hex_str;
use num256::Uint256;
use std::fmt;
use std::fmt::Display;

/// An Aion transaction.
///
/// The wire layout is a single RLP list in this field order:
///
/// ```text
/// | Nonce     | Up to 16 bytes       |
/// | To        | 32 byte addr, or '' |
/// | Value     | Up to 16 bytes       |
/// | Data      | 0 - unlimited        |
/// | Timestamp | Microseconds         |
/// | Nrg       | Energy limit         |
/// | NrgPrice  | Energy price         |
/// | Type      | 1 byte               |
/// | Signature | 96 bytes, if signed  |
/// ```
///
/// Unlike Ethereum's v/r/s triple the signature element is the Ed25519
/// public key concatenated with the detached signature, and the signed
/// message is the blake2b hash of the list without that element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transaction {
    /// Replay prevention counter, the last nonce successfully on chain
    /// plus one
    pub nonce: Uint256,
    /// The destination address, None deploys a contract and puts the
    /// compiled code in the data field
    pub to: Option<Address>,
    /// The amount of Aion to transfer with this transaction
    pub value: Uint256,
    /// Encoded contract call or contract creation code
    pub data: Vec<u8>,
    /// Microseconds since the epoch at signing time
    pub timestamp: Uint256,
    /// The maximum amount of energy this transaction may burn, total
    /// spend is nrg * nrg_price
    pub nrg: Uint256,
    /// The price paid per unit of energy
    pub nrg_price: Uint256,
    /// Transaction type discriminator, currently always one
    pub transaction_type: u8,
    pub signature: Option<Signature>,
}

impl Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_bytes() {
            Ok(bytes) => write!(f, "0x{}", bytes_to_hex_str(&bytes)),
            Err(_) => write!(f, "0x{}", bytes_to_hex_str(&self.to_unsigned_bytes())),
        }
    }
}

impl Transaction {
    /// The RLP tokens of everything except the signature, in wire order.
    fn unsigned_tokens(&self) -> Vec<RlpToken> {
        let to = match self.to {
            Some(address) => address.into(),
            None => RlpToken::String(Vec::new()),
        };
        vec![
            self.nonce.into(),
            to,
            self.value.into(),
            RlpToken::String(self.data.clone()),
            self.timestamp.into(),
            self.nrg.into(),
            self.nrg_price.into(),
            self.transaction_type.into(),
        ]
    }

    /// The RLP encoding that gets hashed and signed.
    pub fn to_unsigned_bytes(&self) -> Vec<u8> {
        pack_rlp(vec![RlpToken::List(self.unsigned_tokens())])
    }

    /// The blake2b hash the signature commits to.
    pub fn message_hash(&self) -> [u8; 32] {
        blake2b_256(&self.to_unsigned_bytes())
    }

    /// Creates a signed copy of this transaction. Any existing signature
    /// is replaced.
    pub fn sign(&self, key: &PrivateKey) -> Transaction {
        let hash = self.message_hash();
        let signature = key.sign_hash(&hash);
        // a bad signature here would mean the signing key is corrupt
        debug_assert!(signature.verify(&hash).is_ok());
        let mut tx = self.clone();
        tx.signature = Some(signature);
        tx
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Checks that the attached signature actually signs this
    /// transaction's content.
    pub fn is_valid(&self) -> bool {
        match self.signature {
            Some(signature) => signature.verify(&self.message_hash()).is_ok(),
            None => false,
        }
    }

    /// The signer's address, verified against the transaction content.
    pub fn sender(&self) -> Result<Address, Error> {
        match self.signature {
            Some(signature) => signature.recover(&self.message_hash()),
            None => Err(Error::NoSignature),
        }
    }

    /// The complete wire encoding, signature included.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let signature = self.signature.as_ref().ok_or(Error::NoSignature)?;
        let mut tokens = self.unsigned_tokens();
        tokens.push(RlpToken::String(signature.to_bytes().to_vec()));
        Ok(pack_rlp(vec![RlpToken::List(tokens)]))
    }

    /// The transaction hash the network will report for this transaction.
    pub fn txid(&self) -> Result<Uint256, Error> {
        Ok(Uint256::from_be_bytes(&blake2b_256(&self.to_bytes()?)))
    }

    /// Decode a wire format transaction, signed or unsigned.
    pub fn from_bytes(bytes: &[u8]) -> Result<Transaction, Error> {
        let tokens = unpack_rlp(bytes)?;
        if tokens.len() != 1 {
            return Err(Error::DeserializeRlp);
        }
        let fields = tokens[0].get_list_content()?;
        if fields.len() != 8 && fields.len() != 9 {
            return Err(Error::DeserializeRlp);
        }

        let nonce = Uint256::from_be_bytes(&fields[0].get_byte_content()?);
        let to_bytes = fields[1].get_byte_content()?;
        let to = if to_bytes.is_empty() {
            None
        } else if to_bytes.len() == ADDRESS_BYTE_LEN {
            Some(Address::try_from(to_bytes.as_slice())?)
        } else {
            return Err(Error::InvalidAddressLength {
                got: to_bytes.len(),
                expected: ADDRESS_BYTE_LEN,
            });
        };
        let value = Uint256::from_be_bytes(&fields[2].get_byte_content()?);
        let data = fields[3].get_byte_content()?;
        let timestamp = Uint256::from_be_bytes(&fields[4].get_byte_content()?);
        let nrg = Uint256::from_be_bytes(&fields[5].get_byte_content()?);
        let nrg_price = Uint256::from_be_bytes(&fields[6].get_byte_content()?);
        let type_bytes = fields[7].get_byte_content()?;
        let transaction_type = match type_bytes.as_slice() {
            [] => 0,
            [b] => *b,
            _ => return Err(Error::DeserializeRlp),
        };
        let signature = match fields.get(8) {
            Some(token) => Some(Signature::from_bytes(&token.get_byte_content()?)?),
            None => None,
        };

        Ok(Transaction {
            nonce,
            to,
            value,
            data,
            timestamp,
            nrg,
            nrg_price,
            transaction_type,
            signature,
        })
    }

    /// The energy this transaction burns before any contract code runs.
    pub fn intrinsic_nrg(&self) -> Uint256 {
        let base = if self.to.is_none() {
            NRG_CREATE_CONTRACT
        } else {
            NRG_TRANSACTION
        };
        let mut nrg: Uint256 = base.into();
        for byte in self.data.iter() {
            if *byte == 0 {
                nrg += NRG_TX_DATA_ZERO.into();
            } else {
                nrg += NRG_TX_DATA_NONZERO.into();
            }
        }
        nrg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PUB_SIG_LEN, TRANSACTION_TYPE};

    fn example_transaction() -> Transaction {
        Transaction {
            nonce: 7u8.into(),
            to: Some(
                "0xa05a3889b106e75baa621b8cc719679a3dbdd799afac1ca6b42d03dc93a23687"
                    .parse()
                    .unwrap(),
            ),
            value: 1_000_000_000u64.into(),
            data: vec![0xde, 0xad, 0x00, 0xef],
            timestamp: 1_546_300_800_000_000u64.into(),
            nrg: 21_000u32.into(),
            nrg_price: 10_000_000_000u64.into(),
            transaction_type: TRANSACTION_TYPE,
            signature: None,
        }
    }

    #[test]
    fn unsigned_encoding_is_deterministic() {
        let tx = example_transaction();
        assert_eq!(tx.to_unsigned_bytes(), tx.to_unsigned_bytes());
        assert_eq!(tx.message_hash(), tx.message_hash());
    }

    #[test]
    fn unsigned_transaction_has_no_wire_form() {
        let tx = example_transaction();
        match tx.to_bytes() {
            Err(Error::NoSignature) => {}
            _ => panic!(),
        }
        assert!(!tx.is_signed());
        assert!(!tx.is_valid());
    }

    #[test]
    fn sign_and_round_trip() {
        let key = PrivateKey::from_bytes([9u8; 32]);
        let signed = example_transaction().sign(&key);
        assert!(signed.is_signed());
        assert!(signed.is_valid());
        assert_eq!(signed.sender().unwrap(), key.to_address());

        let bytes = signed.to_bytes().unwrap();
        let decoded = Transaction::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, signed);
        assert_eq!(decoded.sender().unwrap(), key.to_address());
        assert_eq!(decoded.txid().unwrap(), signed.txid().unwrap());
    }

    #[test]
    fn tampered_transaction_is_invalid() {
        let key = PrivateKey::from_bytes([9u8; 32]);
        let mut signed = example_transaction().sign(&key);
        signed.value += 1u8.into();
        assert!(!signed.is_valid());
        assert!(signed.sender().is_err());
    }

    #[test]
    fn contract_creation_round_trip() {
        let key = PrivateKey::from_bytes([9u8; 32]);
        let mut tx = example_transaction();
        tx.to = None;
        let signed = tx.sign(&key);
        let decoded = Transaction::from_bytes(&signed.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded.to, None);
        assert_eq!(decoded, signed);
    }

    #[test]
    fn intrinsic_nrg_counts_data() {
        let tx = example_transaction();
        // 21000 + 3 nonzero bytes + 1 zero byte
        let expected: Uint256 =
            (NRG_TRANSACTION + 3 * NRG_TX_DATA_NONZERO + NRG_TX_DATA_ZERO).into();
        assert_eq!(tx.intrinsic_nrg(), expected);

        let mut create = example_transaction();
        create.to = None;
        create.data = Vec::new();
        assert_eq!(create.intrinsic_nrg(), NRG_CREATE_CONTRACT.into());
    }

    #[test]
    fn display_is_prefixed_hex() {
        let key = PrivateKey::from_bytes([9u8; 32]);
        let signed = example_transaction().sign(&key);
        let s = format!("{signed}");
        assert!(s.starts_with("0x"));
        assert!(s.len() > 2 + PUB_SIG_LEN * 2);
    }
}
