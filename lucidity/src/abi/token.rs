use crate::abi::types::{BaseType, TypeDescriptor};
use crate::address::Address;
use crate::constants::{tt128m1, WORD_BYTE_LEN};
use crate::error::Error;
use crate::utils::rpad;
use num256::{Int256, Uint256};
use num_traits::ToPrimitive;
use std::str;

/// A token represents the value of one parameter of a contract call.
///
/// Numbers ride the `num256` types so that an out of range value is a
/// reportable encoding error instead of a type system impossibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Uint(Uint256),
    Int(Int256),
    Bool(bool),
    Address(Address),
    /// Raw bytes, fixed (`bytes32`) or dynamic (`bytes`) on the wire
    Bytes(Vec<u8>),
    String(String),
    /// One array parameter worth of scalars
    Array(Vec<Token>),
}

impl From<u8> for Token {
    fn from(v: u8) -> Token {
        Token::Uint(v.into())
    }
}

impl From<u16> for Token {
    fn from(v: u16) -> Token {
        Token::Uint(v.into())
    }
}

impl From<u32> for Token {
    fn from(v: u32) -> Token {
        Token::Uint(v.into())
    }
}

impl From<u64> for Token {
    fn from(v: u64) -> Token {
        Token::Uint(v.into())
    }
}

impl From<u128> for Token {
    fn from(v: u128) -> Token {
        Token::Uint(v.into())
    }
}

impl From<Uint256> for Token {
    fn from(v: Uint256) -> Token {
        Token::Uint(v)
    }
}

impl From<Int256> for Token {
    fn from(v: Int256) -> Token {
        Token::Int(v)
    }
}

impl From<bool> for Token {
    fn from(v: bool) -> Token {
        Token::Bool(v)
    }
}

impl From<Address> for Token {
    fn from(v: Address) -> Token {
        Token::Address(v)
    }
}

impl From<Vec<u8>> for Token {
    fn from(v: Vec<u8>) -> Token {
        Token::Bytes(v)
    }
}

impl From<&str> for Token {
    fn from(v: &str) -> Token {
        Token::String(v.to_string())
    }
}

impl From<String> for Token {
    fn from(v: String) -> Token {
        Token::String(v)
    }
}

impl From<Vec<Token>> for Token {
    fn from(v: Vec<Token>) -> Token {
        Token::Array(v)
    }
}

/// An unsigned number as a single left padded word, used for lengths and
/// offsets everywhere in the format.
pub(crate) fn number_word(value: usize) -> [u8; WORD_BYTE_LEN] {
    (value as u128).to_be_bytes()
}

impl Token {
    /// Encode one scalar value of the descriptor's base type. Numeric,
    /// boolean and address values take exactly their element width;
    /// bytes and string values produce a length word followed by the
    /// payload right padded to a word boundary.
    pub(crate) fn encode_scalar(
        &self,
        descriptor: &TypeDescriptor,
        index: usize,
    ) -> Result<Vec<u8>, Error> {
        let mismatch = || {
            Error::InvalidCallError(format!(
                "parameter {} is not a {} value",
                index,
                descriptor.name()
            ))
        };
        match descriptor.base_type() {
            BaseType::Bool => match self {
                Token::Bool(v) => {
                    let mut word = vec![0u8; WORD_BYTE_LEN];
                    word[WORD_BYTE_LEN - 1] = *v as u8;
                    Ok(word)
                }
                _ => Err(mismatch()),
            },
            BaseType::Uint | BaseType::Int | BaseType::Fixed | BaseType::Ufixed => match self {
                Token::Uint(v) => {
                    if *v > tt128m1() {
                        return Err(Error::EncodingOverflow {
                            index,
                            type_name: descriptor.name().to_string(),
                        });
                    }
                    // the upper half of the 32 byte buffer is zero here
                    Ok(v.to_be_bytes()[WORD_BYTE_LEN..].to_vec())
                }
                Token::Int(v) => {
                    let narrowed = v.to_i128().ok_or_else(|| Error::EncodingOverflow {
                        index,
                        type_name: descriptor.name().to_string(),
                    })?;
                    Ok(narrowed.to_be_bytes().to_vec())
                }
                _ => Err(mismatch()),
            },
            BaseType::Address => match self {
                // the raw 32 bytes, no padding beyond the natural width
                Token::Address(v) => Ok(v.as_bytes().to_vec()),
                _ => Err(mismatch()),
            },
            BaseType::Bytes => match self {
                Token::Bytes(v) => Ok(length_prefixed(v)),
                _ => Err(mismatch()),
            },
            BaseType::String => match self {
                Token::String(v) => Ok(length_prefixed(v.as_bytes())),
                _ => Err(mismatch()),
            },
        }
    }

    /// Decode one scalar from its exact payload slice. For bytes and
    /// string the caller has already resolved the length and stripped
    /// the padding.
    pub(crate) fn decode_scalar(
        descriptor: &TypeDescriptor,
        payload: &[u8],
        index: usize,
    ) -> Result<Token, Error> {
        match descriptor.base_type() {
            BaseType::Bool => match payload.last() {
                Some(b) => Ok(Token::Bool(*b != 0)),
                None => Err(Error::TruncatedInput {
                    index,
                    type_name: descriptor.name().to_string(),
                    needed: WORD_BYTE_LEN,
                    have: 0,
                }),
            },
            BaseType::Uint | BaseType::Ufixed => Ok(Token::Uint(Uint256::from_be_bytes(payload))),
            BaseType::Int | BaseType::Fixed => {
                let mut word = [0u8; WORD_BYTE_LEN];
                word.copy_from_slice(payload);
                // big endian two's complement, sign extension included
                Ok(Token::Int(i128::from_be_bytes(word).into()))
            }
            BaseType::Address => Ok(Token::Address(Address::try_from(payload)?)),
            BaseType::Bytes => Ok(Token::Bytes(payload.to_vec())),
            BaseType::String => Ok(Token::String(str::from_utf8(payload)?.to_string())),
        }
    }
}

/// Length word followed by the payload right padded with zero bytes to
/// the next whole word boundary.
fn length_prefixed(payload: &[u8]) -> Vec<u8> {
    let mut out = number_word(payload.len()).to_vec();
    out.extend(rpad(payload, WORD_BYTE_LEN));
    out
}
