//! RLP encoder and decoder. Transactions are RLP encoded on the wire,
//! whereas contract calls inside them use the ABI codec; this is the outer
//! wrapper for any ABI encoded value.
use crate::{Address, Error};
use num256::Uint256;

/// Intermediate representation for RLP serialization and deserialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpToken {
    List(Vec<RlpToken>),
    /// a string is just an arbitrary run of bytes, most of ours hold
    /// big endian integers with leading zeroes trimmed
    String(Vec<u8>),
    /// single byte values get folded into the stream directly
    SingleByte(u8),
}

impl RlpToken {
    /// Returns the byte content of String and SingleByte tokens,
    /// an Error for the List variant.
    pub fn get_byte_content(&self) -> Result<Vec<u8>, Error> {
        match self {
            RlpToken::List(_) => Err(Error::DeserializeRlp),
            RlpToken::String(b) => Ok(b.clone()),
            RlpToken::SingleByte(b) => Ok(vec![*b]),
        }
    }

    /// Returns the list content of a List token, an Error for the
    /// String and SingleByte variants.
    pub fn get_list_content(&self) -> Result<Vec<RlpToken>, Error> {
        match self {
            RlpToken::List(v) => Ok(v.clone()),
            RlpToken::String(_) | RlpToken::SingleByte(_) => Err(Error::DeserializeRlp),
        }
    }
}

impl From<u8> for RlpToken {
    fn from(value: u8) -> Self {
        RlpToken::SingleByte(value)
    }
}

impl From<Uint256> for RlpToken {
    fn from(value: Uint256) -> Self {
        if value < 128u8.into() {
            RlpToken::SingleByte(value.to_le_bytes()[0])
        } else {
            RlpToken::String(trim_leading_zero_bytes(value.to_be_bytes().to_vec()))
        }
    }
}

impl From<&Uint256> for RlpToken {
    fn from(value: &Uint256) -> Self {
        (*value).into()
    }
}

impl From<Address> for RlpToken {
    fn from(value: Address) -> Self {
        RlpToken::String(value.as_bytes().to_vec())
    }
}

impl From<&Address> for RlpToken {
    fn from(value: &Address) -> Self {
        RlpToken::String(value.as_bytes().to_vec())
    }
}

fn trim_leading_zero_bytes(bytes: Vec<u8>) -> Vec<u8> {
    for (i, v) in bytes.iter().enumerate() {
        if *v != 0 {
            return bytes[i..].to_vec();
        }
    }
    Vec::new()
}

/// Takes RLP tokens and packs them into a single encoded byte array
pub fn pack_rlp(input: Vec<RlpToken>) -> Vec<u8> {
    let mut out = Vec::new();
    for token in input {
        encode_token(token, &mut out);
    }
    out
}

fn encode_token(token: RlpToken, out: &mut Vec<u8>) {
    match token {
        RlpToken::SingleByte(b) => {
            if b == 0 {
                // integer zero is encoded as an empty string rather than 0x00
                out.push(0x80);
            } else if b <= 0x7f {
                out.push(b);
            } else {
                // values above 0x7f become a one byte string
                out.push(0x81);
                out.push(b);
            }
        }
        RlpToken::String(string) => {
            if string.len() == 1 && string[0] <= 0x7f {
                // canonical RLP folds a single low byte into itself
                out.push(string[0]);
            } else if string.len() <= 55 {
                out.push(0x80 + string.len() as u8);
                out.extend(string);
            } else {
                let len_bytes = trim_leading_zero_bytes(string.len().to_be_bytes().to_vec());
                out.push(0xb7 + len_bytes.len() as u8);
                out.extend(len_bytes);
                out.extend(string);
            }
        }
        RlpToken::List(list) => {
            let payload = pack_rlp(list);
            if payload.len() <= 55 {
                out.push(0xc0 + payload.len() as u8);
                out.extend(payload);
            } else {
                let len_bytes = trim_leading_zero_bytes(payload.len().to_be_bytes().to_vec());
                out.push(0xf7 + len_bytes.len() as u8);
                out.extend(len_bytes);
                out.extend(payload);
            }
        }
    }
}

/// Unpacks RLP encoded bytes into a series of tokens
/// https://ethereum.org/en/developers/docs/data-structures-and-encoding/rlp/
/// From there further decoding can occur
pub fn unpack_rlp(input: &[u8]) -> Result<Vec<RlpToken>, Error> {
    if input.is_empty() {
        return Err(Error::DeserializeRlp);
    }
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < input.len() {
        let (token, used) = decode_token(&input[pos..])?;
        tokens.push(token);
        pos += used;
    }
    Ok(tokens)
}

/// Decodes the single token starting at the front of the input, returning
/// it along with the number of bytes it occupied.
fn decode_token(input: &[u8]) -> Result<(RlpToken, usize), Error> {
    match input[0] {
        // a unit value encoded as itself
        d if d <= 0x7f => Ok((RlpToken::SingleByte(d), 1)),
        // short string, length in the prefix byte
        d if d <= 0xb7 => {
            let len = (d - 0x80) as usize;
            let end = 1 + len;
            if end > input.len() {
                return Err(Error::DeserializeRlp);
            }
            let token = if len == 1 {
                // one byte strings fold back into the single byte form
                RlpToken::SingleByte(input[1])
            } else {
                RlpToken::String(input[1..end].to_vec())
            };
            Ok((token, end))
        }
        // long string, the prefix encodes the length of the length
        d if d < 0xc0 => {
            let len_of_len = (d - 0xb7) as usize;
            let (len, start) = decode_length(input, len_of_len)?;
            let end = start + len;
            if end > input.len() {
                return Err(Error::DeserializeRlp);
            }
            Ok((RlpToken::String(input[start..end].to_vec()), end))
        }
        // short list
        d if d <= 0xf7 => {
            let len = (d - 0xc0) as usize;
            let end = 1 + len;
            if end > input.len() {
                return Err(Error::DeserializeRlp);
            }
            let content = if len == 0 {
                Vec::new()
            } else {
                unpack_rlp(&input[1..end])?
            };
            Ok((RlpToken::List(content), end))
        }
        // long list
        d => {
            let len_of_len = (d - 0xf7) as usize;
            let (len, start) = decode_length(input, len_of_len)?;
            let end = start + len;
            if end > input.len() {
                return Err(Error::DeserializeRlp);
            }
            Ok((RlpToken::List(unpack_rlp(&input[start..end])?), end))
        }
    }
}

fn decode_length(input: &[u8], len_of_len: usize) -> Result<(usize, usize), Error> {
    if len_of_len >= input.len() {
        return Err(Error::DeserializeRlp);
    }
    let len = downcast(Uint256::from_be_bytes(&input[1..1 + len_of_len]))?;
    Ok((len, 1 + len_of_len))
}

/// Safely downcasts a Uint256 to system integer size. On 32 bit systems
/// this can reject otherwise valid RLP, but only RLP the system could not
/// hold in memory anyways.
pub fn downcast(input: Uint256) -> Result<usize, Error> {
    if input > usize::MAX.into() {
        Err(Error::DeserializeRlp)
    } else {
        const USIZE_BYTES: usize = (usize::BITS / 8) as usize;
        let bytes = input.to_le_bytes();
        let mut slice = [0; USIZE_BYTES];
        slice.copy_from_slice(&bytes[0..USIZE_BYTES]);
        Ok(usize::from_le_bytes(slice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::get_fuzz_bytes;
    use rand::thread_rng;

    #[test]
    fn test_downcast() {
        assert_eq!(downcast(50u8.into()).unwrap(), 50);
        let max = Uint256::from(u32::MAX);
        #[cfg(all(unix, target_pointer_width = "64"))]
        assert_eq!(downcast(max + 1u8.into()).unwrap(), (u32::MAX as usize + 1));
    }

    #[test]
    fn encode_dog() {
        // canonical vectors from the Ethereum RLP documentation
        assert_eq!(
            pack_rlp(vec![RlpToken::String(b"dog".to_vec())]),
            vec![0x83, b'd', b'o', b'g']
        );
        assert_eq!(
            pack_rlp(vec![RlpToken::List(vec![
                RlpToken::String(b"cat".to_vec()),
                RlpToken::String(b"dog".to_vec()),
            ])]),
            vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
        );
    }

    #[test]
    fn encode_empty_values() {
        assert_eq!(pack_rlp(vec![RlpToken::String(vec![])]), vec![0x80]);
        assert_eq!(pack_rlp(vec![RlpToken::List(vec![])]), vec![0xc0]);
        assert_eq!(pack_rlp(vec![RlpToken::SingleByte(0)]), vec![0x80]);
    }

    #[test]
    fn encode_long_string() {
        let payload = vec![0x61u8; 56];
        let encoded = pack_rlp(vec![RlpToken::String(payload.clone())]);
        assert_eq!(encoded[0], 0xb8);
        assert_eq!(encoded[1], 56);
        assert_eq!(&encoded[2..], payload.as_slice());
    }

    #[test]
    fn uint_conversion() {
        assert_eq!(RlpToken::from(Uint256::from(0u8)), RlpToken::SingleByte(0));
        assert_eq!(
            RlpToken::from(Uint256::from(127u8)),
            RlpToken::SingleByte(127)
        );
        assert_eq!(
            RlpToken::from(Uint256::from(1_000_000u32)),
            RlpToken::String(vec![0x0f, 0x42, 0x40])
        );
    }

    #[test]
    fn structured_round_trip() {
        let tokens = vec![RlpToken::List(vec![
            RlpToken::SingleByte(9),
            RlpToken::String(vec![]),
            RlpToken::String(vec![0xde, 0xad, 0xbe, 0xef]),
            RlpToken::String(vec![0x55; 96]),
            RlpToken::List(vec![RlpToken::SingleByte(1), RlpToken::SingleByte(0x80)]),
        ])];
        let packed = pack_rlp(tokens.clone());
        assert_eq!(unpack_rlp(&packed).unwrap(), tokens);
    }

    #[test]
    fn fuzz_rlp_decode() {
        let mut rng = thread_rng();
        for _ in 0..10_000 {
            let bytes = get_fuzz_bytes(&mut rng);
            // must never panic, errors are fine
            let _res = unpack_rlp(&bytes);
        }
    }
}
