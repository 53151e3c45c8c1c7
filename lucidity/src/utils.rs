use crate::error::Error;
use std::str;

/// A function that takes a hexadecimal representation of bytes
/// back into a stream of bytes. Accepts an optional `0x` prefix.
pub fn hex_str_to_bytes(s: &str) -> Result<Vec<u8>, Error> {
    let s = match s.strip_prefix("0x") {
        Some(s) => s,
        None => s,
    };
    s.as_bytes()
        .chunks(2)
        .map(|ch| {
            let byte_str = str::from_utf8(ch)?;
            let byte = u8::from_str_radix(byte_str, 16)?;
            Ok(byte)
        })
        .collect()
}

pub fn bytes_to_hex_str(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:0>2x?}"))
        .fold(String::new(), |acc, x| acc + &x)
}

/// Pad bytes with zeros at the start.
pub fn zpad(bytes: &[u8], len: usize) -> Vec<u8> {
    if bytes.len() >= len {
        return bytes.to_vec();
    }
    let mut pad = vec![0u8; len - bytes.len()];
    pad.extend(bytes);
    pad
}

/// Pad bytes with zeros at the end up to the next multiple of `boundary`.
pub fn rpad(bytes: &[u8], boundary: usize) -> Vec<u8> {
    let mut out = bytes.to_vec();
    let rem = out.len() % boundary;
    if rem != 0 {
        out.resize(out.len() + boundary - rem, 0u8);
    }
    out
}

#[cfg(test)]
pub fn get_fuzz_bytes(rng: &mut rand::rngs::ThreadRng) -> Vec<u8> {
    use rand::Rng;
    let len = rng.gen_range(1..2000);
    let mut bytes = vec![0u8; len];
    rng.fill(bytes.as_mut_slice());
    bytes
}

#[test]
fn decode_bytes() {
    assert_eq!(
        hex_str_to_bytes("deadbeef").expect("Unable to decode"),
        [222, 173, 190, 239]
    );
}

#[test]
fn decode_odd_amount_of_bytes() {
    assert_eq!(hex_str_to_bytes("f").unwrap(), vec![15]);
}

#[test]
fn bytes_raises_decode_error() {
    let e = hex_str_to_bytes("\u{012345}deadbeef").unwrap_err();
    match e {
        Error::InvalidUtf8(_) => {}
        _ => panic!(),
    };
}

#[test]
fn bytes_raises_parse_error() {
    let e = hex_str_to_bytes("Lorem ipsum").unwrap_err();
    match e {
        Error::InvalidHex(_) => {}
        _ => panic!(),
    }
}

#[test]
fn parse_prefixed_empty() {
    assert_eq!(hex_str_to_bytes("0x").unwrap(), Vec::<u8>::new());
}

#[test]
fn parse_prefixed_non_empty() {
    assert_eq!(
        hex_str_to_bytes("0xdeadbeef").unwrap(),
        vec![0xde, 0xad, 0xbe, 0xef]
    );
}

#[test]
fn encode_bytes() {
    assert_eq!(bytes_to_hex_str(&[0xf]), "0f".to_owned());
    assert_eq!(bytes_to_hex_str(&[0xff]), "ff".to_owned());
    assert_eq!(
        bytes_to_hex_str(&[0xde, 0xad, 0xbe, 0xef]),
        "deadbeef".to_owned()
    );
}

#[test]
fn verify_zpad() {
    assert_eq!(zpad(&[1, 2, 3, 4], 8), [0, 0, 0, 0, 1, 2, 3, 4]);
}

#[test]
fn verify_zpad_exact() {
    assert_eq!(zpad(&[1, 2, 3, 4], 4), [1, 2, 3, 4]);
}

#[test]
fn verify_zpad_less_than_size() {
    assert_eq!(zpad(&[1, 2, 3, 4], 2), [1, 2, 3, 4]);
}

#[test]
fn verify_rpad() {
    assert_eq!(rpad(&[1, 2, 3], 4), [1, 2, 3, 0]);
    assert_eq!(rpad(&[1, 2, 3, 4], 4), [1, 2, 3, 4]);
    assert_eq!(rpad(&[], 4), Vec::<u8>::new());
    assert_eq!(rpad(&[1, 2, 3, 4, 5], 4), [1, 2, 3, 4, 5, 0, 0, 0]);
}
