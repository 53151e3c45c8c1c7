use crate::abi::token::{number_word, Token};
use crate::abi::types::TypeDescriptor;
use crate::constants::WORD_BYTE_LEN;
use crate::error::Error;
use crate::utils::bytes_to_hex_str;

/// One encoded top level parameter, kept around until the offset table
/// can be computed from the row lengths.
#[derive(Debug, Clone)]
pub struct EncodedRow {
    /// Total encoded byte length of this parameter's payload
    pub row_byte_len: usize,
    /// Element count, one for scalars
    pub param_len: usize,
    /// The payload itself, in word order
    pub words: Vec<u8>,
}

fn encode_row(descriptor: &TypeDescriptor, param: &Token, index: usize) -> Result<EncodedRow, Error> {
    let mut words = Vec::new();
    let param_len;
    match param {
        // an array shaped value is iterated with the scalar encoder, a
        // dynamic dimension additionally announces its element count
        Token::Array(items) => {
            param_len = items.len();
            if descriptor.has_dynamic_dimensions() {
                words.extend(number_word(param_len));
            }
            for item in items {
                words.extend(item.encode_scalar(descriptor, index)?);
            }
        }
        // scalar values always take the scalar path, even when the
        // descriptor nominally declares dimensions
        scalar => {
            param_len = 1;
            words.extend(scalar.encode_scalar(descriptor, index)?);
        }
    }
    Ok(EncodedRow {
        row_byte_len: words.len(),
        param_len,
        words,
    })
}

/// Encode a parameter list against its type list into the raw byte
/// string, without the leading hex marker.
///
/// When any parameter is dynamically sized the output starts with a head
/// of one offset word per parameter, each a byte offset to where that
/// parameter's payload begins, followed by the payloads in order.
pub fn encode_parameters_raw(types: &[&str], params: &[Token]) -> Result<Vec<u8>, Error> {
    if types.len() != params.len() {
        return Err(Error::ArityMismatch {
            types: types.len(),
            params: params.len(),
        });
    }
    let descriptors = types
        .iter()
        .map(|name| TypeDescriptor::parse(name))
        .collect::<Result<Vec<_>, Error>>()?;

    let use_offsets = descriptors.iter().any(|d| d.has_dynamic_dimensions());

    let mut rows = Vec::with_capacity(descriptors.len());
    for (index, (descriptor, param)) in descriptors.iter().zip(params.iter()).enumerate() {
        rows.push(encode_row(descriptor, param, index)?);
    }

    let mut out = Vec::new();
    if use_offsets {
        // the first payload starts right after the head itself
        let mut offset = rows.len() * WORD_BYTE_LEN;
        out.extend(number_word(offset));
        for row in rows.iter().take(rows.len().saturating_sub(1)) {
            offset += row.row_byte_len;
            out.extend(number_word(offset));
        }
    }
    for row in &rows {
        out.extend(&row.words);
    }
    Ok(out)
}

/// Encode a list of parameters to the hex string form handed to the RPC
/// transport, `0x` marker included.
pub fn encode_parameters(types: &[&str], params: &[Token]) -> Result<String, Error> {
    Ok(format!(
        "0x{}",
        bytes_to_hex_str(&encode_parameters_raw(types, params)?)
    ))
}

/// Encode a single parameter.
pub fn encode_parameter(type_name: &str, param: &Token) -> Result<String, Error> {
    encode_parameters(&[type_name], std::slice::from_ref(param))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_uint() {
        assert_eq!(
            encode_parameters(&["uint128"], &[0xffffffu32.into()]).unwrap(),
            "0x00000000000000000000000000ffffff"
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let types = ["uint128", "bytes32[]"];
        let params: Vec<Token> = vec![
            9u8.into(),
            Token::Array(vec![
                Token::Bytes(vec![0xdf, 0x32, 0x34]),
                Token::Bytes(vec![0xfd, 0xfd]),
            ]),
        ];
        assert_eq!(
            encode_parameters(&types, &params).unwrap(),
            encode_parameters(&types, &params).unwrap()
        );
    }

    #[test]
    fn fixed_bool_array() {
        // three boolean words, no offsets, no length word
        assert_eq!(
            encode_parameters(
                &["bool[3]"],
                &[Token::Array(vec![false.into(), true.into(), false.into()])]
            )
            .unwrap(),
            concat!(
                "0x",
                "00000000000000000000000000000000",
                "00000000000000000000000000000001",
                "00000000000000000000000000000000"
            )
        );
    }

    #[test]
    fn dynamic_array_offsets() {
        // one top level parameter: a head of one offset word pointing
        // right past itself, then the length word and two elements
        assert_eq!(
            encode_parameters(
                &["uint128[]"],
                &[Token::Array(vec![1u8.into(), 2u8.into()])]
            )
            .unwrap(),
            concat!(
                "0x",
                "00000000000000000000000000000010",
                "00000000000000000000000000000002",
                "00000000000000000000000000000001",
                "00000000000000000000000000000002"
            )
        );
    }

    #[test]
    fn empty_dynamic_array() {
        // a lone zero length word after the offset head
        assert_eq!(
            encode_parameters(&["uint128[]"], &[Token::Array(vec![])]).unwrap(),
            concat!(
                "0x",
                "00000000000000000000000000000010",
                "00000000000000000000000000000000"
            )
        );
    }

    #[test]
    fn mixed_static_and_dynamic() {
        // two head words; the first payload starts at 32, the second
        // after the first's single word
        let encoded = encode_parameters(
            &["uint128", "uint128[]"],
            &[
                7u8.into(),
                Token::Array(vec![1u8.into(), 2u8.into(), 3u8.into()]),
            ],
        )
        .unwrap();
        assert_eq!(
            encoded,
            concat!(
                "0x",
                "00000000000000000000000000000020",
                "00000000000000000000000000000030",
                "00000000000000000000000000000007",
                "00000000000000000000000000000003",
                "00000000000000000000000000000001",
                "00000000000000000000000000000002",
                "00000000000000000000000000000003"
            )
        );
    }

    #[test]
    fn arity_is_checked() {
        match encode_parameters(&["uint128", "bool"], &[1u8.into()]) {
            Err(Error::ArityMismatch { types: 2, params: 1 }) => {}
            _ => panic!(),
        }
    }

    #[test]
    fn unknown_type_yields_no_output() {
        match encode_parameters(&["varint"], &[1u8.into()]) {
            Err(Error::UnsupportedType(name)) => assert_eq!(name, "varint"),
            _ => panic!(),
        }
    }
}
