//! End to end checks of the parameter codec: round trip behavior, the
//! offset table layout, and selector derivation, driven through the
//! public API only.

use lucidity::abi::{
    decode_parameters, encode_function_signature, encode_parameters, Input, Token,
};
use lucidity::utils::hex_str_to_bytes;
use lucidity::{Address, Error, Uint256};

const WORD: usize = 16;

fn words(encoded: &str) -> Vec<Vec<u8>> {
    let bytes = hex_str_to_bytes(encoded).unwrap();
    bytes.chunks(WORD).map(|c| c.to_vec()).collect()
}

fn word_value(word: &[u8]) -> u128 {
    let mut buf = [0u8; 16];
    buf.copy_from_slice(word);
    u128::from_be_bytes(buf)
}

#[test]
fn round_trip_covers_the_catalog() {
    let address: Address = "0xa07c95cc8729a0503c5ad50eb37ec8a27cd22d65de3bb225982ec55201366920"
        .parse()
        .unwrap();
    let cases: Vec<(Vec<&str>, Vec<Token>)> = vec![
        (vec!["uint128"], vec![0xffffffu32.into()]),
        (vec!["int128"], vec![Token::Int((-40i64).into())]),
        (vec!["bool"], vec![true.into()]),
        (vec!["address"], vec![address.into()]),
        (vec!["bytes"], vec![Token::Bytes(vec![0xdf, 0x32, 0x34])]),
        (vec!["string"], vec!["Aller Anfang ist schwer".into()]),
        (
            vec!["bool[3]"],
            vec![Token::Array(vec![false.into(), true.into(), false.into()])],
        ),
        (
            vec!["uint128[]"],
            vec![Token::Array(vec![1u8.into(), 2u8.into(), 3u8.into()])],
        ),
        (
            vec!["bytes32[]"],
            vec![Token::Array(vec![
                Token::Bytes(vec![0xdf, 0x32, 0x34]),
                Token::Bytes(vec![0xfd, 0xfd]),
            ])],
        ),
        (
            // a dynamic dimension brings the offset head into play for
            // every parameter, so mixed lists stay addressable
            vec!["uint128", "string[]", "bool[2]"],
            vec![
                9000u32.into(),
                Token::Array(vec!["mixed".into(), "words".into()]),
                Token::Array(vec![true.into(), true.into()]),
            ],
        ),
        (vec!["uint128", "string"], vec![42u8.into(), "tail".into()]),
        (vec!["uint128[]"], vec![Token::Array(vec![])]),
    ];

    for (types, params) in cases {
        let encoded = encode_parameters(&types, &params).unwrap();
        // determinism
        assert_eq!(encoded, encode_parameters(&types, &params).unwrap());
        // round trip law
        let decoded = decode_parameters(types.as_slice(), &encoded).unwrap();
        assert_eq!(decoded, params, "round trip failed for {types:?}");
    }
}

#[test]
fn single_word_scalars_are_fixed_width() {
    for (type_name, param) in [
        ("uint128", Token::from(1u8)),
        ("int128", Token::Int(77i64.into())),
        ("bool", Token::from(false)),
    ] {
        let encoded = encode_parameters(&[type_name], &[param]).unwrap();
        assert_eq!(encoded.len(), 2 + WORD * 2, "{type_name} is not one word");
    }
}

#[test]
fn left_padded_uint_scenario() {
    let encoded = encode_parameters(&["uint128"], &[0xffffffu32.into()]).unwrap();
    assert_eq!(encoded, "0x00000000000000000000000000ffffff");
}

#[test]
fn bool_array_scenario() {
    let encoded = encode_parameters(
        &["bool[3]"],
        &[Token::Array(vec![false.into(), true.into(), false.into()])],
    )
    .unwrap();
    let words = words(&encoded);
    assert_eq!(words.len(), 3);
    assert_eq!(word_value(&words[0]), 0);
    assert_eq!(word_value(&words[1]), 1);
    assert_eq!(word_value(&words[2]), 0);
}

#[test]
fn bytes_scenario() {
    let encoded =
        encode_parameters(&["bytes"], &[Token::Bytes(vec![0xdf, 0x32, 0x34])]).unwrap();
    let words = words(&encoded);
    assert_eq!(words.len(), 2);
    assert_eq!(word_value(&words[0]), 3);
    assert_eq!(words[1][..3], [0xdf, 0x32, 0x34]);
    assert_eq!(words[1][3..], [0u8; 13]);
}

#[test]
fn offset_head_covers_every_parameter() {
    // a fixed scalar mixed with a dynamic array: one offset word per top
    // level parameter, the first pointing right past the head
    let encoded = encode_parameters(
        &["uint128", "uint128[]"],
        &[7u8.into(), Token::Array(vec![1u8.into(), 2u8.into()])],
    )
    .unwrap();
    let words = words(&encoded);
    let head_size = 2 * WORD;
    let first_offset = word_value(&words[0]) as usize;
    let second_offset = word_value(&words[1]) as usize;
    assert_eq!(first_offset, head_size);
    // offsets increase strictly in parameter order
    assert!(second_offset > first_offset);
    // the second parameter's payload starts with its element count
    assert_eq!(word_value(&words[second_offset / WORD]), 2);
}

#[test]
fn unsupported_type_produces_no_output() {
    match encode_parameters(&["mapping"], &[1u8.into()]) {
        Err(Error::UnsupportedType(name)) => assert_eq!(name, "mapping"),
        other => panic!("expected UnsupportedType, got {other:?}"),
    }
}

#[test]
fn selector_invariant_across_forms() {
    let inputs = vec![
        Input {
            name: "myNumber".to_string(),
            type_: "uint128".to_string(),
            indexed: false,
        },
        Input {
            name: "myBytes".to_string(),
            type_: "bytes32".to_string(),
            indexed: false,
        },
    ];
    // repeated derivation from equal semantic content is byte identical
    let types: Vec<String> = inputs.iter().map(|i| i.type_.clone()).collect();
    let built = format!("myEvent({})", types.join(","));
    assert_eq!(
        encode_function_signature(&built),
        encode_function_signature("myEvent(uint128,bytes32)")
    );
}

#[test]
fn numeric_equivalence_survives_round_trip() {
    let big = Uint256::from(u128::MAX);
    let encoded = encode_parameters(&["uint128"], &[Token::Uint(big)]).unwrap();
    let decoded = decode_parameters(["uint128"], &encoded).unwrap();
    assert_eq!(decoded, vec![Token::Uint(Uint256::from(u128::MAX))]);
}
