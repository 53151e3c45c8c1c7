//! Contract ABI encoding and decoding.
//!
//! The wire format is the FastVM flavor of the Solidity ABI: the same
//! head and tail layout, but built from 16 byte words and blake2b based
//! selectors. Parameter values are expressed as [Token]s, type names are
//! parsed into [TypeDescriptor]s, and the two meet in
//! [encode_parameters] and [decode_parameters].
//!
//! This is not a full implementation of every ABI the wider ecosystem has
//! grown; it covers the closed type catalog the chain's virtual machine
//! actually executes, and the helpers a contract call needs.

pub mod contract;
pub mod decode;
pub mod encode;
pub mod input;
pub mod item;
pub mod operation;
pub mod output;
pub mod state_mutability;
pub mod token;
pub mod types;

pub use contract::Contract;
pub use decode::{decode_parameter, decode_parameters, TypeSpec};
pub use encode::{encode_parameter, encode_parameters, encode_parameters_raw};
pub use input::Input;
pub use item::Item;
pub use operation::Operation;
pub use output::Output;
pub use state_mutability::StateMutability;
pub use token::Token;
pub use types::{BaseType, Dimension, TypeDescriptor};

use crate::constants::FUNCTION_SELECTOR_LEN;
use crate::crypto::blake2b_256;
use crate::error::Error;
use crate::utils::bytes_to_hex_str;

/// Given a canonical signature string it derives the four byte method id.
pub fn derive_method_id(signature: &str) -> [u8; FUNCTION_SELECTOR_LEN] {
    let digest = blake2b_256(signature.as_bytes());
    let mut result = [0u8; FUNCTION_SELECTOR_LEN];
    result.copy_from_slice(&digest[0..FUNCTION_SELECTOR_LEN]);
    result
}

/// The full signature hash, used as the leading topic of an event's logs.
pub fn derive_event_topic(signature: &str) -> [u8; 32] {
    blake2b_256(signature.as_bytes())
}

/// Encode a function to its hex selector, from a raw signature string.
pub fn encode_function_signature(signature: &str) -> String {
    format!("0x{}", bytes_to_hex_str(&derive_method_id(signature)))
}

/// Encode an event to its hex signature hash, from a raw signature
/// string.
pub fn encode_event_signature(signature: &str) -> String {
    format!("0x{}", bytes_to_hex_str(&derive_event_topic(signature)))
}

/// Read the parameter type names back out of a canonical signature
/// string such as `transfer(address,uint128)`.
fn signature_types(signature: &str) -> Result<Vec<String>, Error> {
    let open = signature
        .find('(')
        .ok_or_else(|| Error::InvalidCallError(signature.to_string()))?;
    let inner = signature[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| Error::InvalidCallError(signature.to_string()))?;
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    Ok(inner.split(',').map(|t| t.trim().to_string()).collect())
}

/// Encode a contract call from a raw signature string: the method id
/// followed by the encoded parameters, as raw bytes ready to become
/// transaction data.
pub fn encode_call(signature: &str, params: &[Token]) -> Result<Vec<u8>, Error> {
    let types = signature_types(signature)?;
    let types: Vec<&str> = types.iter().map(|s| s.as_str()).collect();
    let mut out = derive_method_id(signature).to_vec();
    out.extend(encode_parameters_raw(&types, params)?);
    Ok(out)
}

/// Encode a contract call from an interface item, as the hex string the
/// RPC layer sends.
pub fn encode_function_call(item: &Item, params: &[Token]) -> Result<String, Error> {
    let signature = item.signature()?;
    Ok(format!("0x{}", bytes_to_hex_str(&encode_call(&signature, params)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WORD_BYTE_LEN;

    fn interface_item(name: &str, types: &[&str]) -> Item {
        Item {
            operation: Operation::Function,
            name: Some(name.to_string()),
            payable: false,
            constant: false,
            inputs: types
                .iter()
                .map(|t| Input {
                    name: String::new(),
                    type_: t.to_string(),
                    indexed: false,
                })
                .collect(),
            outputs: None,
            state_mutability: None,
        }
    }

    #[test]
    fn event_signature_vector() {
        // vector produced by the chain's javascript client
        assert_eq!(
            encode_event_signature("myEvent(uint128,bytes32)"),
            "0x2236226bdca8de2f2bc9a5be931cb54acc7d73c5a829b22dc2b7e92af174f7d4"
        );
    }

    #[test]
    fn function_signature_vector() {
        assert_eq!(
            encode_function_signature("myMethod(uint128,string)"),
            "0xaaed82c1"
        );
    }

    #[test]
    fn selector_agrees_across_input_forms() {
        let item = interface_item("myMethod", &["uint128", "string"]);
        assert_eq!(
            encode_function_signature(&item.signature().unwrap()),
            encode_function_signature("myMethod(uint128,string)")
        );
        let event = interface_item("myEvent", &["uint128", "bytes32"]);
        assert_eq!(
            encode_event_signature(&event.signature().unwrap()),
            "0x2236226bdca8de2f2bc9a5be931cb54acc7d73c5a829b22dc2b7e92af174f7d4"
        );
    }

    #[test]
    fn selectors_are_deterministic() {
        assert_eq!(
            derive_method_id("transfer(address,uint128)"),
            derive_method_id("transfer(address,uint128)")
        );
    }

    #[test]
    fn signature_type_extraction() {
        assert_eq!(
            signature_types("transfer(address,uint128)").unwrap(),
            ["address", "uint128"]
        );
        assert_eq!(
            signature_types("nullary()").unwrap(),
            Vec::<String>::new()
        );
        assert!(signature_types("no parens").is_err());
    }

    #[test]
    fn encode_call_concatenates_selector_and_body() {
        let payload = encode_call("set(uint128)", &[5u8.into()]).unwrap();
        assert_eq!(payload.len(), 4 + WORD_BYTE_LEN);
        assert_eq!(payload[..4], derive_method_id("set(uint128)"));
        assert_eq!(payload[4 + WORD_BYTE_LEN - 1], 5);
    }

    #[test]
    fn encode_function_call_builds_hex_payload() {
        let item = interface_item("set", &["uint128"]);
        let call = encode_function_call(&item, &[5u8.into()]).unwrap();
        assert_eq!(
            call,
            format!(
                "0x{}00000000000000000000000000000005",
                crate::utils::bytes_to_hex_str(&derive_method_id("set(uint128)"))
            )
        );
    }
}
