use crate::abi::item::Item;
use crate::abi::operation::Operation;
use crate::error::Error;
use serde::de::Deserialize;
use serde::de::Deserializer;
use serde::de::SeqAccess;
use serde::de::Visitor;
use std::fmt;
use std::io;

/// A contract's parsed JSON interface, the list of its functions and
/// events.
#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
    items: Vec<Item>,
}

impl Contract {
    /// Load an interface from a reader over the ABI JSON document.
    pub fn load<T: io::Read>(reader: T) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(From::from)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Look up a function description by name.
    pub fn function(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| {
            item.operation == Operation::Function && item.name.as_deref() == Some(name)
        })
    }

    /// Look up an event description by name.
    pub fn event(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| {
            item.operation == Operation::Event && item.name.as_deref() == Some(name)
        })
    }
}

impl<'de> Deserialize<'de> for Contract {
    fn deserialize<D>(deserializer: D) -> Result<Contract, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ContractVisitor)
    }
}

struct ContractVisitor;

impl<'a> Visitor<'a> for ContractVisitor {
    type Value = Contract;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("valid abi spec file")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'a>,
    {
        let mut result = Contract { items: Vec::new() };
        while let Some(item) = seq.next_element()? {
            result.items.push(item)
        }

        Ok(result)
    }
}

#[test]
fn decode_contract() {
    use crate::abi::input::Input;
    use crate::abi::state_mutability::StateMutability;
    use std::io::BufReader;
    let abi_def = r#"[
  {
    "constant": true,
    "inputs": [
      {
        "name": "",
        "type": "bytes"
      },
      {
        "name": "",
        "type": "bool"
      },
      {
        "name": "",
        "type": "uint128[]"
      }
    ],
    "name": "sam",
    "outputs": [],
    "payable": false,
    "stateMutability": "pure",
    "type": "function"
  },
  {
    "constant": true,
    "inputs": [
      {
        "name": "x",
        "type": "uint32"
      },
      {
        "name": "y",
        "type": "bool"
      }
    ],
    "name": "baz",
    "outputs": [
      {
        "name": "r",
        "type": "bool"
      }
    ],
    "payable": false,
    "stateMutability": "pure",
    "type": "function"
  },
  {
    "inputs": [
      {
        "name": "",
        "type": "bytes3[2]"
      }
    ],
    "name": "bar_defaults",
    "outputs": [],
    "stateMutability": "pure"
  },
  {
    "inputs": [],
    "payable": false,
    "stateMutability": "nonpayable",
    "type": "constructor"
  },
  {
    "anonymous": false,
    "inputs": [
      {
        "indexed": true,
        "name": "a",
        "type": "uint128"
      },
      {
        "indexed": false,
        "name": "b",
        "type": "bytes32"
      }
    ],
    "name": "Transfer",
    "type": "event"
  }
]"#
    .to_owned();

    let contract =
        Contract::load(BufReader::new(abi_def.as_bytes())).expect("Unable to load contract");

    assert_eq!(contract.items().len(), 5);

    let sam = contract.function("sam").unwrap();
    assert_eq!(sam.operation, Operation::Function);
    assert!(sam.constant);
    assert!(!sam.payable);
    assert_eq!(sam.input_types(), ["bytes", "bool", "uint128[]"]);
    assert_eq!(sam.state_mutability, Some(StateMutability::Pure));

    // items without a "type" field default to functions
    let bar = contract.function("bar_defaults").unwrap();
    assert_eq!(bar.operation, Operation::Function);
    assert!(!bar.constant);

    let event = contract.event("Transfer").unwrap();
    assert_eq!(event.operation, Operation::Event);
    assert_eq!(
        event.inputs[0],
        Input {
            name: "a".to_string(),
            type_: "uint128".to_string(),
            indexed: true,
        }
    );
    assert_eq!(event.signature().unwrap(), "Transfer(uint128,bytes32)");

    // constructors are not functions and have no name to look up
    assert!(contract.function("constructor").is_none());
    assert!(contract.event("sam").is_none());
}

#[test]
fn rejects_malformed_interface() {
    use std::io::BufReader;
    let not_an_interface = r#"{"name": "sam"}"#;
    assert!(Contract::load(BufReader::new(not_an_interface.as_bytes())).is_err());
}
