use crate::abi::input::Input;
use crate::abi::operation::Operation;
use crate::abi::output::Output;
use crate::abi::state_mutability::StateMutability;
use crate::error::Error;

/// One entry of a contract's JSON interface: a function, event,
/// constructor or fallback description.
#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct Item {
    #[serde(rename = "type", default)]
    pub operation: Operation,
    pub name: Option<String>,
    #[serde(default)]
    pub payable: bool,
    #[serde(default)]
    pub constant: bool,
    #[serde(default = "Vec::new")]
    pub inputs: Vec<Input>,
    pub outputs: Option<Vec<Output>>,
    #[serde(rename = "stateMutability")]
    pub state_mutability: Option<StateMutability>,
}

impl Item {
    /// The canonical signature string `name(type1,type2,...)` selectors
    /// are derived from. Constructors and fallbacks have no name and no
    /// signature.
    pub fn signature(&self) -> Result<String, Error> {
        let name = self
            .name
            .as_ref()
            .ok_or_else(|| Error::InvalidCallError("item has no name".to_string()))?;
        let types: Vec<&str> = self.inputs.iter().map(|i| i.type_.as_str()).collect();
        Ok(format!("{}({})", name, types.join(",")))
    }

    /// The bare type names of the inputs, the shape the parameter codec
    /// takes.
    pub fn input_types(&self) -> Vec<String> {
        self.inputs.iter().map(|i| i.type_.clone()).collect()
    }
}

#[test]
fn builds_canonical_signature() {
    let item = Item {
        operation: Operation::Function,
        name: Some("myMethod".to_string()),
        payable: false,
        constant: false,
        inputs: vec![
            Input {
                name: "myNumber".to_string(),
                type_: "uint128".to_string(),
                indexed: false,
            },
            Input {
                name: "myString".to_string(),
                type_: "string".to_string(),
                indexed: false,
            },
        ],
        outputs: None,
        state_mutability: None,
    };
    assert_eq!(item.signature().unwrap(), "myMethod(uint128,string)");
}

#[test]
fn unnamed_item_has_no_signature() {
    let item = Item {
        operation: Operation::Constructor,
        name: None,
        payable: false,
        constant: false,
        inputs: vec![],
        outputs: None,
        state_mutability: None,
    };
    assert!(item.signature().is_err());
}
