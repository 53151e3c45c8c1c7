/// One input field of a function or event description. Tuple components
/// do not exist in this chain's type catalog, so a field is fully
/// described by its name and type string.
#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct Input {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub indexed: bool,
}
