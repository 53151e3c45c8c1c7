use crate::constants::{ADDRESS_BYTE_LEN, MAX_INT_SIZE, WORD_BYTE_LEN};
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// The closed catalog of ABI base types.
///
/// Where the reference tooling dispatched through a string keyed lookup
/// table, this enum makes an unknown type unrepresentable past the parse
/// boundary and lets the compiler check that every codec handles every
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Bool,
    Uint,
    Int,
    Fixed,
    Ufixed,
    Address,
    Bytes,
    String,
}

impl BaseType {
    /// Scalars pad on the left except for payload carrying types which
    /// pad on the right.
    pub fn pads_left(&self) -> bool {
        !matches!(self, BaseType::Bytes | BaseType::String)
    }

    /// Canonical encoded width of one element of this type. Addresses are
    /// the one scalar wider than a word.
    pub fn element_byte_length(&self) -> usize {
        match self {
            BaseType::Address => ADDRESS_BYTE_LEN,
            BaseType::Bool
            | BaseType::Uint
            | BaseType::Int
            | BaseType::Fixed
            | BaseType::Ufixed
            | BaseType::Bytes
            | BaseType::String => WORD_BYTE_LEN,
        }
    }

    /// True for types whose encoded length is not fixed by the type name
    /// alone and therefore travel with a length word.
    pub fn is_inherently_dynamic(&self) -> bool {
        matches!(self, BaseType::Bytes | BaseType::String)
    }
}

impl FromStr for BaseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bool" => Ok(BaseType::Bool),
            "uint" => Ok(BaseType::Uint),
            "int" => Ok(BaseType::Int),
            "fixed" => Ok(BaseType::Fixed),
            "ufixed" => Ok(BaseType::Ufixed),
            "address" => Ok(BaseType::Address),
            "bytes" => Ok(BaseType::Bytes),
            "string" => Ok(BaseType::String),
            unknown => Err(Error::UnsupportedType(unknown.to_string())),
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            BaseType::Bool => "bool",
            BaseType::Uint => "uint",
            BaseType::Int => "int",
            BaseType::Fixed => "fixed",
            BaseType::Ufixed => "ufixed",
            BaseType::Address => "address",
            BaseType::Bytes => "bytes",
            BaseType::String => "string",
        };
        write!(f, "{name}")
    }
}

/// One array suffix of a type name. A missing length means the dimension
/// is dynamically sized (`T[]` rather than `T[N]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    pub index: usize,
    pub length: Option<usize>,
}

/// The parsed structural form of a type name such as `uint128`,
/// `bytes32` or `bool[3]`, built once per encode or decode call and
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: String,
    base: BaseType,
    declared_size: Option<usize>,
    dimensions: Vec<Dimension>,
}

impl TypeDescriptor {
    /// Parse a type name matching `base` `size?` `(\[digits?\])*`.
    pub fn parse(name: &str) -> Result<TypeDescriptor, Error> {
        let unsupported = || Error::UnsupportedType(name.to_string());

        let base_end = name
            .find(|c: char| !c.is_ascii_lowercase())
            .unwrap_or(name.len());
        let base: BaseType = name[..base_end]
            .parse()
            .map_err(|_| unsupported())?;
        let mut rest = &name[base_end..];

        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let declared_size = if digits_end > 0 {
            Some(rest[..digits_end].parse::<usize>().map_err(|_| unsupported())?)
        } else {
            None
        };
        rest = &rest[digits_end..];

        if let (Some(bits), BaseType::Uint | BaseType::Int | BaseType::Fixed | BaseType::Ufixed) =
            (declared_size, base)
        {
            // integers wider than one word cannot exist on this chain
            if bits > MAX_INT_SIZE || bits == 0 {
                return Err(unsupported());
            }
        }

        // the fractional part of a fixed point name, fixed128x18
        if let (BaseType::Fixed | BaseType::Ufixed, Some(stripped)) = (base, rest.strip_prefix('x'))
        {
            let frac_end = stripped
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(stripped.len());
            if frac_end == 0 {
                return Err(unsupported());
            }
            rest = &stripped[frac_end..];
        }

        let mut dimensions = Vec::new();
        while !rest.is_empty() {
            let stripped = rest.strip_prefix('[').ok_or_else(unsupported)?;
            let close = stripped.find(']').ok_or_else(unsupported)?;
            let inner = &stripped[..close];
            let length = if inner.is_empty() {
                None
            } else {
                Some(inner.parse::<usize>().map_err(|_| unsupported())?)
            };
            dimensions.push(Dimension {
                index: dimensions.len(),
                length,
            });
            rest = &stripped[close + 1..];
        }

        Ok(TypeDescriptor {
            name: name.to_string(),
            base,
            declared_size,
            dimensions,
        })
    }

    /// The type name this descriptor was parsed from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_type(&self) -> BaseType {
        self.base
    }

    /// The bit width (byte width for `bytes`) declared in the name, if
    /// any. Recorded for diagnostics, every scalar still encodes at the
    /// canonical element width.
    pub fn declared_size(&self) -> Option<usize> {
        self.declared_size
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn has_dimensions(&self) -> bool {
        !self.dimensions.is_empty()
    }

    /// True when any array dimension lacks a fixed length.
    pub fn has_dynamic_dimensions(&self) -> bool {
        self.dimensions.iter().any(|d| d.length.is_none())
    }

    /// True when the encoded length is not determined by the name alone,
    /// either through the base type or through a dynamic dimension.
    pub fn is_dynamic(&self) -> bool {
        self.base.is_inherently_dynamic() || self.has_dynamic_dimensions()
    }

    pub fn element_byte_length(&self) -> usize {
        self.base.element_byte_length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_uint() {
        let d = TypeDescriptor::parse("uint128").unwrap();
        assert_eq!(d.base_type(), BaseType::Uint);
        assert_eq!(d.declared_size(), Some(128));
        assert!(!d.has_dimensions());
        assert!(!d.is_dynamic());
        assert_eq!(d.element_byte_length(), WORD_BYTE_LEN);
    }

    #[test]
    fn parse_unsized_int() {
        let d = TypeDescriptor::parse("int").unwrap();
        assert_eq!(d.base_type(), BaseType::Int);
        assert_eq!(d.declared_size(), None);
    }

    #[test]
    fn parse_address() {
        let d = TypeDescriptor::parse("address").unwrap();
        assert_eq!(d.base_type(), BaseType::Address);
        assert_eq!(d.element_byte_length(), ADDRESS_BYTE_LEN);
        assert!(!d.is_dynamic());
    }

    #[test]
    fn parse_fixed_bytes() {
        let d = TypeDescriptor::parse("bytes32").unwrap();
        assert_eq!(d.base_type(), BaseType::Bytes);
        assert_eq!(d.declared_size(), Some(32));
        // bytes always travels with a length word
        assert!(d.is_dynamic());
        assert!(!d.has_dynamic_dimensions());
    }

    #[test]
    fn parse_fixed_array() {
        let d = TypeDescriptor::parse("bool[4]").unwrap();
        assert_eq!(d.base_type(), BaseType::Bool);
        assert_eq!(
            d.dimensions(),
            [Dimension {
                index: 0,
                length: Some(4)
            }]
        );
        assert!(d.has_dimensions());
        assert!(!d.has_dynamic_dimensions());
        assert!(!d.is_dynamic());
    }

    #[test]
    fn parse_dynamic_array() {
        let d = TypeDescriptor::parse("bytes[]").unwrap();
        assert_eq!(d.base_type(), BaseType::Bytes);
        assert_eq!(d.dimensions(), [Dimension { index: 0, length: None }]);
        assert!(d.has_dynamic_dimensions());
        assert!(d.is_dynamic());
    }

    #[test]
    fn parse_nested_dimensions() {
        let d = TypeDescriptor::parse("uint128[3][]").unwrap();
        assert_eq!(
            d.dimensions(),
            [
                Dimension {
                    index: 0,
                    length: Some(3)
                },
                Dimension {
                    index: 1,
                    length: None
                }
            ]
        );
        assert!(d.has_dynamic_dimensions());
    }

    #[test]
    fn parse_fixed_point_with_fraction() {
        let d = TypeDescriptor::parse("fixed128x18").unwrap();
        assert_eq!(d.base_type(), BaseType::Fixed);
        assert_eq!(d.declared_size(), Some(128));
    }

    #[test]
    fn pad_directions() {
        // numeric, boolean and address words pad on the left, payload
        // carrying types pad on the right
        assert!(BaseType::Uint.pads_left());
        assert!(BaseType::Int.pads_left());
        assert!(BaseType::Bool.pads_left());
        assert!(BaseType::Address.pads_left());
        assert!(!BaseType::Bytes.pads_left());
        assert!(!BaseType::String.pads_left());
    }

    #[test]
    fn rejects_unknown_base() {
        match TypeDescriptor::parse("tuple") {
            Err(Error::UnsupportedType(name)) => assert_eq!(name, "tuple"),
            _ => panic!(),
        }
    }

    #[test]
    fn rejects_oversized_integers() {
        // a 256 bit integer does not fit this chain's word
        assert!(TypeDescriptor::parse("uint256").is_err());
        assert!(TypeDescriptor::parse("int256").is_err());
        assert!(TypeDescriptor::parse("uint128").is_ok());
    }

    #[test]
    fn rejects_malformed_dimensions() {
        assert!(TypeDescriptor::parse("uint128[").is_err());
        assert!(TypeDescriptor::parse("uint128[2").is_err());
        assert!(TypeDescriptor::parse("uint128[a]").is_err());
        assert!(TypeDescriptor::parse("uint128]2[").is_err());
    }
}
