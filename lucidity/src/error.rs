use std::fmt;
use std::num::ParseIntError;
use std::str::Utf8Error;

/// Custom error implementation that describes possible
/// error states.
///
/// This is shared by a whole crate. The ABI variants carry the index and
/// type name of the parameter that failed so a mismatch between client
/// and contract can be diagnosed from the error alone.
#[derive(Debug)]
pub enum Error {
    /// A type name did not resolve to one of the known base types
    UnsupportedType(String),
    /// Fewer (or more) parameters than type names were supplied
    ArityMismatch { types: usize, params: usize },
    /// A numeric value does not fit in one ABI word
    EncodingOverflow { index: usize, type_name: String },
    /// Decoding would read past the end of the supplied byte string
    TruncatedInput {
        index: usize,
        type_name: String,
        needed: usize,
        have: usize,
    },
    /// A decoded length word is inconsistent with the remaining buffer
    MalformedLengthPrefix {
        index: usize,
        type_name: String,
        length: usize,
        remaining: usize,
    },
    InvalidCallError(String),
    InvalidAddressLength { got: usize, expected: usize },
    InvalidChecksum,
    InvalidPrivKeyLength { got: usize, expected: usize },
    /// The public half of a 64 byte keypair did not match its seed
    MismatchedKeyPair,
    InvalidSignatureLength { got: usize, expected: usize },
    VerifySignature(ed25519_dalek::SignatureError),
    InvalidUtf8(Utf8Error),
    InvalidHex(ParseIntError),
    ParseInterface(serde_json::Error),
    DeserializeRlp,
    NoSignature,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedType(name) => write!(f, "Unsupported ABI type {name}"),
            Error::ArityMismatch { types, params } => {
                write!(f, "Got {params} parameters for {types} types")
            }
            Error::EncodingOverflow { index, type_name } => write!(
                f,
                "Parameter {index} does not fit in one {type_name} word"
            ),
            Error::TruncatedInput {
                index,
                type_name,
                needed,
                have,
            } => write!(
                f,
                "Parameter {index} ({type_name}) needs {needed} bytes but only {have} were supplied"
            ),
            Error::MalformedLengthPrefix {
                index,
                type_name,
                length,
                remaining,
            } => write!(
                f,
                "Parameter {index} ({type_name}) claims length {length} with {remaining} bytes remaining"
            ),
            Error::InvalidCallError(val) => write!(f, "Invalid function call {val}"),
            Error::InvalidAddressLength { got, expected } => {
                write!(f, "Invalid address length, got {got}, expected {expected}")
            }
            Error::InvalidChecksum => write!(f, "Invalid checksum cased address"),
            Error::InvalidPrivKeyLength { got, expected } => write!(
                f,
                "Invalid private key length, got {got} expected {expected}"
            ),
            Error::MismatchedKeyPair => {
                write!(f, "Public key half does not belong to the seed")
            }
            Error::InvalidSignatureLength { got, expected } => write!(
                f,
                "Invalid signature length, got {got} expected {expected}"
            ),
            Error::VerifySignature(_) => write!(f, "Could not verify signature"),
            Error::InvalidUtf8(_) => write!(f, "Failed to parse bytes as utf8"),
            Error::InvalidHex(_) => write!(f, "Invalid hex character"),
            Error::ParseInterface(_) => write!(f, "Failed to parse contract interface"),
            Error::DeserializeRlp => write!(f, "failed to deserialize using RLP-encoding"),
            Error::NoSignature => {
                write!(f, "This transaction does not have a signature attached")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::VerifySignature(inner) => Some(inner),
            Error::InvalidUtf8(inner) => Some(inner),
            Error::InvalidHex(inner) => Some(inner),
            Error::ParseInterface(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<Utf8Error> for Error {
    fn from(e: Utf8Error) -> Self {
        Error::InvalidUtf8(e)
    }
}

impl From<ParseIntError> for Error {
    fn from(e: ParseIntError) -> Self {
        Error::InvalidHex(e)
    }
}

impl From<ed25519_dalek::SignatureError> for Error {
    fn from(e: ed25519_dalek::SignatureError) -> Self {
        Error::VerifySignature(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::ParseInterface(e)
    }
}
