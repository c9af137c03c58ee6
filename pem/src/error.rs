use base64::DecodeError;
use thiserror::Error;

/// Errors raised while locating, classifying, or decoding PEM blocks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The first line of a block matches none of the enumerated markers.
    #[error("unknown PEM type in block header: {0:?}")]
    UnknownPemType(String),

    /// The base64 body between the boundaries failed to decode.
    #[error("invalid base64 body: {0}")]
    InvalidEncoding(#[from] DecodeError),

    /// No private-key-shaped block was found in the input text.
    #[error("no private key block found")]
    KeyNotFound,

    /// The input is neither PEM-framed nor plausibly DER.
    #[error("unrecognized key material format")]
    UnrecognizedFormat,
}

pub type Result<T> = std::result::Result<T, Error>;
