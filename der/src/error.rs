use thiserror::Error;

use crate::Tag;

/// Errors raised while parsing or reading DER-encoded data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The input ended before a complete TLV could be read.
    #[error("truncated DER input")]
    Truncated,

    /// Bytes remain after the top-level TLV.
    #[error("trailing bytes after DER object")]
    TrailingData,

    /// Constructed elements nest deeper than the parser accepts.
    #[error("nesting depth limit exceeded")]
    NestingTooDeep,

    /// A constructed element (SEQUENCE, SET, constructed context tag) was
    /// required.
    #[error("expected a constructed element")]
    ExpectedConstructed,

    /// A primitive element was required.
    #[error("expected a primitive element")]
    ExpectedPrimitive,

    /// The element carries a different tag than the caller asked for.
    #[error("expected {expected}, got {actual:?}")]
    UnexpectedTag { expected: &'static str, actual: Tag },

    /// The INTEGER value does not fit the requested native type.
    #[error("integer value out of range")]
    IntegerOutOfRange,

    /// Malformed OBJECT IDENTIFIER encoding.
    #[error("malformed object identifier")]
    InvalidObjectIdentifier,

    /// Malformed BIT STRING encoding.
    #[error("malformed bit string")]
    InvalidBitString,
}

pub type Result<T> = std::result::Result<T, Error>;
