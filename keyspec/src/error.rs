use thiserror::Error;

/// Errors raised while extracting a structured key spec from decoded bytes.
#[derive(Debug, Error)]
pub enum Error {
    /// DER-level parsing error
    #[error("DER error: {0}")]
    Der(#[from] der::Error),

    /// Expected a SEQUENCE element but got something else
    #[error("expected SEQUENCE")]
    ExpectedSequence,

    /// Expected an INTEGER element but got something else
    #[error("expected INTEGER for {0}")]
    ExpectedInteger(&'static str),

    /// Expected an OCTET STRING element but got something else
    #[error("expected OCTET STRING")]
    ExpectedOctetString,

    /// The structure is missing a required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The structure's version field holds an unexpected value
    #[error("invalid version: {0}")]
    InvalidVersion(i64),

    /// The PKCS#8 algorithm identifier names an algorithm with no strategy
    #[error("unsupported key algorithm OID: {0}")]
    UnsupportedAlgorithm(String),

    /// The PEM item does not carry private key material
    #[error("not a private key item: {0}")]
    NotAPrivateKey(String),

    /// Encrypted PKCS#8 keys must be decrypted before extraction
    #[error("encrypted private keys are not supported")]
    EncryptedKeyUnsupported,

    /// The bytes parse as neither PKCS#8 nor the algorithm's raw format
    #[error("unrecognized private key structure (pkcs8: {pkcs8}; raw: {raw})")]
    UnrecognizedKeyFormat { pkcs8: Box<Error>, raw: Box<Error> },
}

pub type Result<T> = std::result::Result<T, Error>;
