use der::{Tag, Tlv};

use crate::error::{Error, Result};

/*
RFC 5958 - Asymmetric Key Packages

OneAsymmetricKey ::= SEQUENCE {
    version                   Version,
    privateKeyAlgorithm       PrivateKeyAlgorithmIdentifier,
    privateKey                PrivateKey,
    attributes            [0] Attributes OPTIONAL,
    ...,
    [[2: publicKey        [1] PublicKey OPTIONAL ]],
    ...
}
*/

/// An unwrapped PKCS#8 PrivateKeyInfo: the algorithm identifier and the raw
/// inner key bytes, ready for algorithm-specific extraction.
#[derive(Debug, Clone)]
pub(crate) struct PrivateKeyInfo {
    pub(crate) algorithm_oid: String,
    /// Algorithm parameters when they are an OID (the named curve for EC
    /// keys; RSA carries NULL here).
    pub(crate) parameters_oid: Option<String>,
    pub(crate) private_key: Vec<u8>,
}

impl PrivateKeyInfo {
    pub(crate) fn parse(der_bytes: &[u8]) -> Result<PrivateKeyInfo> {
        let root = Tlv::parse(der_bytes)?;
        if root.tag() != Tag::Sequence {
            return Err(Error::ExpectedSequence);
        }
        let elements = root.children()?;

        let version = elements
            .first()
            .ok_or(Error::MissingField("version"))?
            .integer()
            .map_err(|_| Error::ExpectedInteger("version"))?;
        // v1 (RFC 5208) and v2 (RFC 5958 OneAsymmetricKey)
        if !(0..=1).contains(&version) {
            return Err(Error::InvalidVersion(version));
        }

        let algorithm = elements
            .get(1)
            .ok_or(Error::MissingField("privateKeyAlgorithm"))?;
        if algorithm.tag() != Tag::Sequence {
            return Err(Error::ExpectedSequence);
        }
        let algorithm_elements = algorithm.children()?;
        let algorithm_oid = algorithm_elements
            .first()
            .ok_or(Error::MissingField("algorithm"))?
            .object_identifier()?;
        let parameters_oid = algorithm_elements
            .get(1)
            .and_then(|parameters| parameters.object_identifier().ok());

        let private_key = elements
            .get(2)
            .ok_or(Error::MissingField("privateKey"))?
            .octet_string()
            .map_err(|_| Error::ExpectedOctetString)?
            .to_vec();

        Ok(PrivateKeyInfo {
            algorithm_oid,
            parameters_oid,
            private_key,
        })
    }
}
