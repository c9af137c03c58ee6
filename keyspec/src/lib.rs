//! Structured private key extraction.
//!
//! Decoded key bytes (from the `pem` crate or raw DER) are turned into
//! algorithm-specific key specifications: [`RsaKeySpec`] for PKCS#1/PKCS#8
//! RSA material and [`EcKeySpec`] for SEC1/PKCS#8 EC material. Callers that
//! only know the algorithm by name go through [`PrivateKeyFactory`].

pub mod ec;
pub mod error;
mod pkcs8;
pub mod rsa;

pub use ec::EcKeySpec;
pub use error::{Error, Result};
pub use rsa::RsaKeySpec;

use pem::{PemItem, PemItemType};

use crate::pkcs8::PrivateKeyInfo;

/// Structured private key material of any supported algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySpec {
    Rsa(RsaKeySpec),
    Ec(EcKeySpec),
}

impl KeySpec {
    pub fn key_type(&self) -> PrivateKeyType {
        match self {
            KeySpec::Rsa(_) => PrivateKeyType::Rsa,
            KeySpec::Ec(_) => PrivateKeyType::Ec,
        }
    }

    /// Key size in bits.
    pub fn key_size(&self) -> u32 {
        match self {
            KeySpec::Rsa(spec) => spec.key_size(),
            KeySpec::Ec(spec) => spec.key_size(),
        }
    }

    /// Parses a PKCS#8 PrivateKeyInfo, dispatching on the algorithm OID.
    pub fn from_pkcs8_der(der_bytes: &[u8]) -> Result<KeySpec> {
        let info = PrivateKeyInfo::parse(der_bytes)?;
        match info.algorithm_oid.as_str() {
            rsa::OID_RSA_ENCRYPTION => {
                RsaKeySpec::from_pkcs1_der(&info.private_key).map(KeySpec::Rsa)
            }
            ec::OID_EC_PUBLIC_KEY => {
                EcKeySpec::from_sec1_with_curve(&info.private_key, info.parameters_oid)
                    .map(KeySpec::Ec)
            }
            _ => Err(Error::UnsupportedAlgorithm(info.algorithm_oid)),
        }
    }
}

impl TryFrom<&PemItem> for KeySpec {
    type Error = Error;

    /// Extracts the key spec matching the item's classified type.
    fn try_from(item: &PemItem) -> Result<KeySpec> {
        match item.item_type() {
            PemItemType::RsaPrivateKey => {
                RsaKeySpec::from_pkcs1_der(item.content()).map(KeySpec::Rsa)
            }
            PemItemType::EcPrivateKey => {
                EcKeySpec::from_sec1_der(item.content()).map(KeySpec::Ec)
            }
            PemItemType::PrivateKey => KeySpec::from_pkcs8_der(item.content()),
            PemItemType::EncryptedPrivateKey => Err(Error::EncryptedKeyUnsupported),
            other => Err(Error::NotAPrivateKey(other.to_string())),
        }
    }
}

/// The closed set of supported private key algorithms. Each variant carries
/// its declared name and its extraction behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateKeyType {
    Rsa,
    Ec,
}

impl PrivateKeyType {
    pub const ALL: [PrivateKeyType; 2] = [PrivateKeyType::Rsa, PrivateKeyType::Ec];

    pub fn name(&self) -> &'static str {
        match self {
            PrivateKeyType::Rsa => "RSA",
            PrivateKeyType::Ec => "EC",
        }
    }

    /// Extracts this algorithm's key spec from decoded bytes, accepting both
    /// the PKCS#8 envelope and the algorithm's raw framing.
    pub fn extract(&self, der_bytes: &[u8]) -> Result<KeySpec> {
        match self {
            PrivateKeyType::Rsa => RsaKeySpec::from_der(der_bytes).map(KeySpec::Rsa),
            PrivateKeyType::Ec => EcKeySpec::from_der(der_bytes).map(KeySpec::Ec),
        }
    }
}

impl std::fmt::Display for PrivateKeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Selects a [`PrivateKeyType`] by its declared name.
pub struct PrivateKeyFactory;

impl PrivateKeyFactory {
    /// Case-insensitive name match against the supported algorithms, first
    /// match wins.
    pub fn create(key_type: &str) -> Option<PrivateKeyType> {
        PrivateKeyType::ALL
            .into_iter()
            .find(|candidate| candidate.name().eq_ignore_ascii_case(key_type))
    }

    pub fn is_type_supported(key_type: &str) -> bool {
        Self::create(key_type).is_some()
    }
}

#[cfg(test)]
mod tests {
    use pem::{PemObject, PemReader};
    use rstest::rstest;

    use super::*;
    use crate::ec::tests::{EC_P256_PKCS8, EC_P256_SEC1};
    use crate::rsa::tests::{RSA_2048_PKCS1, RSA_2048_PKCS8};

    const TEST_CERT: &str = r"-----BEGIN CERTIFICATE-----
MIICLDCCAdKgAwIBAgIBADAKBggqhkjOPQQDAjB9MQswCQYDVQQGEwJCRTEPMA0G
A1UEChMGR251VExTMSUwIwYDVQQLExxHbnVUTFMgY2VydGlmaWNhdGUgYXV0aG9y
aXR5MQ8wDQYDVQQIEwZMZXV2ZW4xJTAjBgNVBAMTHEdudVRMUyBjZXJ0aWZpY2F0
ZSBhdXRob3JpdHkwHhcNMTEwNTIzMjAzODIxWhcNMTIxMjIyMDc0MTUxWjB9MQsw
CQYDVQQGEwJCRTEPMA0GA1UEChMGR251VExTMSUwIwYDVQQLExxHbnVUTFMgY2Vy
dGlmaWNhdGUgYXV0aG9yaXR5MQ8wDQYDVQQIEwZMZXV2ZW4xJTAjBgNVBAMTHEdu
dVRMUyBjZXJ0aWZpY2F0ZSBhdXRob3JpdHkwWTATBgcqhkjOPQIBBggqhkjOPQMB
BwNCAARS2I0jiuNn14Y2sSALCX3IybqiIJUvxUpj+oNfzngvj/Niyv2394BWnW4X
uQ4RTEiywK87WRcWMGgJB5kX/t2no0MwQTAPBgNVHRMBAf8EBTADAQH/MA8GA1Ud
DwEB/wQFAwMHBgAwHQYDVR0OBBYEFPC0gf6YEr+1KLlkQAPLzB9mTigDMAoGCCqG
SM49BAMCA0gAMEUCIDGuwD1KPyG+hRf88MeyMQcqOFZD0TbVleF+UsAGQ4enAiEA
l4wOuDwKQa+upc8GftXE2C//4mKANBC6It01gUaTIpo=
-----END CERTIFICATE-----";

    #[rstest]
    #[case("RSA", Some(PrivateKeyType::Rsa))]
    #[case("rsa", Some(PrivateKeyType::Rsa))]
    #[case("Rsa", Some(PrivateKeyType::Rsa))]
    #[case("EC", Some(PrivateKeyType::Ec))]
    #[case("ec", Some(PrivateKeyType::Ec))]
    #[case("unknown", None)]
    #[case("", None)]
    #[case("ECDSA", None)]
    fn test_factory_create(#[case] name: &str, #[case] expected: Option<PrivateKeyType>) {
        assert_eq!(PrivateKeyFactory::create(name), expected);
        assert_eq!(PrivateKeyFactory::is_type_supported(name), expected.is_some());
    }

    #[test]
    fn test_factory_create_is_case_insensitively_stable() {
        assert_eq!(
            PrivateKeyFactory::create("RSA"),
            PrivateKeyFactory::create("rsa")
        );
    }

    #[rstest]
    #[case::rsa_pkcs1("RSA", RSA_2048_PKCS1, 2048)]
    #[case::rsa_pkcs8("RSA", RSA_2048_PKCS8, 2048)]
    #[case::ec_sec1("EC", EC_P256_SEC1, 256)]
    #[case::ec_pkcs8("EC", EC_P256_PKCS8, 256)]
    fn test_extract(#[case] name: &str, #[case] pem_str: &str, #[case] bits: u32) {
        let object = PemObject::from_key(pem_str).unwrap();
        let key_type = PrivateKeyFactory::create(name).unwrap();

        let spec = key_type.extract(object.content()).unwrap();
        assert_eq!(spec.key_type().name(), name);
        assert_eq!(spec.key_size(), bits);
    }

    #[test]
    fn test_extract_with_wrong_algorithm() {
        let object = PemObject::from_key(EC_P256_SEC1).unwrap();
        assert!(matches!(
            PrivateKeyType::Rsa.extract(object.content()),
            Err(Error::UnrecognizedKeyFormat { .. })
        ));
    }

    #[rstest]
    #[case::rsa_pkcs1(RSA_2048_PKCS1, PrivateKeyType::Rsa)]
    #[case::rsa_pkcs8(RSA_2048_PKCS8, PrivateKeyType::Rsa)]
    #[case::ec_sec1(EC_P256_SEC1, PrivateKeyType::Ec)]
    #[case::ec_pkcs8(EC_P256_PKCS8, PrivateKeyType::Ec)]
    fn test_try_from_pem_item(#[case] pem_str: &str, #[case] expected: PrivateKeyType) {
        let item: PemItem = pem_str.parse().unwrap();
        let spec = KeySpec::try_from(&item).unwrap();
        assert_eq!(spec.key_type(), expected);
    }

    #[test]
    fn test_try_from_rejects_certificate() {
        let item: PemItem = TEST_CERT.parse().unwrap();
        assert!(matches!(
            KeySpec::try_from(&item),
            Err(Error::NotAPrivateKey(name)) if name == "CERTIFICATE"
        ));
    }

    #[test]
    fn test_from_pkcs8_rejects_unknown_algorithm() {
        // PrivateKeyInfo with algorithm OID 1.2.3.4 and an empty key.
        let bytes = [
            0x30, 0x0c, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2a, 0x03, 0x04, 0x04, 0x00,
        ];
        assert!(matches!(
            KeySpec::from_pkcs8_der(&bytes),
            Err(Error::UnsupportedAlgorithm(oid)) if oid == "1.2.3.4"
        ));
    }

    #[test]
    fn test_bundle_to_key_specs() {
        let bundle = format!("{TEST_CERT}\n{RSA_2048_PKCS1}\n{EC_P256_PKCS8}\n");
        let items = PemReader::parse(Some(bundle.as_str())).unwrap();
        assert_eq!(items.len(), 3);

        let specs: Vec<KeySpec> = items
            .iter()
            .filter(|item| item.item_type().is_private_key())
            .map(|item| KeySpec::try_from(item).unwrap())
            .collect();

        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].key_type(), PrivateKeyType::Rsa);
        assert_eq!(specs[1].key_type(), PrivateKeyType::Ec);
    }
}
