//! X.509 certificate loading
//!
//! Certificates are kept as owned DER bytes that are known to parse. The
//! borrowed `x509-parser` view is rebuilt on demand, which keeps
//! [`Certificate`] free of lifetimes so it can live inside long-lived
//! trust stores.

use crate::error::{Error, Result};
use crate::limits::MAX_CERTIFICATE_SIZE;
use crate::utils::base64url;
use x509_parser::prelude::*;

/// A decoded X.509 certificate
#[derive(Clone, PartialEq, Eq)]
pub struct Certificate {
    der: Vec<u8>,
}

impl Certificate {
    /// Load a certificate from DER bytes
    ///
    /// Fails if the bytes are not exactly one well-formed certificate.
    pub fn from_der(der: impl Into<Vec<u8>>) -> Result<Self> {
        let der = der.into();
        let (rest, _) = X509Certificate::from_der(&der)
            .map_err(|e| Error::CertificateInvalid(format!("failed to parse DER: {e}")))?;

        if !rest.is_empty() {
            return Err(Error::CertificateInvalid(format!(
                "{} trailing bytes after certificate",
                rest.len()
            )));
        }

        Ok(Self { der })
    }

    /// Load a certificate from a PEM `CERTIFICATE` block
    pub fn from_pem(pem_str: &str) -> Result<Self> {
        let pem_data = ::pem::parse(pem_str)
            .map_err(|e| Error::CertificateInvalid(format!("failed to parse PEM: {e}")))?;

        if pem_data.tag() != "CERTIFICATE" {
            return Err(Error::CertificateInvalid(format!(
                "PEM is not a certificate, got: {}",
                pem_data.tag()
            )));
        }

        Self::from_der(pem_data.into_contents())
    }

    /// Load one or more certificates from standard base64-encoded DER
    ///
    /// This is the encoding used by the JWS `x5c` header (RFC 7515 §4.1.6).
    /// Concatenated DER certificates are split and returned in order.
    pub fn from_base64(encoded: &str) -> Result<Vec<Self>> {
        let der = base64url::decode_standard(encoded, MAX_CERTIFICATE_SIZE)
            .map_err(|e| Error::CertificateInvalid(e.to_string()))?;

        let mut certificates = Vec::new();
        let mut remaining = der.as_slice();
        while !remaining.is_empty() {
            let (rest, _) = X509Certificate::from_der(remaining)
                .map_err(|e| Error::CertificateInvalid(format!("failed to parse DER: {e}")))?;
            let consumed = remaining.len() - rest.len();
            certificates.push(Self {
                der: remaining[..consumed].to_vec(),
            });
            remaining = rest;
        }

        if certificates.is_empty() {
            return Err(Error::CertificateInvalid("no certificate data".into()));
        }

        Ok(certificates)
    }

    /// Raw DER bytes
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    /// Subject distinguished name in RFC 4514 form
    pub fn subject(&self) -> Result<String> {
        Ok(self.parsed()?.subject().to_string())
    }

    /// Issuer distinguished name in RFC 4514 form
    pub fn issuer(&self) -> Result<String> {
        Ok(self.parsed()?.issuer().to_string())
    }

    /// Validity window as unix seconds `(not_before, not_after)`
    pub fn validity(&self) -> Result<(i64, i64)> {
        let parsed = self.parsed()?;
        let validity = parsed.validity();
        Ok((
            validity.not_before.timestamp(),
            validity.not_after.timestamp(),
        ))
    }

    /// Borrowed `x509-parser` view of the certificate
    pub(crate) fn parsed(&self) -> Result<X509Certificate<'_>> {
        X509Certificate::from_der(&self.der)
            .map(|(_, cert)| cert)
            .map_err(|e| Error::CertificateInvalid(format!("failed to parse DER: {e}")))
    }
}

impl std::fmt::Debug for Certificate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subject = self.subject().unwrap_or_else(|_| "<unparsable>".into());
        f.debug_struct("Certificate")
            .field("subject", &subject)
            .field("der_len", &self.der.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trust::APPLE_ROOT_CA_G3;
    use base64::{Engine, engine::general_purpose::STANDARD};

    #[test]
    fn test_from_base64_apple_root() {
        let certs = Certificate::from_base64(APPLE_ROOT_CA_G3).unwrap();
        assert_eq!(certs.len(), 1);

        let root = &certs[0];
        assert!(root.subject().unwrap().contains("Apple Root CA - G3"));
        assert_eq!(root.subject().unwrap(), root.issuer().unwrap());

        let (not_before, not_after) = root.validity().unwrap();
        assert_eq!(not_before, 1_398_881_946); // 2014-04-30T18:19:06Z
        assert_eq!(not_after, 2_187_800_346); // 2039-04-30T18:19:06Z
    }

    #[test]
    fn test_from_base64_concatenated() {
        let der = STANDARD.decode(APPLE_ROOT_CA_G3).unwrap();
        let doubled = [der.clone(), der].concat();

        let certs = Certificate::from_base64(&STANDARD.encode(doubled)).unwrap();
        assert_eq!(certs.len(), 2);
        assert_eq!(certs[0], certs[1]);
    }

    #[test]
    fn test_from_base64_invalid() {
        assert!(matches!(
            Certificate::from_base64("not base64!"),
            Err(Error::CertificateInvalid(_))
        ));
        assert!(matches!(
            Certificate::from_base64(&STANDARD.encode(b"not a certificate")),
            Err(Error::CertificateInvalid(_))
        ));
        assert!(matches!(
            Certificate::from_base64(""),
            Err(Error::CertificateInvalid(_))
        ));
    }

    #[test]
    fn test_from_der_trailing_bytes() {
        let mut der = STANDARD.decode(APPLE_ROOT_CA_G3).unwrap();
        assert!(Certificate::from_der(der.clone()).is_ok());

        der.push(0);
        assert!(matches!(
            Certificate::from_der(der),
            Err(Error::CertificateInvalid(_))
        ));
    }

    #[test]
    fn test_from_pem() {
        let der = STANDARD.decode(APPLE_ROOT_CA_G3).unwrap();
        let pem_str = ::pem::encode(&::pem::Pem::new("CERTIFICATE", der.clone()));

        let cert = Certificate::from_pem(&pem_str).unwrap();
        assert_eq!(cert.as_der(), der.as_slice());

        let wrong_tag = ::pem::encode(&::pem::Pem::new("PRIVATE KEY", der));
        assert!(matches!(
            Certificate::from_pem(&wrong_tag),
            Err(Error::CertificateInvalid(_))
        ));
    }
}
