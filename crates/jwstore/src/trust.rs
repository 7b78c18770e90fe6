//! Pinned trust anchors

use crate::certificate::Certificate;
use crate::error::{Error, Result};
use x509_parser::prelude::*;

/// Apple Root CA - G3, base64-encoded DER
///
/// The App Store signs every `x5c` chain under this root.
pub const APPLE_ROOT_CA_G3: &str = "MIICQzCCAcmgAwIBAgIILcX8iNLFS5UwCgYIKoZIzj0EAwMwZzEbMBkGA1UEAwwSQXBwbGUgUm9vdCBDQSAtIEczMSYwJAYDVQQLDB1BcHBsZSBDZXJ0aWZpY2F0aW9uIEF1dGhvcml0eTETMBEGA1UECgwKQXBwbGUgSW5jLjELMAkGA1UEBhMCVVMwHhcNMTQwNDMwMTgxOTA2WhcNMzkwNDMwMTgxOTA2WjBnMRswGQYDVQQDDBJBcHBsZSBSb290IENBIC0gRzMxJjAkBgNVBAsMHUFwcGxlIENlcnRpZmljYXRpb24gQXV0aG9yaXR5MRMwEQYDVQQKDApBcHBsZSBJbmMuMQswCQYDVQQGEwJVUzB2MBAGByqGSM49AgEGBSuBBAAiA2IABJjpLz1AcqTtkyJygRMc3RCV8cWjTnHcFBbZDuWmBSp3ZHtfTjjTuxxEtX/1H7YyYl3J6YRbTzBPEVoA/VhYDKX1DyxNB0cTddqXl5dvMVztK517IDvYuVTZXpmkOlEKMaNCMEAwHQYDVR0OBBYEFLuw3qFYM4iapIqZ3r6966/ayySrMA8GA1UdEwEB/wQFMAMBAf8wDgYDVR0PAQH/BAQDAgEGMAoGCCqGSM49BAMDA2gAMGUCMQCD6cHEFl4aXTQY2e3v9GwOAEZLuN+yRhHFD/3meoyhpmvOwgPUnPWTxnS4at+qIxUCMG1mihDK1A3UT82NQz60imOlM27jbdoXt2QfyFMm+YhidDkLF1vLUagM6BgD56KyKA==";

/// Set of root certificates that chains must terminate at
///
/// Built once and never mutated; share it across threads by reference or
/// by cloning the owning verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustStore {
    roots: Vec<Certificate>,
}

impl TrustStore {
    /// Create a trust store from caller-supplied roots
    pub fn new(roots: Vec<Certificate>) -> Self {
        Self { roots }
    }

    /// Trust store pinned to the embedded Apple Root CA - G3
    pub fn apple_root_ca_g3() -> Result<Self> {
        Ok(Self::new(Certificate::from_base64(APPLE_ROOT_CA_G3)?))
    }

    /// Trusted roots
    pub fn roots(&self) -> &[Certificate] {
        &self.roots
    }

    /// Find the root that issued `cert`
    ///
    /// A root matches when its subject equals the certificate's issuer and
    /// its public key verifies the certificate's signature.
    pub(crate) fn find_issuer(&self, cert: &X509Certificate<'_>) -> Result<Option<&Certificate>> {
        for root in &self.roots {
            let parsed = root.parsed()?;
            if parsed.subject().as_raw() != cert.issuer().as_raw() {
                continue;
            }
            if cert.verify_signature(Some(parsed.public_key())).is_ok() {
                return Ok(Some(root));
            }
        }

        Ok(None)
    }
}

impl TryFrom<&[&str]> for TrustStore {
    type Error = Error;

    /// Build a trust store from base64-encoded DER roots
    fn try_from(encoded: &[&str]) -> Result<Self> {
        let mut roots = Vec::with_capacity(encoded.len());
        for root in encoded {
            roots.extend(Certificate::from_base64(root)?);
        }
        Ok(Self::new(roots))
    }
}
