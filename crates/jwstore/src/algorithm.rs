//! Algorithm support for signed data verification
use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;

use aws_lc_rs::signature::{self, UnparsedPublicKey};

/// Named elliptic curve of a verifying key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    P256,
    P384,
    P521,
}

impl Curve {
    /// Identify the curve from an uncompressed SEC1 point (`0x04 || X || Y`)
    pub(crate) fn from_uncompressed_point(point: &[u8]) -> Option<Self> {
        match (point.first(), point.len()) {
            (Some(0x04), 65) => Some(Curve::P256),
            (Some(0x04), 97) => Some(Curve::P384),
            (Some(0x04), 133) => Some(Curve::P521),
            _ => None,
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
        }
    }
}

impl std::fmt::Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Elliptic-curve public key taken from a validated leaf certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyingKey {
    curve: Curve,
    point: Vec<u8>,
}

impl VerifyingKey {
    /// Build a key from an uncompressed SEC1 point
    pub fn from_uncompressed_point(point: &[u8]) -> Result<Self> {
        let curve = Curve::from_uncompressed_point(point).ok_or_else(|| {
            Error::UnsupportedKeyType(format!(
                "expected an uncompressed P-256, P-384 or P-521 point, found {} bytes",
                point.len()
            ))
        })?;

        Ok(Self {
            curve,
            point: point.to_vec(),
        })
    }

    /// Curve the key lives on
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Uncompressed SEC1 point bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.point
    }
}

/// Algorithm identifier from the JWS header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmType {
    ES256,
    ES384,
    ES512,
}

impl AlgorithmType {
    pub(crate) fn from_str(s: &str) -> Result<Self> {
        // Validate algorithm string length before parsing to prevent DoS
        if s.len() > MAX_ALG_LENGTH {
            return Err(Error::AlgorithmUnsupported(format!(
                "Algorithm string too long: {} bytes (maximum: {} bytes)",
                s.len(),
                MAX_ALG_LENGTH
            )));
        }

        match s {
            "none" => Err(Error::AlgorithmNoneRejected),
            "ES256" => Ok(AlgorithmType::ES256),
            "ES384" => Ok(AlgorithmType::ES384),
            "ES512" => Ok(AlgorithmType::ES512),
            _ => Err(Error::AlgorithmUnsupported(s.into())),
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmType::ES256 => "ES256",
            AlgorithmType::ES384 => "ES384",
            AlgorithmType::ES512 => "ES512",
        }
    }

    /// Curve a key must be on to verify this algorithm
    pub const fn curve(&self) -> Curve {
        match self {
            AlgorithmType::ES256 => Curve::P256,
            AlgorithmType::ES384 => Curve::P384,
            AlgorithmType::ES512 => Curve::P521,
        }
    }

    /// Get the verification algorithm for signature verification
    ///
    /// Note: JWS ECDSA signatures use IEEE P1363 format (fixed-length R||S),
    /// not ASN.1 DER encoding, as per RFC 7518 Section 3.4.
    fn verification_algorithm(&self) -> &'static dyn signature::VerificationAlgorithm {
        match self {
            AlgorithmType::ES256 => &signature::ECDSA_P256_SHA256_FIXED,
            AlgorithmType::ES384 => &signature::ECDSA_P384_SHA384_FIXED,
            AlgorithmType::ES512 => &signature::ECDSA_P521_SHA512_FIXED,
        }
    }

    /// Verify a signature using the algorithm
    ///
    /// # Arguments
    /// * `signing_input` - The exact `header.payload` span of the token
    /// * `signature` - The decoded signature bytes
    /// * `key` - Public key of the leaf certificate
    pub(crate) fn verify_signature(
        &self,
        signing_input: &str,
        signature: &[u8],
        key: &VerifyingKey,
    ) -> Result<()> {
        if key.curve() != self.curve() {
            return Err(Error::UnsupportedKeyType(format!(
                "{} requires a {} key, leaf key is {}",
                self,
                self.curve(),
                key.curve()
            )));
        }

        let public_key = UnparsedPublicKey::new(self.verification_algorithm(), key.as_bytes());

        public_key
            .verify(signing_input.as_bytes(), signature)
            .map_err(|_| Error::SignatureInvalid)
    }
}

impl std::fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Policy for allowed algorithms
#[derive(Debug, Clone)]
pub struct AlgorithmPolicy {
    allowed: Vec<AlgorithmType>,
}

impl AlgorithmPolicy {
    /// Policy that allows only ES256
    ///
    /// Equivalent to `Default::default()`. The App Store signs with ES256.
    pub fn es256_only() -> Self {
        Self::allow_only(vec![AlgorithmType::ES256])
    }

    /// Policy that allows all ECDSA algorithms (ES256, ES384, ES512)
    pub fn ecdsa_all() -> Self {
        Self::allow_only(vec![
            AlgorithmType::ES256,
            AlgorithmType::ES384,
            AlgorithmType::ES512,
        ])
    }

    /// Create a policy that allows only specific algorithms
    pub fn allow_only(algorithms: Vec<AlgorithmType>) -> Self {
        Self {
            allowed: algorithms,
        }
    }

    /// Validate algorithm against policy
    pub(crate) fn validate(&self, algorithm: &AlgorithmType) -> Result<()> {
        if self.is_allowed(algorithm) {
            Ok(())
        } else {
            Err(Error::AlgorithmNotAllowed {
                found: algorithm.to_string(),
                allowed: self.allowed.iter().map(ToString::to_string).collect(),
            })
        }
    }

    /// Check if an algorithm is allowed
    fn is_allowed(&self, algorithm: &AlgorithmType) -> bool {
        self.allowed.contains(algorithm)
    }
}

impl Default for AlgorithmPolicy {
    fn default() -> Self {
        Self::es256_only()
    }
}
