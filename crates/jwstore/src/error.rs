//! Errors for jwstore

use thiserror::Error;

/// Coarse classification of an [`Error`]
///
/// Callers that only need to decide how to react (reject the payload, fix
/// the configuration, reload a key) can match on the kind instead of the
/// individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Token is not three base64url segments of valid JSON
    Malformed,
    /// Signing algorithm missing, unknown or not allowed
    Unverifiable,
    /// `x5c` header absent, wrong length, or holds undecodable certificates
    InvalidChain,
    /// Leaf does not chain to a pinned root through the intermediate
    UntrustedChain,
    /// Leaf key cannot verify the declared algorithm
    UnsupportedKeyType,
    /// Cryptographic signature check failed
    SignatureInvalid,
    /// Token issuance attempted without a private key
    MissingKey,
    /// Private key could not be loaded or used
    Key,
}

/// jwstore Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Invalid JWS format: expected three parts separated by '.', found {0}")]
    FormatInvalid(usize),

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Signing method (alg) is unspecified")]
    AlgorithmMissing,

    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("The 'none' algorithm is rejected for security reasons (RFC 8725)")]
    AlgorithmNoneRejected,

    #[error("Algorithm '{found}' not allowed. Allowed: {allowed:?}")]
    AlgorithmNotAllowed { found: String, allowed: Vec<String> },

    // ============================================================================
    // Certificate Chain Errors
    // ============================================================================
    #[error("Header field 'x5c' is missing or not an array of strings")]
    ChainMissing,

    #[error("Invalid certificate chain length: expected 3, found {0}")]
    ChainLengthInvalid(usize),

    #[error("Invalid certificate: {0}")]
    CertificateInvalid(String),

    #[error("Certificate chain is not trusted: {0}")]
    ChainUntrusted(String),

    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    // ============================================================================
    // Signing Key Errors
    // ============================================================================
    #[error("Private key not given")]
    MissingKey,

    #[error("Private key must be a valid .p8 PEM file: {0}")]
    KeyNotPem(String),

    #[error("Private key must be a P-256 ECDSA key: {0}")]
    KeyNotEcdsa(String),

    #[error("Failed to read private key: {0}")]
    KeyIo(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

impl Error {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TokenTooLarge { .. }
            | Error::FormatInvalid(_)
            | Error::FormatInvalidBase64(_)
            | Error::FormatInvalidJson(_) => ErrorKind::Malformed,
            Error::AlgorithmMissing
            | Error::AlgorithmUnsupported(_)
            | Error::AlgorithmNoneRejected
            | Error::AlgorithmNotAllowed { .. } => ErrorKind::Unverifiable,
            Error::ChainMissing | Error::ChainLengthInvalid(_) | Error::CertificateInvalid(_) => {
                ErrorKind::InvalidChain
            }
            Error::ChainUntrusted(_) => ErrorKind::UntrustedChain,
            Error::UnsupportedKeyType(_) => ErrorKind::UnsupportedKeyType,
            Error::SignatureInvalid => ErrorKind::SignatureInvalid,
            Error::MissingKey => ErrorKind::MissingKey,
            Error::KeyNotPem(_)
            | Error::KeyNotEcdsa(_)
            | Error::KeyIo(_)
            | Error::SigningFailed(_) => ErrorKind::Key,
        }
    }
}

/// Result type alias for jwstore operations
pub type Result<T> = std::result::Result<T, Error>;
