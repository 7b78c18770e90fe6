//! Size limit constants for input validation

/// Maximum length for a signed token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

// ============================================================================
// Decoded segment size limits
// ============================================================================

/// Maximum size for decoded header JSON (16KB)
/// The header embeds three base64 certificates, roughly 4-5KB in practice
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 16 * 1024;

/// Maximum size for decoded payload JSON (48KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 48 * 1024;

/// Maximum size for decoded signature bytes (256 bytes)
/// ES512 produces the largest fixed-size signature at 132 bytes
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 256;

// ============================================================================
// Header field size limits
// ============================================================================

/// Maximum length for algorithm (alg) field in the header (16 bytes)
pub(crate) const MAX_ALG_LENGTH: usize = 16;

/// Maximum size for one decoded `x5c` certificate (8KB)
pub(crate) const MAX_CERTIFICATE_SIZE: usize = 8 * 1024;

// ============================================================================
// Bearer token
// ============================================================================

/// Lifetime of an issued bearer token (1 hour)
pub(crate) const BEARER_TOKEN_LIFETIME_SECONDS: u64 = 60 * 60;
