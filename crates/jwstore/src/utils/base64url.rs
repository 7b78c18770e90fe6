//! Base64 decoding per RFC 4648
//!
//! This module provides a thin wrapper around the `base64` crate with
//! size limit validation. Token segments use the URL-safe alphabet
//! without padding; `x5c` certificates use the standard padded alphabet
//! (RFC 7515 §4.1.6).

use crate::error::{Error, Result};
use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};

/// Decode Base64URL string to bytes with maximum size limit
pub(crate) fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>> {
    let result = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| Error::FormatInvalidBase64(format!("Base64URL decode failed: {e}")))?;

    check_size(result, max_size)
}

/// Decode Base64URL string to UTF-8 string with size limit
pub(crate) fn decode_string(input: &str, max_size: usize) -> Result<String> {
    decode_bytes(input, max_size).and_then(|bytes| {
        String::from_utf8(bytes)
            .map_err(|e| Error::FormatInvalidBase64(format!("Invalid UTF-8: {e}")))
    })
}

/// Decode standard (padded) Base64 bytes with size limit
pub(crate) fn decode_standard(input: &str, max_size: usize) -> Result<Vec<u8>> {
    let result = STANDARD
        .decode(input)
        .map_err(|e| Error::FormatInvalidBase64(format!("Base64 decode failed: {e}")))?;

    check_size(result, max_size)
}

/// Encode bytes as Base64URL without padding
pub(crate) fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

fn check_size(bytes: Vec<u8>, max_size: usize) -> Result<Vec<u8>> {
    if bytes.len() > max_size {
        return Err(Error::FormatInvalidBase64(format!(
            "Decoded size exceeds limit: {} bytes (max: {})",
            bytes.len(),
            max_size
        )));
    }

    Ok(bytes)
}
