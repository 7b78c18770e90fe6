//! Compact JWS parsing (no verification)

use crate::algorithm::{AlgorithmPolicy, AlgorithmType};
use crate::error::{Error, Result};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_TOKEN_LENGTH,
};
use crate::utils::base64url;
use miniserde::json::{Object, Value};

/// A compact JWS split and decoded, but not yet verified
///
/// Nothing in here may be trusted until the certificate chain and the
/// signature have been checked.
pub(crate) struct UnverifiedToken<'a, T> {
    pub raw: &'a str,
    /// Exact `header.payload` span of `raw`
    pub signing_input: &'a str,
    pub header: Object,
    pub payload: T,
    pub algorithm: AlgorithmType,
    pub signature: Vec<u8>,
}

/// Parse a compact JWS without verifying it
///
/// Steps run in wire order and stop at the first failure: segment count,
/// header, payload, algorithm, signature.
pub(crate) fn parse_unverified<'a, T>(
    token: &'a str,
    policy: &AlgorithmPolicy,
) -> Result<UnverifiedToken<'a, T>>
where
    T: miniserde::Deserialize,
{
    // 1. Validate token string length
    if token.len() > MAX_TOKEN_LENGTH {
        return Err(Error::TokenTooLarge {
            size: token.len(),
            max: MAX_TOKEN_LENGTH,
        });
    }

    // 2. Check token format (header, payload, signature)
    let parts: Vec<&str> = token.split('.').collect();
    let [header_b64, payload_b64, signature_b64] = parts[..] else {
        return Err(Error::FormatInvalid(parts.len()));
    };

    // 3. Decode header
    let header_json = base64url::decode_string(header_b64, MAX_DECODED_HEADER_SIZE)
        .map_err(|e| Error::FormatInvalidBase64(format!("could not decode header: {e}")))?;
    let header: Object = miniserde::json::from_str(&header_json)
        .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse header: {e}")))?;

    // 4. Decode payload into the caller's type
    let payload_json = base64url::decode_string(payload_b64, MAX_DECODED_PAYLOAD_SIZE)
        .map_err(|e| Error::FormatInvalidBase64(format!("could not decode payload: {e}")))?;
    let payload: T = miniserde::json::from_str(&payload_json)
        .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse payload: {e}")))?;

    // 5. Resolve the signing method
    let algorithm = match header.get("alg") {
        Some(Value::String(alg)) => AlgorithmType::from_str(alg)?,
        Some(_) | None => return Err(Error::AlgorithmMissing),
    };
    policy.validate(&algorithm)?;

    // 6. Decode signature
    let signature = base64url::decode_bytes(signature_b64, MAX_DECODED_SIGNATURE_SIZE)
        .map_err(|e| Error::FormatInvalidBase64(format!("could not decode signature: {e}")))?;

    let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];

    Ok(UnverifiedToken {
        raw: token,
        signing_input,
        header,
        payload,
        algorithm,
        signature,
    })
}

/// Read the `x5c` header as a list of strings
///
/// Returns `None` when the field is absent, not an array, or holds
/// anything other than strings.
pub(crate) fn certificate_chain(header: &Object) -> Option<Vec<&str>> {
    let Some(Value::Array(entries)) = header.get("x5c") else {
        return None;
    };

    entries
        .iter()
        .map(|entry| match entry {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        })
        .collect()
}
