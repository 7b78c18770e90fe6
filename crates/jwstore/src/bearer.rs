//! App Store Server API bearer tokens
//!
//! Tokens are ES256-signed JWTs with the App Store Connect audience and a
//! one hour lifetime. Every call to [`BearerTokenIssuer::issue`] signs a
//! fresh claim set; caching issued tokens is left to the caller.

use crate::algorithm::AlgorithmType;
use crate::error::{Error, Result};
use crate::limits::BEARER_TOKEN_LIFETIME_SECONDS;
use crate::utils::base64url;
use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{ECDSA_P256_SHA256_FIXED_SIGNING, EcdsaKeyPair};
use miniserde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Audience every App Store Server API token must carry
pub const APP_STORE_CONNECT_AUDIENCE: &str = "appstoreconnect-v1";

/// ES256 private key downloaded from App Store Connect
///
/// Cloning shares the same read-only key pair. The key material is never
/// printed or serialized.
#[derive(Clone)]
pub struct SigningKey {
    key_pair: Arc<EcdsaKeyPair>,
}

impl SigningKey {
    /// Load a key from PKCS#8 DER bytes
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        if der.is_empty() {
            return Err(Error::MissingKey);
        }

        let key_pair = EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, der)
            .map_err(|e| Error::KeyNotEcdsa(e.to_string()))?;

        Ok(Self {
            key_pair: Arc::new(key_pair),
        })
    }

    /// Load a key from the contents of a `.p8` PEM file
    pub fn from_pem(pem_bytes: &[u8]) -> Result<Self> {
        if pem_bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::MissingKey);
        }

        let pem_data = ::pem::parse(pem_bytes).map_err(|e| Error::KeyNotPem(e.to_string()))?;
        if pem_data.tag() != "PRIVATE KEY" {
            return Err(Error::KeyNotPem(format!(
                "expected a PRIVATE KEY block, got: {}",
                pem_data.tag()
            )));
        }

        Self::from_pkcs8_der(pem_data.contents())
    }

    /// Load a key from a `.p8` file on disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| Error::KeyIo(format!("{}: {e}", path.display())))?;
        Self::from_pem(&bytes)
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let signature = self
            .key_pair
            .sign(&SystemRandom::new(), message)
            .map_err(|e| Error::SigningFailed(e.to_string()))?;
        Ok(signature.as_ref().to_vec())
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

/// Credentials used to sign bearer tokens
#[derive(Debug, Clone)]
pub struct SigningIdentity {
    private_key: Option<SigningKey>,
    key_id: String,
    issuer: String,
    bundle_id: String,
}

impl SigningIdentity {
    /// Create an identity without a private key
    ///
    /// # Arguments
    /// * `key_id` - Private key ID from App Store Connect
    /// * `issuer` - Issuer ID from the Keys page in App Store Connect
    /// * `bundle_id` - The app's bundle ID
    pub fn new(
        key_id: impl Into<String>,
        issuer: impl Into<String>,
        bundle_id: impl Into<String>,
    ) -> Self {
        Self {
            private_key: None,
            key_id: key_id.into(),
            issuer: issuer.into(),
            bundle_id: bundle_id.into(),
        }
    }

    /// Attach the private key
    pub fn private_key(mut self, key: SigningKey) -> Self {
        self.private_key = Some(key);
        self
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn bundle_id(&self) -> &str {
        &self.bundle_id
    }
}

#[derive(Serialize)]
struct BearerHeader {
    typ: String,
    alg: String,
    kid: String,
}

#[derive(Serialize)]
struct BearerClaims {
    iss: String,
    iat: u64,
    exp: u64,
    aud: String,
    bid: String,
}

/// Issues App Store Server API bearer tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerTokenIssuer;

impl BearerTokenIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Issue a token valid for one hour from now
    pub fn issue(&self, identity: &SigningIdentity) -> Result<String> {
        self.issue_at(identity, SystemTime::now())
    }

    /// Issue a token valid for one hour from `issued_at`
    pub fn issue_at(&self, identity: &SigningIdentity, issued_at: SystemTime) -> Result<String> {
        let key = identity.private_key.as_ref().ok_or(Error::MissingKey)?;

        let iat = issued_at
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::SigningFailed(format!("issue time before unix epoch: {e}")))?
            .as_secs();

        let header = BearerHeader {
            typ: "JWT".into(),
            alg: AlgorithmType::ES256.as_str().into(),
            kid: identity.key_id.clone(),
        };
        let claims = BearerClaims {
            iss: identity.issuer.clone(),
            iat,
            exp: iat + BEARER_TOKEN_LIFETIME_SECONDS,
            aud: APP_STORE_CONNECT_AUDIENCE.into(),
            bid: identity.bundle_id.clone(),
        };

        let signing_input = format!(
            "{}.{}",
            base64url::encode(miniserde::json::to_string(&header)),
            base64url::encode(miniserde::json::to_string(&claims))
        );
        let signature = key.sign(signing_input.as_bytes())?;

        tracing::debug!(kid = %identity.key_id, exp = claims.exp, "issued bearer token");

        Ok(format!("{signing_input}.{}", base64url::encode(signature)))
    }
}
