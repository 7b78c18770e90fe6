use crate::algorithm::{AlgorithmPolicy, AlgorithmType};
use crate::chain::validate_chain;
use crate::error::Result;
use crate::token::{UnverifiedToken, parse_unverified};
use crate::trust::TrustStore;
use miniserde::json::Object;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Decoded signed data and whether its chain and signature verified
///
/// [`SignedDataVerifier::verify`] only returns valid data.
/// [`SignedDataVerifier::verify_detailed`] also returns data that failed
/// chain or signature checks, with `is_valid()` set to `false`.
#[derive(Debug, Clone)]
pub struct SignedData<T> {
    raw: String,
    algorithm: AlgorithmType,
    header: Object,
    payload: T,
    signature: Vec<u8>,
    valid: bool,
}

impl<T> SignedData<T> {
    fn unverified(token: UnverifiedToken<'_, T>) -> Self {
        Self {
            raw: token.raw.to_string(),
            algorithm: token.algorithm,
            header: token.header,
            payload: token.payload,
            signature: token.signature,
            valid: false,
        }
    }

    /// The token exactly as received
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Signing method declared in the header
    pub fn algorithm(&self) -> AlgorithmType {
        self.algorithm
    }

    /// Decoded header
    pub fn header(&self) -> &Object {
        &self.header
    }

    /// Decoded payload
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume and return the decoded payload
    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Decoded signature bytes
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Whether every verification step succeeded
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Verifier for App Store signed data (compact JWS with an `x5c` chain)
///
/// The verifier is configured once and can be reused for any number of
/// tokens, from any number of threads. The payload type is chosen per call.
#[derive(Debug, Clone)]
pub struct SignedDataVerifier {
    config_trust: Arc<TrustStore>,
    config_algorithms: AlgorithmPolicy,
    config_time: Option<i64>,
}

impl SignedDataVerifier {
    /// Create a verifier pinned to the Apple Root CA - G3
    pub fn new() -> Result<Self> {
        Ok(Self::with_trust_store(TrustStore::apple_root_ca_g3()?))
    }

    /// Create a verifier pinned to caller-supplied roots
    pub fn with_trust_store(trust_store: TrustStore) -> Self {
        Self {
            config_trust: Arc::new(trust_store),
            config_algorithms: AlgorithmPolicy::default(),
            config_time: None,
        }
    }

    /// Configure the algorithm policy
    pub fn algorithms(&mut self, policy: AlgorithmPolicy) -> &mut Self {
        self.config_algorithms = policy;
        self
    }

    /// Check certificate validity at a fixed unix time instead of the
    /// system clock
    pub fn verification_time(&mut self, unix_seconds: i64) -> &mut Self {
        self.config_time = Some(unix_seconds);
        self
    }

    /// Finish configuration
    pub fn build(&mut self) -> Self {
        self.clone()
    }

    /// Roots this verifier trusts
    pub fn trust_store(&self) -> &TrustStore {
        &self.config_trust
    }
}

impl SignedDataVerifier {
    /// Verify a signed token and decode its payload as `T`
    ///
    /// Runs parsing, chain validation and signature verification in order
    /// and stops at the first failure.
    pub fn verify<T>(&self, token: &str) -> Result<SignedData<T>>
    where
        T: miniserde::Deserialize,
    {
        // 1. Parse header, payload, algorithm and signature
        let parsed = parse_unverified::<T>(token, &self.config_algorithms)?;
        let signing_input = parsed.signing_input;
        let mut data = SignedData::unverified(parsed);

        // 2. Validate chain and signature
        self.check(&data, signing_input)?;

        data.valid = true;
        Ok(data)
    }

    /// Verify a signed token, keeping whatever was parsed on failure
    ///
    /// Once the token parses, the decoded data is returned alongside the
    /// outcome. It is only marked valid when the outcome is `Ok`; fields of
    /// an invalid result are for diagnostics and must not be trusted.
    pub fn verify_detailed<T>(&self, token: &str) -> (Option<SignedData<T>>, Result<()>)
    where
        T: miniserde::Deserialize,
    {
        let parsed = match parse_unverified::<T>(token, &self.config_algorithms) {
            Ok(parsed) => parsed,
            Err(e) => return (None, Err(e)),
        };
        let signing_input = parsed.signing_input;
        let mut data = SignedData::unverified(parsed);

        let outcome = self.check(&data, signing_input);
        data.valid = outcome.is_ok();
        (Some(data), outcome)
    }

    fn check<T>(&self, data: &SignedData<T>, signing_input: &str) -> Result<()> {
        tracing::debug!(
            alg = %data.algorithm,
            signature_len = data.signature.len(),
            "parsed signed data"
        );

        // Validate certificate chain and extract the leaf key
        let key = validate_chain(&data.header, &self.config_trust, self.now())?;

        // Verify signature over the exact header.payload span
        data.algorithm
            .verify_signature(signing_input, &data.signature, &key)
    }

    fn now(&self) -> i64 {
        self.config_time.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_else(|_| std::time::Duration::from_secs(0))
                .as_secs() as i64
        })
    }
}
