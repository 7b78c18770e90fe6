//! Test fixtures: freshly generated certificate chains and signed tokens
//!
//! Every chain mirrors the App Store layout: a P-384 root, an intermediate
//! CA issued by the root, and a leaf issued by the intermediate. Tokens are
//! signed with the leaf key and carry `[leaf, intermediate, root]` in `x5c`.

#![allow(dead_code)]

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    ECDSA_P256_SHA256_FIXED_SIGNING, ECDSA_P384_SHA384_FIXED_SIGNING, EcdsaKeyPair,
    EcdsaSigningAlgorithm,
};
use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use jwstore::{Certificate, TrustStore};
use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair,
    PKCS_ECDSA_P256_SHA256, PKCS_ECDSA_P384_SHA384, SignatureAlgorithm, date_time_ymd,
};
use serde_json::{Value, json};

/// Install a test subscriber so `RUST_LOG=jwstore=debug` shows pipeline logs
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Knobs for generating broken chains
pub struct ChainOptions {
    pub leaf_alg: &'static SignatureAlgorithm,
    pub leaf_expired: bool,
    pub intermediate_is_ca: bool,
    /// Sign the leaf with the intermediate's key under a different issuer name
    pub leaf_issuer_renamed: bool,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            leaf_alg: &PKCS_ECDSA_P256_SHA256,
            leaf_expired: false,
            intermediate_is_ca: true,
            leaf_issuer_renamed: false,
        }
    }
}

/// A generated root -> intermediate -> leaf chain
pub struct TestChain {
    pub root_der: Vec<u8>,
    pub intermediate_der: Vec<u8>,
    pub leaf_der: Vec<u8>,
    leaf_key: EcdsaKeyPair,
}

fn params(common_name: &str, alg: &'static SignatureAlgorithm, is_ca: bool) -> CertificateParams {
    let mut params = CertificateParams::default();
    params.alg = alg;
    params.distinguished_name = DistinguishedName::new();
    params
        .distinguished_name
        .push(DnType::CommonName, common_name);
    params.not_before = date_time_ymd(2020, 1, 1);
    params.not_after = date_time_ymd(2090, 1, 1);
    if is_ca {
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    }
    params
}

fn signing_algorithm(alg: &'static SignatureAlgorithm) -> &'static EcdsaSigningAlgorithm {
    if alg == &PKCS_ECDSA_P384_SHA384 {
        &ECDSA_P384_SHA384_FIXED_SIGNING
    } else {
        &ECDSA_P256_SHA256_FIXED_SIGNING
    }
}

impl TestChain {
    /// Generate a valid chain with a P-256 leaf
    pub fn generate() -> Self {
        Self::generate_with(ChainOptions::default())
    }

    pub fn generate_with(options: ChainOptions) -> Self {
        let root = rcgen::Certificate::from_params(params(
            "Test Root CA - G3",
            &PKCS_ECDSA_P384_SHA384,
            true,
        ))
        .expect("root certificate");

        let intermediate = rcgen::Certificate::from_params(params(
            "Test Worldwide Developer Relations CA - G6",
            &PKCS_ECDSA_P256_SHA256,
            options.intermediate_is_ca,
        ))
        .expect("intermediate certificate");

        let mut leaf_params = params("Test StoreKit Signing", options.leaf_alg, false);
        if options.leaf_expired {
            leaf_params.not_before = date_time_ymd(2000, 1, 1);
            leaf_params.not_after = date_time_ymd(2001, 1, 1);
        }
        let leaf = rcgen::Certificate::from_params(leaf_params).expect("leaf certificate");

        let leaf_key = EcdsaKeyPair::from_pkcs8(
            signing_algorithm(options.leaf_alg),
            &leaf.serialize_private_key_der(),
        )
        .expect("leaf key");

        let leaf_der = if options.leaf_issuer_renamed {
            let mut alias_params = params(
                "Test Renamed Intermediate CA",
                &PKCS_ECDSA_P256_SHA256,
                true,
            );
            alias_params.key_pair = Some(
                KeyPair::from_der(&intermediate.serialize_private_key_der())
                    .expect("intermediate key"),
            );
            let alias =
                rcgen::Certificate::from_params(alias_params).expect("renamed intermediate");
            leaf.serialize_der_with_signer(&alias)
        } else {
            leaf.serialize_der_with_signer(&intermediate)
        }
        .expect("leaf DER");

        Self {
            root_der: root.serialize_der().expect("root DER"),
            intermediate_der: intermediate
                .serialize_der_with_signer(&root)
                .expect("intermediate DER"),
            leaf_der,
            leaf_key,
        }
    }

    /// Trust store pinned to this chain's root
    pub fn trust_store(&self) -> TrustStore {
        TrustStore::new(vec![
            Certificate::from_der(self.root_der.clone()).expect("root parses"),
        ])
    }

    /// `x5c` entries in wire order: leaf, intermediate, root
    pub fn x5c(&self) -> Vec<String> {
        [&self.leaf_der, &self.intermediate_der, &self.root_der]
            .iter()
            .map(|der| STANDARD.encode(der))
            .collect()
    }

    /// Standard App Store header for this chain
    pub fn header(&self) -> Value {
        json!({ "alg": "ES256", "x5c": self.x5c() })
    }

    /// Sign `payload` under this chain's standard header
    pub fn sign(&self, payload: &Value) -> String {
        self.sign_with_header(&self.header(), payload)
    }

    /// Sign an arbitrary header and payload with the leaf key
    pub fn sign_with_header(&self, header: &Value, payload: &Value) -> String {
        let signing_input = format!("{}.{}", encode_json(header), encode_json(payload));
        let signature = self
            .leaf_key
            .sign(&SystemRandom::new(), signing_input.as_bytes())
            .expect("signature");
        format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature.as_ref()))
    }
}

/// Base64URL-encoded compact JSON
pub fn encode_json(value: &Value) -> String {
    URL_SAFE_NO_PAD.encode(serde_json::to_string(value).expect("json"))
}

/// Replace one segment of a compact token
pub fn replace_segment(token: &str, index: usize, segment: &str) -> String {
    let mut parts: Vec<&str> = token.split('.').collect();
    parts[index] = segment;
    parts.join(".")
}

/// Decode one segment of a compact token as JSON
pub fn decode_segment(token: &str, index: usize) -> Value {
    let segment = token.split('.').nth(index).expect("segment");
    let bytes = URL_SAFE_NO_PAD.decode(segment).expect("base64url");
    serde_json::from_slice(&bytes).expect("json")
}

/// A transaction payload as the App Store sends it
pub fn transaction_payload() -> Value {
    json!({
        "transactionId": "1000000",
        "originalTransactionId": "1000000",
        "bundleId": "com.example.app",
        "productId": "com.example.app.monthly",
        "price": 4990,
        "isUpgraded": false,
        "signedDate": 1_700_000_000_000i64,
        "environment": "Sandbox"
    })
}

/// Decode target for [`transaction_payload`]
#[derive(miniserde::Deserialize, Debug, Clone, PartialEq)]
pub struct TransactionPayload {
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    #[serde(rename = "bundleId")]
    pub bundle_id: String,
    #[serde(rename = "productId")]
    pub product_id: String,
    pub price: i64,
    #[serde(rename = "isUpgraded")]
    pub is_upgraded: Option<bool>,
    #[serde(rename = "signedDate")]
    pub signed_date: i64,
    #[serde(rename = "appAccountToken")]
    pub app_account_token: Option<String>,
}
