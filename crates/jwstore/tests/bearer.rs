//! Bearer token issuance against keys in the formats App Store Connect hands out

mod common;

use std::io::Write;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    ECDSA_P256_SHA256_FIXED, ECDSA_P256_SHA256_FIXED_SIGNING, EcdsaKeyPair, KeyPair,
    UnparsedPublicKey,
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jwstore::{
    APP_STORE_CONNECT_AUDIENCE, BearerTokenIssuer, Error, ErrorKind, SigningIdentity, SigningKey,
};

const KEY_ID: &str = "2X9R4HXF34";
const ISSUER_ID: &str = "57246542-96fe-1a63-e053-0824d011072a";
const BUNDLE_ID: &str = "com.example.app";

struct GeneratedKey {
    pkcs8: Vec<u8>,
    pem: String,
}

fn generate_key() -> GeneratedKey {
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, &SystemRandom::new())
        .expect("generate key")
        .as_ref()
        .to_vec();
    let pem = pem::encode(&pem::Pem::new("PRIVATE KEY", pkcs8.clone()));
    GeneratedKey { pkcs8, pem }
}

fn identity(key: SigningKey) -> SigningIdentity {
    SigningIdentity::new(KEY_ID, ISSUER_ID, BUNDLE_ID).private_key(key)
}

fn assert_signed_by(token: &str, pkcs8: &[u8]) {
    let key_pair = EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, pkcs8).unwrap();
    let public_key = UnparsedPublicKey::new(&ECDSA_P256_SHA256_FIXED, key_pair.public_key().as_ref());

    let (signing_input, signature) = token.rsplit_once('.').unwrap();
    let signature = URL_SAFE_NO_PAD.decode(signature).unwrap();
    assert!(public_key.verify(signing_input.as_bytes(), &signature).is_ok());
}

#[test]
fn test_issue_round_trip() {
    common::init_tracing();
    let key = generate_key();
    let signing_key = SigningKey::from_pem(key.pem.as_bytes()).unwrap();

    let token = BearerTokenIssuer::new().issue(&identity(signing_key)).unwrap();
    assert_eq!(token.split('.').count(), 3);

    let header = common::decode_segment(&token, 0);
    assert_eq!(header["typ"], "JWT");
    assert_eq!(header["alg"], "ES256");
    assert_eq!(header["kid"], KEY_ID);

    let claims = common::decode_segment(&token, 1);
    assert_eq!(claims["iss"], ISSUER_ID);
    assert_eq!(claims["aud"], APP_STORE_CONNECT_AUDIENCE);
    assert_eq!(claims["bid"], BUNDLE_ID);

    let iat = claims["iat"].as_u64().unwrap();
    let exp = claims["exp"].as_u64().unwrap();
    assert_eq!(exp - iat, 3600);

    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
    assert!(iat.abs_diff(now) <= 5);

    assert_signed_by(&token, &key.pkcs8);
}

#[test]
fn test_each_issue_is_fresh() {
    let key = generate_key();
    let identity = identity(SigningKey::from_pkcs8_der(&key.pkcs8).unwrap());
    let issuer = BearerTokenIssuer::new();
    let issued_at = UNIX_EPOCH + Duration::from_secs(1_700_000_000);

    let first = issuer.issue_at(&identity, issued_at).unwrap();
    let second = issuer.issue_at(&identity, issued_at).unwrap();

    // Identical claims, independently generated ECDSA signatures
    assert_eq!(first.rsplit_once('.').unwrap().0, second.rsplit_once('.').unwrap().0);
    assert_ne!(first, second);
    assert_signed_by(&first, &key.pkcs8);
    assert_signed_by(&second, &key.pkcs8);
}

#[test]
fn test_key_from_file() {
    let key = generate_key();
    let mut file = tempfile::Builder::new()
        .prefix("AuthKey_")
        .suffix(".p8")
        .tempfile()
        .unwrap();
    file.write_all(key.pem.as_bytes()).unwrap();

    let signing_key = SigningKey::from_file(file.path()).unwrap();
    let token = BearerTokenIssuer::new().issue(&identity(signing_key)).unwrap();
    assert_signed_by(&token, &key.pkcs8);
}

#[test]
fn test_missing_key() {
    let identity = SigningIdentity::new(KEY_ID, ISSUER_ID, BUNDLE_ID);
    let result = BearerTokenIssuer::new().issue(&identity);
    assert_eq!(result, Err(Error::MissingKey));
    assert_eq!(result.unwrap_err().kind(), ErrorKind::MissingKey);
}

#[test]
fn test_empty_key_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let result = SigningKey::from_file(file.path());
    assert_eq!(result.unwrap_err(), Error::MissingKey);
}

#[test]
fn test_identity_accessors() {
    let identity = SigningIdentity::new(KEY_ID, ISSUER_ID, BUNDLE_ID);
    assert_eq!(identity.key_id(), KEY_ID);
    assert_eq!(identity.issuer(), ISSUER_ID);
    assert_eq!(identity.bundle_id(), BUNDLE_ID);
}
