//! `x5c` certificate chain validation

use crate::algorithm::VerifyingKey;
use crate::certificate::Certificate;
use crate::error::{Error, Result};
use crate::token::certificate_chain;
use crate::trust::TrustStore;
use miniserde::json::Object;
use x509_parser::prelude::*;
use x509_parser::public_key::PublicKey;

/// Number of certificates the App Store places in `x5c`
const CHAIN_LENGTH: usize = 3;

/// Validate the header's `x5c` chain and return the leaf public key
///
/// Only the leaf (entry 0) and intermediate (entry 1) are used for path
/// validation; the intermediate must be issued by a root in `trust_store`.
/// Entry 2 is decoded but otherwise ignored.
pub(crate) fn validate_chain(
    header: &Object,
    trust_store: &TrustStore,
    now: i64,
) -> Result<VerifyingKey> {
    let encoded = certificate_chain(header).ok_or(Error::ChainMissing)?;
    if encoded.len() != CHAIN_LENGTH {
        return Err(Error::ChainLengthInvalid(encoded.len()));
    }

    let mut certificates = Vec::with_capacity(CHAIN_LENGTH);
    for entry in encoded {
        certificates.extend(Certificate::from_base64(entry)?);
    }

    let leaf = certificates[0].parsed()?;
    let intermediate = certificates[1].parsed()?;

    tracing::debug!(
        leaf = %leaf.subject(),
        intermediate = %intermediate.subject(),
        "validating certificate chain"
    );

    verify_path(&leaf, &intermediate, trust_store, now)?;
    leaf_public_key(&leaf)
}

fn verify_path(
    leaf: &X509Certificate<'_>,
    intermediate: &X509Certificate<'_>,
    trust_store: &TrustStore,
    now: i64,
) -> Result<()> {
    check_validity("leaf", leaf, now)?;
    check_validity("intermediate", intermediate, now)?;

    let is_ca = intermediate
        .basic_constraints()
        .ok()
        .flatten()
        .is_some_and(|bc| bc.value.ca);
    if !is_ca {
        return Err(Error::ChainUntrusted(format!(
            "intermediate ({}) is not a CA",
            intermediate.subject()
        )));
    }

    if leaf.issuer().as_raw() != intermediate.subject().as_raw() {
        return Err(Error::ChainUntrusted(format!(
            "leaf issuer ({}) does not match intermediate subject ({})",
            leaf.issuer(),
            intermediate.subject()
        )));
    }

    leaf.verify_signature(Some(intermediate.public_key()))
        .map_err(|e| {
            Error::ChainUntrusted(format!(
                "leaf ({}) is not signed by intermediate ({}): {e}",
                leaf.subject(),
                intermediate.subject()
            ))
        })?;

    let root = trust_store.find_issuer(intermediate)?.ok_or_else(|| {
        Error::ChainUntrusted(format!(
            "unable to find trusted root for issuer: {}",
            intermediate.issuer()
        ))
    })?;
    check_validity("root", &root.parsed()?, now)?;

    Ok(())
}

fn check_validity(role: &str, cert: &X509Certificate<'_>, now: i64) -> Result<()> {
    let not_before = cert.validity().not_before.timestamp();
    let not_after = cert.validity().not_after.timestamp();

    if now < not_before {
        return Err(Error::ChainUntrusted(format!(
            "{role} certificate ({}) is not yet valid",
            cert.subject()
        )));
    }
    if now > not_after {
        return Err(Error::ChainUntrusted(format!(
            "{role} certificate ({}) has expired",
            cert.subject()
        )));
    }

    Ok(())
}

fn leaf_public_key(leaf: &X509Certificate<'_>) -> Result<VerifyingKey> {
    match leaf.public_key().parsed() {
        Ok(PublicKey::EC(point)) => VerifyingKey::from_uncompressed_point(point.data()),
        Ok(_) => Err(Error::UnsupportedKeyType(
            "leaf public key is not an elliptic-curve key".into(),
        )),
        Err(e) => Err(Error::UnsupportedKeyType(format!(
            "leaf public key could not be parsed: {e}"
        ))),
    }
}
