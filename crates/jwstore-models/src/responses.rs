//! App Store Server API response bodies carrying signed data

use crate::error::{DecodeError, Result};
use crate::payloads::{JwsRenewalInfoDecodedPayload, JwsTransactionDecodedPayload};
use crate::types::{Environment, Status};
use jwstore::SignedDataVerifier;
use miniserde::{Deserialize, Serialize};

/// Verify `signed` and decode its payload as `T`
///
/// `field` names the response field the token came from and is used for
/// diagnostics only.
fn decode_signed<T>(
    field: &'static str,
    signed: Option<&str>,
    verifier: &SignedDataVerifier,
) -> Result<T>
where
    T: miniserde::Deserialize,
{
    let signed = signed
        .filter(|s| !s.is_empty())
        .ok_or(DecodeError::MissingSignedData(field))?;

    match verifier.verify::<T>(signed) {
        Ok(data) => {
            tracing::debug!(field, alg = %data.algorithm(), "decoded signed data");
            Ok(data.into_payload())
        }
        Err(e) => {
            tracing::warn!(field, kind = ?e.kind(), "rejected signed data: {e}");
            Err(e.into())
        }
    }
}

/// Signed transaction information for a single transaction
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TransactionInfoResponse {
    #[serde(rename = "signedTransactionInfo")]
    pub signed_transaction_info: Option<String>,
}

impl TransactionInfoResponse {
    /// Verify and decode `signedTransactionInfo`
    pub fn decode_transaction_info(
        &self,
        verifier: &SignedDataVerifier,
    ) -> Result<JwsTransactionDecodedPayload> {
        decode_signed(
            "signedTransactionInfo",
            self.signed_transaction_info.as_deref(),
            verifier,
        )
    }
}

/// Status of every auto-renewable subscription a customer has in the app
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct StatusResponse {
    pub data: Option<Vec<SubscriptionGroupIdentifierItem>>,
    pub environment: Option<Environment>,
    #[serde(rename = "appAppleId")]
    pub app_apple_id: Option<i64>,
    #[serde(rename = "bundleId")]
    pub bundle_id: Option<String>,
}

/// Error body returned by the App Store Server API
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ErrorPayload {
    #[serde(rename = "errorCode")]
    pub error_code: Option<i64>,
    #[serde(rename = "errorMessage")]
    pub error_message: Option<String>,
}

/// Signed subscription information for one subscription group
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SubscriptionGroupIdentifierItem {
    #[serde(rename = "subscriptionGroupIdentifier")]
    pub subscription_group_identifier: Option<String>,
    #[serde(rename = "lastTransactions")]
    pub last_transactions: Option<Vec<LastTransactionsItem>>,
}

/// Most recent signed transaction and renewal information of a subscription
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct LastTransactionsItem {
    #[serde(rename = "originalTransactionId")]
    pub original_transaction_id: Option<String>,
    pub status: Option<Status>,
    #[serde(rename = "signedRenewalInfo")]
    pub signed_renewal_info: Option<String>,
    #[serde(rename = "signedTransactionInfo")]
    pub signed_transaction_info: Option<String>,
}

impl LastTransactionsItem {
    /// Verify and decode `signedTransactionInfo`
    pub fn decode_transaction_info(
        &self,
        verifier: &SignedDataVerifier,
    ) -> Result<JwsTransactionDecodedPayload> {
        decode_signed(
            "signedTransactionInfo",
            self.signed_transaction_info.as_deref(),
            verifier,
        )
    }

    /// Verify and decode `signedRenewalInfo`
    pub fn decode_renewal_info(
        &self,
        verifier: &SignedDataVerifier,
    ) -> Result<JwsRenewalInfoDecodedPayload> {
        decode_signed(
            "signedRenewalInfo",
            self.signed_renewal_info.as_deref(),
            verifier,
        )
    }
}
