//! Typed App Store Server API payloads
//!
//! Decode targets for App Store signed data plus the response bodies that
//! carry it. Signed fields are only ever turned into payloads through a
//! [`jwstore::SignedDataVerifier`]:
//!
//! ```ignore
//! use jwstore::SignedDataVerifier;
//! use jwstore_models::StatusResponse;
//!
//! let verifier = SignedDataVerifier::new()?;
//! let response: StatusResponse = miniserde::json::from_str(&body)?;
//! for group in response.data.unwrap_or_default() {
//!     for item in group.last_transactions.unwrap_or_default() {
//!         let renewal = item.decode_renewal_info(&verifier)?;
//!         println!("{:?}", renewal.auto_renew_status);
//!     }
//! }
//! ```

mod error;
mod payloads;
mod responses;
mod types;

pub use error::{DecodeError, Result};
pub use payloads::{JwsRenewalInfoDecodedPayload, JwsTransactionDecodedPayload};
pub use responses::{
    ErrorPayload, LastTransactionsItem, StatusResponse, SubscriptionGroupIdentifierItem,
    TransactionInfoResponse,
};
pub use types::{
    AutoRenewStatus, Environment, ExpirationIntent, OfferDiscountType, OfferType,
    PriceIncreaseStatus, PurchaseType, Status,
};
