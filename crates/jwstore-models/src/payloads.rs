//! Decoded JWS payloads
//!
//! The App Store omits fields that do not apply to a transaction, so every
//! field is optional. Dates are UNIX times in milliseconds; prices are in
//! milli units of `currency`.

use crate::types::{
    AutoRenewStatus, Environment, ExpirationIntent, OfferDiscountType, OfferType,
    PriceIncreaseStatus, PurchaseType,
};
use miniserde::{Deserialize, Serialize};

/// Transaction information signed by the App Store
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct JwsTransactionDecodedPayload {
    /// UUID the app associated with the customer at purchase time
    #[serde(rename = "appAccountToken")]
    pub app_account_token: Option<String>,
    #[serde(rename = "bundleId")]
    pub bundle_id: Option<String>,
    /// ISO 4217 code, present only if `price` is present
    pub currency: Option<String>,
    pub environment: Option<Environment>,
    #[serde(rename = "expiresDate")]
    pub expires_date: Option<i64>,
    /// `PURCHASED` or `FAMILY_SHARED`
    #[serde(rename = "inAppOwnershipType")]
    pub in_app_ownership_type: Option<String>,
    #[serde(rename = "isUpgraded")]
    pub is_upgraded: Option<bool>,
    #[serde(rename = "offerDiscountType")]
    pub offer_discount_type: Option<OfferDiscountType>,
    #[serde(rename = "offerIdentifier")]
    pub offer_identifier: Option<String>,
    #[serde(rename = "offerType")]
    pub offer_type: Option<OfferType>,
    #[serde(rename = "originalPurchaseDate")]
    pub original_purchase_date: Option<i64>,
    #[serde(rename = "originalTransactionId")]
    pub original_transaction_id: Option<String>,
    pub price: Option<i64>,
    #[serde(rename = "productId")]
    pub product_id: Option<String>,
    #[serde(rename = "purchaseDate")]
    pub purchase_date: Option<i64>,
    pub quantity: Option<i32>,
    #[serde(rename = "revocationDate")]
    pub revocation_date: Option<i64>,
    #[serde(rename = "revocationReason")]
    pub revocation_reason: Option<i32>,
    #[serde(rename = "signedDate")]
    pub signed_date: Option<i64>,
    pub storefront: Option<String>,
    #[serde(rename = "storefrontId")]
    pub storefront_id: Option<String>,
    #[serde(rename = "subscriptionGroupIdentifier")]
    pub subscription_group_identifier: Option<String>,
    #[serde(rename = "transactionId")]
    pub transaction_id: Option<String>,
    /// `PURCHASE` or `RENEWAL`
    #[serde(rename = "transactionReason")]
    pub transaction_reason: Option<String>,
    #[serde(rename = "type")]
    pub purchase_type: Option<PurchaseType>,
    #[serde(rename = "webOrderLineItemId")]
    pub web_order_line_item_id: Option<String>,
}

/// Subscription renewal information signed by the App Store
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct JwsRenewalInfoDecodedPayload {
    /// Product that renews at the next billing period
    #[serde(rename = "autoRenewProductId")]
    pub auto_renew_product_id: Option<String>,
    #[serde(rename = "autoRenewStatus")]
    pub auto_renew_status: Option<AutoRenewStatus>,
    /// Currency of `renewal_price`
    pub currency: Option<String>,
    #[serde(rename = "eligibleWinBackOfferIds")]
    pub eligible_win_back_offer_ids: Option<Vec<String>>,
    pub environment: Option<Environment>,
    #[serde(rename = "expirationIntent")]
    pub expiration_intent: Option<ExpirationIntent>,
    #[serde(rename = "gracePeriodExpiresDate")]
    pub grace_period_expires_date: Option<i64>,
    #[serde(rename = "isInBillingRetryPeriod")]
    pub is_in_billing_retry_period: Option<bool>,
    #[serde(rename = "offerDiscountType")]
    pub offer_discount_type: Option<OfferDiscountType>,
    #[serde(rename = "offerIdentifier")]
    pub offer_identifier: Option<String>,
    #[serde(rename = "offerType")]
    pub offer_type: Option<OfferType>,
    #[serde(rename = "originalTransactionId")]
    pub original_transaction_id: Option<String>,
    #[serde(rename = "priceIncreaseStatus")]
    pub price_increase_status: Option<PriceIncreaseStatus>,
    #[serde(rename = "productId")]
    pub product_id: Option<String>,
    /// Earliest start date ignoring lapses of 60 days or fewer
    #[serde(rename = "recentSubscriptionStartDate")]
    pub recent_subscription_start_date: Option<i64>,
    #[serde(rename = "renewalDate")]
    pub renewal_date: Option<i64>,
    #[serde(rename = "renewalPrice")]
    pub renewal_price: Option<i64>,
    #[serde(rename = "signedDate")]
    pub signed_date: Option<i64>,
}
