//! Enumerations used by App Store payloads
//!
//! Apple adds values to these over time, so every enum keeps unrecognized
//! wire values in an `Other` variant instead of failing the whole payload.

use miniserde::de::{Deserialize, Visitor};
use miniserde::ser::{Fragment, Serialize};
use miniserde::{Error, Result, make_place};
use std::borrow::Cow;

make_place!(Place);

/// Enum carried on the wire as an integer
macro_rules! int_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A value this crate does not know about yet
            Other(i32),
        }

        impl $name {
            /// Wire value
            pub fn code(&self) -> i32 {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Other(code) => *code,
                }
            }
        }

        impl From<i32> for $name {
            fn from(code: i32) -> Self {
                match code {
                    $($code => Self::$variant,)+
                    other => Self::Other(other),
                }
            }
        }

        impl Visitor for Place<$name> {
            fn nonnegative(&mut self, n: u64) -> Result<()> {
                let code = i32::try_from(n).map_err(|_| Error)?;
                self.out = Some($name::from(code));
                Ok(())
            }

            fn negative(&mut self, n: i64) -> Result<()> {
                let code = i32::try_from(n).map_err(|_| Error)?;
                self.out = Some($name::from(code));
                Ok(())
            }
        }

        impl Deserialize for $name {
            fn begin(out: &mut Option<Self>) -> &mut dyn Visitor {
                Place::new(out)
            }
        }

        impl Serialize for $name {
            fn begin(&self) -> Fragment<'_> {
                Fragment::I64(i64::from(self.code()))
            }
        }
    };
}

/// Enum carried on the wire as a string
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A value this crate does not know about yet
            Other(String),
        }

        impl $name {
            /// Wire value
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $value,)+
                    Self::Other(value) => value,
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $($value => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Visitor for Place<$name> {
            fn string(&mut self, s: &str) -> Result<()> {
                self.out = Some($name::from(s));
                Ok(())
            }
        }

        impl Deserialize for $name {
            fn begin(out: &mut Option<Self>) -> &mut dyn Visitor {
                Place::new(out)
            }
        }

        impl Serialize for $name {
            fn begin(&self) -> Fragment<'_> {
                Fragment::Str(Cow::Borrowed(self.as_str()))
            }
        }
    };
}

string_enum! {
    /// The server environment, either sandbox or production
    pub enum Environment {
        Production = "Production",
        Sandbox = "Sandbox",
    }
}

impl Environment {
    /// App Store Server API base URL for this environment
    ///
    /// Returns `None` for environments the API is not reachable in.
    pub fn base_url(&self) -> Option<&'static str> {
        match self {
            Self::Production => Some("https://api.storekit.itunes.apple.com"),
            Self::Sandbox => Some("https://api.storekit-sandbox.itunes.apple.com"),
            Self::Other(_) => None,
        }
    }
}

int_enum! {
    /// The status of an auto-renewable subscription
    pub enum Status {
        Active = 1,
        Expired = 2,
        BillingRetry = 3,
        BillingGracePeriod = 4,
        /// Refunded, or revoked from Family Sharing
        Revoked = 5,
    }
}

int_enum! {
    /// The renewal status of an auto-renewable subscription
    pub enum AutoRenewStatus {
        Off = 0,
        On = 1,
    }
}

int_enum! {
    /// The reason a subscription expired
    pub enum ExpirationIntent {
        CustomerCancelled = 1,
        BillingError = 2,
        CustomerDidNotConsentToPriceIncrease = 3,
        ProductNotAvailable = 4,
        OtherReason = 5,
    }
}

string_enum! {
    /// Payment mode of a subscription offer
    pub enum OfferDiscountType {
        FreeTrial = "FREE_TRIAL",
        PayAsYouGo = "PAY_AS_YOU_GO",
        PayUpFront = "PAY_UP_FRONT",
    }
}

int_enum! {
    /// The type of subscription offer
    pub enum OfferType {
        IntroductoryOffer = 1,
        PromotionalOffer = 2,
        SubscriptionOfferCode = 3,
        WinBackOffer = 4,
    }
}

int_enum! {
    /// Whether a subscription is subject to a price increase
    pub enum PriceIncreaseStatus {
        CustomerHasNotResponded = 0,
        /// Consent given, or the customer was notified of an increase that
        /// needs no consent
        CustomerConsentedOrWasNotifiedWithoutNeedingConsent = 1,
    }
}

string_enum! {
    /// The type of an In-App Purchase product
    pub enum PurchaseType {
        AutoRenewableSubscription = "Auto-Renewable Subscription",
        NonConsumable = "Non-Consumable",
        Consumable = "Consumable",
        NonRenewingSubscription = "Non-Renewing Subscription",
    }
}
