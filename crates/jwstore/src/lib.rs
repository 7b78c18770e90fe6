//! Verification of App Store signed data and issuance of App Store Server
//! API bearer tokens.
//!
//! Signed data arrives as a compact JWS whose header carries an `x5c`
//! certificate chain. [`SignedDataVerifier`] only returns a payload after
//! the chain has been validated against a pinned root and the signature
//! has been checked with the leaf key:
//!
//! ```text
//! token ── parse ──▶ header / payload / alg / signature
//!                       │ x5c[0] leaf, x5c[1] intermediate
//!                       ▼
//!               chain to pinned root ──▶ leaf public key
//!                       │
//!                       ▼
//!               verify signature ──▶ SignedData<T> (valid)
//! ```
//!
//! ```ignore
//! use jwstore::SignedDataVerifier;
//!
//! let verifier = SignedDataVerifier::new()?;
//! let data = verifier.verify::<MyPayload>(&signed_transaction_info)?;
//! println!("{:?}", data.payload());
//! ```

mod error;

// Internal modules
pub(crate) mod algorithm;
pub(crate) mod bearer;
pub(crate) mod certificate;
pub(crate) mod chain;
pub(crate) mod token;
pub(crate) mod trust;
pub(crate) mod utils;
pub(crate) mod verifier;

// Public Interface
pub use algorithm::{AlgorithmPolicy, AlgorithmType, Curve, VerifyingKey};
pub use bearer::{APP_STORE_CONNECT_AUDIENCE, BearerTokenIssuer, SigningIdentity, SigningKey};
pub use certificate::Certificate;
pub use error::{Error, ErrorKind, Result};
pub use trust::{APPLE_ROOT_CA_G3, TrustStore};
pub use verifier::{SignedData, SignedDataVerifier};

pub(crate) mod limits;
