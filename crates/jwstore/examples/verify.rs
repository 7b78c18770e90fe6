//! Verify App Store signed data read from stdin
//!
//! ```not_rust
//! echo "$SIGNED_TRANSACTION" | cargo run --example verify
//! ```
//!
//! With `--issue <key.p8> <key id> <issuer id> <bundle id>` a bearer token
//! for the App Store Server API is printed instead.

use std::io::Read;

use jwstore::{BearerTokenIssuer, SignedDataVerifier, SigningIdentity, SigningKey};
use miniserde::json::Object;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jwstore=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [flag, key_path, key_id, issuer_id, bundle_id] = args.as_slice() {
        if flag == "--issue" {
            let identity = SigningIdentity::new(key_id, issuer_id, bundle_id)
                .private_key(SigningKey::from_file(key_path)?);
            println!("{}", BearerTokenIssuer::new().issue(&identity)?);
            return Ok(());
        }
    }

    let mut token = String::new();
    std::io::stdin().read_to_string(&mut token)?;

    let verifier = SignedDataVerifier::new()?;
    match verifier.verify::<Object>(token.trim()) {
        Ok(data) => {
            println!("{}", miniserde::json::to_string(data.payload()));
            Ok(())
        }
        Err(e) => {
            tracing::warn!(kind = ?e.kind(), "verification failed: {e}");
            Err(e.into())
        }
    }
}
