//! Webhook signature checking.
//!
//! WARNING: `PermissiveVerifier` performs no cryptographic verification. It
//! records which transmission headers arrived and accepts every event. A real
//! implementation must validate `paypal-transmission-sig` against the
//! certificate at `paypal-cert-url` (or call the processor's
//! verify-webhook-signature API) and plug in through `SignatureVerifier`.

use axum::http::HeaderMap;
use tracing::{debug, warn};

/// Transmission headers attached to every PayPal webhook delivery.
pub const TRANSMISSION_HEADERS: [&str; 5] = [
    "paypal-transmission-id",
    "paypal-transmission-time",
    "paypal-transmission-sig",
    "paypal-cert-url",
    "paypal-auth-algo",
];

/// Outcome of a signature check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureCheck {
    pub valid: bool,
    pub missing_headers: Vec<&'static str>,
}

pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, headers: &HeaderMap, body: &[u8]) -> SignatureCheck;
}

/// Accepts every event. Logs header presence only.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveVerifier;

impl SignatureVerifier for PermissiveVerifier {
    fn verify(&self, headers: &HeaderMap, _body: &[u8]) -> SignatureCheck {
        let mut missing_headers = Vec::new();
        for name in TRANSMISSION_HEADERS {
            let present = headers.contains_key(name);
            debug!(header = name, present, "webhook transmission header");
            if !present {
                missing_headers.push(name);
            }
        }

        if !missing_headers.is_empty() {
            warn!(
                missing = ?missing_headers,
                "webhook transmission headers missing; accepting anyway (signature check is permissive)"
            );
        }

        SignatureCheck {
            valid: true,
            missing_headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_permissive_verifier_always_valid() {
        let verifier = PermissiveVerifier;

        let check = verifier.verify(&HeaderMap::new(), b"{}");
        assert!(check.valid);
        assert_eq!(check.missing_headers, TRANSMISSION_HEADERS.to_vec());

        let mut headers = HeaderMap::new();
        for name in TRANSMISSION_HEADERS {
            headers.insert(name, HeaderValue::from_static("x"));
        }
        let check = verifier.verify(&headers, b"{}");
        assert!(check.valid);
        assert!(check.missing_headers.is_empty());
    }
}
