//! Verification of delivered webhook payloads.
//!
//! Shopify signs each delivery with the app's shared secret and sends
//! `base64(HMAC-SHA256(secret, raw body))` in [`HMAC_HEADER`]. Verify against
//! the raw bytes as received; re-serialized JSON will not match.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the delivery signature.
pub const HMAC_HEADER: &str = "X-Shopify-Hmac-Sha256";

/// Computes the signature Shopify would send for `body`.
///
/// Returns `None` if the MAC rejects the key.
#[must_use]
pub fn sign_webhook_body(secret: &[u8], body: &[u8]) -> Option<String> {
    let mac = keyed_mac(secret, body)?;
    Some(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Returns true if `signature` is the valid signature of `body` under `secret`.
///
/// Comparison is constant-time. A signature that is not valid base64 is
/// rejected.
#[must_use]
pub fn verify_webhook_hmac(secret: &[u8], body: &[u8], signature: &str) -> bool {
    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        return false;
    };
    keyed_mac(secret, body).is_some_and(|mac| mac.verify_slice(&expected).is_ok())
}

/// Verifies a delivery from its headers and raw body.
///
/// Returns false when the signature header is missing or not ASCII.
#[must_use]
pub fn verify_webhook_request(secret: &[u8], headers: &http::HeaderMap, body: &[u8]) -> bool {
    headers
        .get(HMAC_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|signature| verify_webhook_hmac(secret, body, signature))
}

fn keyed_mac(secret: &[u8], body: &[u8]) -> Option<HmacSha256> {
    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(m) => m,
        Err(_) => return None,
    };
    mac.update(body);
    Some(mac)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"hush";
    const BODY: &[u8] = br#"{"id":820982911946154508,"email":"jon@doe.ca"}"#;

    #[test]
    fn signed_body_verifies() {
        let signature = sign_webhook_body(SECRET, BODY).unwrap();

        assert!(verify_webhook_hmac(SECRET, BODY, &signature));
    }

    #[test]
    fn tampered_body_is_rejected() {
        let signature = sign_webhook_body(SECRET, BODY).unwrap();

        assert!(!verify_webhook_hmac(SECRET, b"{\"id\":1}", &signature));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let signature = sign_webhook_body(b"other", BODY).unwrap();

        assert!(!verify_webhook_hmac(SECRET, BODY, &signature));
    }

    #[test]
    fn malformed_signature_is_rejected() {
        assert!(!verify_webhook_hmac(SECRET, BODY, "not base64!"));
        assert!(!verify_webhook_hmac(SECRET, BODY, ""));
    }

    #[test]
    fn known_vector() {
        // RFC 4231 test case 2, base64-encoded.
        let signature = sign_webhook_body(b"Jefe", b"what do ya want for nothing?").unwrap();

        assert_eq!(signature, "W9zBRr9gdU5qBCQmCJV1x1oAPwidJzmDnexYuWTsOEM=");
    }

    #[test]
    fn keys_of_any_length_sign() {
        for secret in [&b""[..], &[0x5a; 200][..]] {
            let signature = sign_webhook_body(secret, BODY).unwrap();

            assert!(verify_webhook_hmac(secret, BODY, &signature));
        }
    }

    #[test]
    fn request_headers_are_checked() {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            HMAC_HEADER,
            http::HeaderValue::from_str(&sign_webhook_body(SECRET, BODY).unwrap()).unwrap(),
        );

        assert!(verify_webhook_request(SECRET, &headers, BODY));
        assert!(!verify_webhook_request(SECRET, &http::HeaderMap::new(), BODY));
    }
}
