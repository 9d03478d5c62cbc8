//! Signature verification for incoming webhook requests
//!
//! Senders sign every payload with HMAC-SHA256 using the shared secret and
//! put the lowercase hex digest in the `X-Signature` header. Verification
//! recomputes the digest over the raw request body and compares in constant
//! time.
//!
//! # Important Notes
//!
//! - The digest MUST be computed on the raw request body bytes, before any
//!   JSON decoding. Re-serializing first would break valid signatures on
//!   whitespace or key-order differences.
//! - The comparison must be constant-time to prevent timing attacks.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifies the `X-Signature` header value against the request payload.
///
/// The header carries the bare hex digest (no algorithm prefix). Returns
/// `false` for undecodable hex, a digest of the wrong length, or a digest
/// that does not match; none of those cases are distinguishable to the
/// caller.
pub fn verify_signature(signature_hex: &str, payload: &[u8], secret: &str) -> bool {
    let provided_signature = match hex::decode(signature_hex) {
        Ok(sig) => sig,
        Err(_) => {
            log::warn!("failed to decode signature header as hex");
            return false;
        }
    };

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(err) => {
            log::error!("failed to create HMAC instance: {err}");
            return false;
        }
    };

    mac.update(payload);
    let computed_signature = mac.finalize().into_bytes();

    // Constant-time comparison; differing lengths resolve to false without
    // an early exit on content.
    computed_signature.ct_eq(&provided_signature[..]).into()
}

/// Computes the lowercase hex HMAC-SHA256 digest of `payload`.
pub fn sign(payload: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}
