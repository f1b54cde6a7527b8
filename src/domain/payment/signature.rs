//! Shared-secret request hashing and secret comparison.
//!
//! The processor authenticates a payment request by recomputing
//! `sha256(query + "&secret=" + secret)`. This is a plain digest over
//! secret-concatenated plaintext, not an HMAC; the exact byte construction
//! is required for interoperability with the live API.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Computes the lowercase hex request hash for a serialized query string.
pub fn request_hash(query: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(query.as_bytes());
    hasher.update(b"&secret=");
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Exact comparison of an offered secret with the configured one.
///
/// Runs in constant time for equal-length inputs.
pub fn secrets_match(offered: &str, expected: &str) -> bool {
    let a = offered.as_bytes();
    let b = expected.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Short, non-reversible identifier of a secret value for log lines.
pub fn fingerprint(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    hex::encode(&digest[..4])
}
