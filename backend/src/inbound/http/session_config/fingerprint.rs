//! Session key fingerprinting.
//!
//! A truncated SHA-256 digest of the signing half of the key lets operators
//! confirm which key a running instance uses without logging key material.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// Hex-encoded first eight bytes of `SHA-256(key.signing())`.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use blog::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}
