//! Gravatar URL derivation.

use sha2::{Digest, Sha256};

use super::EmailAddress;

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar";
const AVATAR_SIZE: u16 = 520;
const AVATAR_FALLBACK: &str = "robohash";

/// Build the avatar URL for a normalised email address.
///
/// Gravatar accepts the hex SHA-256 of the trimmed, lowercased address.
///
/// # Examples
/// ```
/// use blog::domain::{EmailAddress, gravatar_url};
///
/// let url = gravatar_url(&EmailAddress::new("alice@x.com").unwrap());
/// assert!(url.starts_with("https://www.gravatar.com/avatar/"));
/// assert!(url.ends_with("?s=520&d=robohash"));
/// ```
#[must_use]
pub fn gravatar_url(email: &EmailAddress) -> String {
    let digest = Sha256::digest(email.as_ref().as_bytes());
    format!(
        "{GRAVATAR_BASE}/{}?s={AVATAR_SIZE}&d={AVATAR_FALLBACK}",
        hex::encode(digest)
    )
}
