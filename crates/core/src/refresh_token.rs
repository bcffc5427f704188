//! Refresh-token value generation and at-rest hashing.
//!
//! Refresh tokens are opaque 256-bit random values, URL-safe base64 encoded.
//! Only their SHA-256 hex digest is persisted, so a database leak does not
//! compromise active sessions. The plaintext is handed to the client exactly
//! once and never derived from any user attribute.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::Rng;

use crate::hashing::sha256_hex;

/// Entropy of a refresh-token value in bytes (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// The result of generating a new refresh token.
pub struct GeneratedRefreshToken {
    /// The plaintext value sent to the client (never stored).
    pub plaintext: String,
    /// SHA-256 hex digest of the plaintext (stored in the database).
    pub hash: String,
}

/// Generate a new random refresh token.
pub fn generate_refresh_token() -> GeneratedRefreshToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill(&mut bytes);

    let plaintext = URL_SAFE_NO_PAD.encode(bytes);
    let hash = hash_refresh_token(&plaintext);

    GeneratedRefreshToken { plaintext, hash }
}

/// Compute the storage digest of a presented refresh token.
///
/// Use this to compare an incoming plaintext value against the stored hash.
pub fn hash_refresh_token(plaintext: &str) -> String {
    sha256_hex(plaintext.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plaintext_is_url_safe_and_full_entropy() {
        let token = generate_refresh_token();
        // 32 bytes in unpadded base64 = 43 characters.
        assert_eq!(token.plaintext.len(), 43);
        assert!(token
            .plaintext
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn hash_matches_rehash_of_plaintext() {
        let token = generate_refresh_token();
        assert_eq!(token.hash, hash_refresh_token(&token.plaintext));
        assert_eq!(token.hash.len(), 64);
    }

    #[test]
    fn successive_tokens_differ() {
        let a = generate_refresh_token();
        let b = generate_refresh_token();
        assert_ne!(a.plaintext, b.plaintext);
        assert_ne!(a.hash, b.hash);
    }
}
