//! RS256 access-token signer.
//!
//! Access tokens are JWTs signed with an RSA private key and verified with
//! the matching public key, so downstream services can validate tokens with
//! the public half alone. Key material is parsed once at startup and held
//! immutably for the lifetime of the process; a bad key fails startup, not
//! a request.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use keygate_core::error::AuthError;
use keygate_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit correlation.
    pub jti: String,
}

/// Issues and verifies RS256 access tokens.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// Build a signer from PEM-encoded RSA key material.
    ///
    /// `private_pem` accepts PKCS#1 or PKCS#8 RSA private keys;
    /// `public_pem` accepts an SPKI public key. Malformed key material is
    /// reported here so callers can treat it as a startup failure.
    pub fn from_pem(
        private_pem: &[u8],
        public_pem: &[u8],
        access_token_expiry_mins: i64,
    ) -> Result<Self, AuthError> {
        let encoding = EncodingKey::from_rsa_pem(private_pem).map_err(|e| AuthError::Signing {
            reason: format!("invalid RSA private key: {e}"),
        })?;
        let decoding = DecodingKey::from_rsa_pem(public_pem).map_err(|e| AuthError::Signing {
            reason: format!("invalid RSA public key: {e}"),
        })?;

        Ok(TokenSigner {
            encoding,
            decoding,
            validation: Validation::new(Algorithm::RS256),
            ttl_secs: access_token_expiry_mins * 60,
        })
    }

    /// Issue an access token for the given user.
    pub fn issue(&self, user_id: DbId) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            exp: now + self.ttl_secs,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding).map_err(|e| {
            AuthError::Signing {
                reason: e.to_string(),
            }
        })
    }

    /// Validate an access token and return its claims.
    ///
    /// Distinguishes the three failure modes the rest of the service keys
    /// off: undecodable input, a signature that does not verify, and a
    /// token whose `exp` has passed.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
                _ => AuthError::TokenMalformed,
            })
    }

    /// Access-token lifetime in seconds, for `expires_in` response fields.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const PRIVATE_PEM: &str =
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/test_rsa_private.pem"));
    const PUBLIC_PEM: &str =
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/test_rsa_public.pem"));
    const OTHER_PRIVATE_PEM: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/other_rsa_private.pem"
    ));

    fn test_signer() -> TokenSigner {
        TokenSigner::from_pem(PRIVATE_PEM.as_bytes(), PUBLIC_PEM.as_bytes(), 60)
            .expect("fixture keys should parse")
    }

    #[test]
    fn issue_then_verify_reports_same_subject() {
        let signer = test_signer();
        let token = signer.issue(42).expect("issuing should succeed");

        let claims = signer.verify(&token).expect("verification should succeed");
        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn expired_token_fails_with_token_expired() {
        let signer = test_signer();

        // Craft a token whose exp is well past the default 60-second leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let encoding = EncodingKey::from_rsa_pem(PRIVATE_PEM.as_bytes()).unwrap();
        let token = encode(&Header::new(Algorithm::RS256), &claims, &encoding)
            .expect("encoding should succeed");

        assert_matches!(signer.verify(&token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn token_signed_with_other_key_fails_signature_check() {
        let signer = test_signer();

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            exp: now + 3600,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };
        let other = EncodingKey::from_rsa_pem(OTHER_PRIVATE_PEM.as_bytes()).unwrap();
        let forged = encode(&Header::new(Algorithm::RS256), &claims, &other)
            .expect("encoding should succeed");

        assert_matches!(signer.verify(&forged), Err(AuthError::SignatureInvalid));
    }

    #[test]
    fn garbage_input_is_malformed() {
        let signer = test_signer();
        assert_matches!(signer.verify("not-a-jwt"), Err(AuthError::TokenMalformed));
        assert_matches!(signer.verify(""), Err(AuthError::TokenMalformed));
    }

    #[test]
    fn bad_key_material_fails_construction() {
        let result = TokenSigner::from_pem(b"garbage", PUBLIC_PEM.as_bytes(), 60);
        assert_matches!(result, Err(AuthError::Signing { .. }));
    }

    #[test]
    fn ttl_is_reported_in_seconds() {
        let signer = test_signer();
        assert_eq!(signer.ttl_secs(), 3600);
    }
}
