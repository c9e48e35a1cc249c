//! Session token signing and verification.
//!
//! Tokens are HS256 JWTs carrying a [`Claims`] payload. Verification is
//! deliberately infallible in shape: any bad token, whether malformed,
//! tampered with, or expired, comes back as `None` and the caller treats the
//! request as unauthenticated.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};

use crate::error::AppError;
use crate::models::{Claims, SessionUser};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Signs and verifies session tokens with a shared secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &SecretString, ttl_days: i64) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_seconds: ttl_days * SECONDS_PER_DAY,
        }
    }

    /// Token lifetime in seconds, also used for the cookie max-age.
    #[must_use]
    pub const fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Sign a fresh token for the given user snapshot.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if signing fails.
    pub fn issue(&self, user: SessionUser) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user,
            iat: now,
            exp: now + self.ttl_seconds,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| AppError::Internal("failed to sign session token".to_owned()))
    }

    /// Decode and validate a token, returning its claims.
    ///
    /// Returns `None` for anything that is not a currently valid token.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use veranda_core::{Email, Role, UserId};

    fn service() -> TokenService {
        TokenService::new(&SecretString::from("test-secret-for-tokens"), 7)
    }

    fn session_user() -> SessionUser {
        SessionUser {
            id: UserId::new("u-1".to_owned()),
            email: Email::parse("admin@example.com").unwrap(),
            name: Some("Administrator".to_owned()),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let service = service();
        let token = service.issue(session_user()).unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.user, session_user());
        assert_eq!(claims.exp - claims.iat, 7 * SECONDS_PER_DAY);
    }

    #[test]
    fn test_verify_rejects_garbage_and_tampering() {
        let service = service();
        assert!(service.verify("").is_none());
        assert!(service.verify("not.a.token").is_none());

        let mut token = service.issue(session_user()).unwrap();
        token.push('x');
        assert!(service.verify(&token).is_none());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = service().issue(session_user()).unwrap();
        let other = TokenService::new(&SecretString::from("a-different-secret"), 7);
        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let service = service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            user: session_user(),
            iat: now - 10 * SECONDS_PER_DAY,
            exp: now - 3 * SECONDS_PER_DAY,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret-for-tokens"),
        )
        .unwrap();
        assert!(service.verify(&token).is_none());
    }
}
