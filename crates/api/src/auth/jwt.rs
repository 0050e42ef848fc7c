//! Signed session tokens.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload. There
//! is no server-side session store: a token stays valid until `exp`.
//! Expiry is checked against an injected [`Clock`] rather than the
//! library's wall-clock check.

use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use minicrm_core::clock::Clock;
use minicrm_core::identity::Identity;
use minicrm_core::roles::Role;
use minicrm_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload of a Mini CRM access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    pub login: String,
    pub role: Role,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    /// Issue time, seconds since the epoch.
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Signing parameters for access tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 key shared by signing and verification.
    pub secret: String,
    /// Token lifetime in minutes (default: 480).
    pub expiry_mins: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Bad signature, malformed token or unexpected claims.
    #[error("invalid token")]
    Invalid,

    #[error("token expired")]
    Expired,
}

/// Issues and checks session tokens.
pub trait TokenCodec: Send + Sync {
    /// Sign a token for `identity` valid for `ttl` from now.
    fn sign(&self, identity: &Identity, ttl: chrono::Duration) -> Result<String, TokenError>;

    /// Check the signature and expiry of `token` and return its identity.
    fn verify(&self, token: &str) -> Result<Identity, TokenError>;
}

/// HS256 implementation of [`TokenCodec`].
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtCodec {
    pub fn new(secret: &str, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock,
        }
    }
}

impl TokenCodec for JwtCodec {
    fn sign(&self, identity: &Identity, ttl: chrono::Duration) -> Result<String, TokenError> {
        let now = self.clock.now().timestamp();
        let claims = Claims {
            sub: identity.id,
            login: identity.login.clone(),
            role: identity.role,
            exp: now + ttl.num_seconds(),
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!(error = %e, "Token encoding failed");
            TokenError::Invalid
        })
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenError::Invalid)?
            .claims;

        if claims.exp <= self.clock.now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(Identity {
            id: claims.sub,
            login: claims.login,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use minicrm_core::clock::FixedClock;

    use super::*;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    fn fixed_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::at(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()))
    }

    fn identity() -> Identity {
        Identity {
            id: 42,
            login: "jury".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn sign_then_verify_round_trips() {
        let codec = JwtCodec::new(SECRET, fixed_clock());
        let token = codec.sign(&identity(), Duration::minutes(480)).unwrap();

        assert_eq!(codec.verify(&token).unwrap(), identity());
        // Verification is stateless and repeatable.
        assert_eq!(codec.verify(&token).unwrap(), identity());
    }

    #[test]
    fn expires_exactly_at_exp() {
        let clock = fixed_clock();
        let codec = JwtCodec::new(SECRET, clock.clone());
        let token = codec.sign(&identity(), Duration::minutes(10)).unwrap();

        clock.advance(Duration::minutes(10) - Duration::seconds(1));
        assert!(codec.verify(&token).is_ok());

        clock.advance(Duration::seconds(1));
        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn different_secret_is_invalid() {
        let clock = fixed_clock();
        let token = JwtCodec::new("secret-alpha", clock.clone())
            .sign(&identity(), Duration::minutes(5))
            .unwrap();

        let other = JwtCodec::new("secret-bravo", clock);
        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn garbage_is_invalid() {
        let codec = JwtCodec::new(SECRET, fixed_clock());
        assert_eq!(codec.verify("not.a.token"), Err(TokenError::Invalid));
        assert_eq!(codec.verify(""), Err(TokenError::Invalid));
    }

    #[test]
    fn claims_carry_login_and_role() {
        let codec = JwtCodec::new(SECRET, fixed_clock());
        let token = codec.sign(&identity(), Duration::minutes(1)).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let claims = decode::<Claims>(&token, &DecodingKey::from_secret(SECRET.as_bytes()), &validation)
            .unwrap()
            .claims;
        assert_eq!(claims.login, "jury");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, 60);
        assert!(!claims.jti.is_empty());
    }
}
