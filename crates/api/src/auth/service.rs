//! Login and token verification.
//!
//! [`AuthService`] is assembled from three capabilities so each can be
//! swapped in tests: a [`CredentialStore`] for user lookup, a
//! [`PasswordHasher`] and a [`TokenCodec`].

use std::sync::Arc;

use async_trait::async_trait;
use minicrm_core::error::CoreError;
use minicrm_core::identity::Identity;
use minicrm_db::models::user::User;
use minicrm_db::repositories::UserRepo;
use minicrm_db::DbPool;

use super::jwt::{TokenCodec, TokenError};
use super::password::{PasswordError, PasswordHasher};
use crate::error::{AppError, AppResult};

/// Lookup of persisted credentials by login.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, sqlx::Error>;
}

/// [`CredentialStore`] backed by the `users` table.
pub struct PgCredentialStore {
    pool: DbPool,
}

impl PgCredentialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_login(&self.pool, login).await
    }
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub identity: Identity,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    codec: Arc<dyn TokenCodec>,
    token_ttl: chrono::Duration,
    /// Verified against when the login is unknown, so both failure paths pay
    /// for one digest check.
    dummy_digest: String,
}

impl AuthService {
    /// Hashes a throwaway password once to build the unknown-login digest.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<dyn TokenCodec>,
        token_ttl: chrono::Duration,
    ) -> Result<Self, PasswordError> {
        let dummy_digest = hasher.hash("minicrm-unknown-login")?;
        Ok(Self {
            store,
            hasher,
            codec,
            token_ttl,
            dummy_digest,
        })
    }

    /// Check `password` against the stored digest for `login` and issue a
    /// token. Unknown logins and wrong passwords fail identically with
    /// `InvalidCredentials`.
    pub async fn login(&self, login: &str, password: &str) -> AppResult<LoginOutcome> {
        let Some(user) = self.store.find_by_login(login).await? else {
            self.verify_password(password, &self.dummy_digest).await?;
            return Err(CoreError::InvalidCredentials.into());
        };

        if !self.verify_password(password, &user.password_hash).await? {
            return Err(CoreError::InvalidCredentials.into());
        }

        let identity = Identity {
            id: user.id,
            login: user.login,
            role: user.role,
        };
        let token = self
            .codec
            .sign(&identity, self.token_ttl)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

        Ok(LoginOutcome {
            token,
            identity,
            expires_in: self.token_ttl.num_seconds(),
        })
    }

    /// Validate a bearer token.
    pub fn verify(&self, token: &str) -> Result<Identity, CoreError> {
        self.codec.verify(token).map_err(|e| match e {
            TokenError::Expired => CoreError::TokenExpired,
            TokenError::Invalid => CoreError::Unauthorized("Invalid token".into()),
        })
    }

    /// Digest a new password on the blocking pool.
    pub async fn hash_password(&self, plain: &str) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let plain = plain.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|e| AppError::InternalError(format!("Hashing task failed: {e}")))?
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    async fn verify_password(&self, plain: &str, digest: &str) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let plain = plain.to_owned();
        let digest = digest.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&plain, &digest))
            .await
            .map_err(|e| AppError::InternalError(format!("Verification task failed: {e}")))?
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
    }
}
