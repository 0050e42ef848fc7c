use std::sync::Arc;

use minicrm_core::clock::{Clock, SystemClock};

use crate::assistant::{AssistantClient, AssistantError};
use crate::auth::jwt::JwtCodec;
use crate::auth::password::{Argon2Hasher, PasswordError};
use crate::auth::service::{AuthService, PgCredentialStore};
use crate::config::ServerConfig;

/// Failure while wiring [`AppState`].
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Assistant(#[from] AssistantError),
}

/// Handler state. Cloned per request, so everything heavy sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL pool.
    pub pool: minicrm_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Login and token verification.
    pub auth: Arc<AuthService>,
    /// HTTP client for the conversational upstream.
    pub assistant: Arc<AssistantClient>,
}

impl AppState {
    /// Wire the production capabilities: Postgres credential store, Argon2id
    /// hashing and HS256 tokens on the system clock.
    pub fn new(pool: minicrm_db::DbPool, config: ServerConfig) -> Result<Self, StateError> {
        Self::with_clock(pool, config, Arc::new(SystemClock))
    }

    /// Same as [`AppState::new`] with an explicit token clock.
    pub fn with_clock(
        pool: minicrm_db::DbPool,
        config: ServerConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StateError> {
        let auth = AuthService::new(
            Arc::new(PgCredentialStore::new(pool.clone())),
            Arc::new(Argon2Hasher),
            Arc::new(JwtCodec::new(&config.jwt.secret, clock)),
            chrono::Duration::minutes(config.jwt.expiry_mins),
        )?;
        let assistant = AssistantClient::new(&config.assistant)?;

        Ok(Self {
            pool,
            config: Arc::new(config),
            auth: Arc::new(auth),
            assistant: Arc::new(assistant),
        })
    }
}
