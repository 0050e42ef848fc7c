//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use minicrm_core::authorization::{authorize, Operation};
use minicrm_core::error::CoreError;
use minicrm_core::identity::Identity;
use minicrm_core::roles::Role;
use minicrm_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Caller identity decoded from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Token subject.
    pub user_id: DbId,
    pub login: String,
    pub role: Role,
    /// The raw `Authorization` header value, forwarded to upstream services.
    pub bearer: String,
}

impl AuthUser {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.user_id,
            login: self.login.clone(),
            role: self.role,
        }
    }

    /// Reject with 403 unless the policy allows this user's role to perform
    /// `operation`.
    pub fn require(&self, operation: Operation) -> Result<(), AppError> {
        if authorize(self.role, operation).is_allowed() {
            Ok(())
        } else {
            tracing::debug!(user_id = self.user_id, role = %self.role, %operation, "Access denied");
            Err(AppError::Core(CoreError::Forbidden(format!(
                "Role '{}' may not {}",
                self.role,
                operation.to_string().to_lowercase()
            ))))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let identity = state.auth.verify(token.trim())?;

        Ok(AuthUser {
            user_id: identity.id,
            login: identity.login,
            role: identity.role,
            bearer: auth_header.to_string(),
        })
    }
}
