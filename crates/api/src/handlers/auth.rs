//! Handlers for the `/auth` resource (login, current identity).
//!
//! Logout is client-side: tokens are stateless and simply discarded.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use minicrm_core::activity::activity_types;
use minicrm_core::identity::Identity;
use minicrm_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::activity::{self, Subject};
use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// `POST /auth/login` body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "not_blank"))]
    pub login: String,
    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: Identity,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate with login + password. Returns a signed token.
pub async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let outcome = state.auth.login(&input.login, &input.password).await?;

    tracing::info!(
        user_id = outcome.identity.id,
        login = %outcome.identity.login,
        "User logged in"
    );
    activity::record_as(
        &state.pool,
        &outcome.identity.login,
        activity_types::LOGIN,
        Some(Subject::new("user", outcome.identity.id)),
        format!("{} signed in", outcome.identity.login),
    )
    .await;

    Ok(Json(AuthResponse {
        token: outcome.token,
        expires_in: outcome.expires_in,
        user: outcome.identity,
    }))
}

/// GET /api/auth/me
///
/// Identity carried by the presented token.
pub async fn me(RequireAuth(user): RequireAuth) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: user.identity(),
    }))
}
