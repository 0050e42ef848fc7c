//! Admin-only user management.
//!
//! Users are never deleted; the password hash never leaves the server.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use minicrm_core::activity::activity_types;
use minicrm_core::error::CoreError;
use minicrm_core::roles::Role;
use minicrm_core::types::DbId;
use minicrm_core::validation::not_blank;
use minicrm_db::models::user::{CreateUser, UserResponse};
use minicrm_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::activity::{self, Subject};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::rbac::{perm, Authorized};
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "user";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub login: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
    /// Defaults to `user`.
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/users
pub async fn list(
    _auth: Authorized<perm::UserRead>,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users: Vec<UserResponse> = UserRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/users
///
/// 409 if the login is taken.
pub async fn create(
    auth: Authorized<perm::UserCreate>,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let password_hash = state.auth.hash_password(&input.password).await?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            login: input.login.trim().to_string(),
            password_hash,
            role: input.role.unwrap_or(Role::User),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, created_by = auth.user.user_id, "User created");
    activity::record(
        &state.pool,
        &auth.user,
        activity_types::USER_CREATE,
        Subject::new(ENTITY, user.id),
        format!("User '{}' created with role {}", user.login, user.role),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// PUT /api/users/{id}/role
pub async fn update_role(
    auth: Authorized<perm::UserUpdate>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateRoleRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::update_role(&state.pool, id, input.role)
        .await?
        .ok_or_else(|| not_found(id))?;

    activity::record(
        &state.pool,
        &auth.user,
        activity_types::USER_ROLE_CHANGE,
        Subject::new(ENTITY, id),
        format!("User '{}' is now {}", user.login, user.role),
    )
    .await;

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// PUT /api/users/{id}/password
pub async fn reset_password(
    auth: Authorized<perm::UserUpdate>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    let password_hash = state.auth.hash_password(&input.password).await?;
    if !UserRepo::update_password(&state.pool, id, &password_hash).await? {
        return Err(not_found(id));
    }

    tracing::info!(user_id = id, reset_by = auth.user.user_id, "Password reset");
    activity::record(
        &state.pool,
        &auth.user,
        activity_types::USER_PASSWORD_RESET,
        Subject::new(ENTITY, id),
        format!("Password reset for user {id}"),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
