use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use minicrm_core::error::CoreError;
use minicrm_core::validation::describe;
use minicrm_db::RepoError;
use serde::Serialize;

use crate::assistant::FALLBACK_RESPONSE;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Error type returned by every handler.
///
/// Domain failures arrive as [`CoreError`] (directly or through
/// [`RepoError`]); the remaining variants are HTTP concerns. Rendered as
/// `{"error": ..., "code": ...}`, except [`AppError::UpstreamUnavailable`]
/// which keeps the assistant's `{"response": ...}` shape.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request that never reached domain validation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Assistant unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Core(core) => AppError::Core(core),
            RepoError::Database(db) => AppError::Database(db),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(describe(&errors)))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

#[derive(Serialize)]
struct FallbackBody<'a> {
    response: &'static str,
    error: &'a str,
}

impl AppError {
    /// Status, machine-readable code and client-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::UpstreamUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_UNAVAILABLE", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if let AppError::UpstreamUnavailable(_) = self {
            tracing::warn!(error = %message, "Assistant upstream unavailable");
            let body = FallbackBody {
                response: FALLBACK_RESPONSE,
                error: &message,
            };
            return (status, Json(body)).into_response();
        }

        (status, Json(ErrorBody { error: message, code })).into_response()
    }
}

fn core_parts(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::InvalidCredentials => {
            (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", err.to_string())
        }
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED", err.to_string()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Map a sqlx error to a response.
///
/// Unique violations on `uq_*` constraints and foreign key violations are
/// conflicts (409). A failed `ck_*` check constraint is a validation error
/// (400). Anything else is logged and sanitized to a 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some("23505") if constraint.starts_with("uq_") => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates {constraint}"),
                ),
                Some("23503") => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Record is still referenced ({constraint})"),
                ),
                // check_violation
                Some("23514") if constraint.starts_with("ck_") => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Value rejected by {constraint}"),
                ),
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    internal()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
