//! Status code and body mapping of [`AppError`], without a database.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use minicrm_api::assistant::FALLBACK_RESPONSE;
use minicrm_api::error::AppError;
use minicrm_core::error::CoreError;
use minicrm_db::RepoError;

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn core_errors_map_to_status_and_code() {
    let cases = [
        (
            AppError::Core(CoreError::NotFound { entity: "Client", id: 7 }),
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
        ),
        (
            AppError::Core(CoreError::Validation("title: must not be blank".into())),
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
        ),
        (
            AppError::Core(CoreError::Conflict("still referenced".into())),
            StatusCode::CONFLICT,
            "CONFLICT",
        ),
        (
            AppError::Core(CoreError::InvalidCredentials),
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
        ),
        (
            AppError::Core(CoreError::TokenExpired),
            StatusCode::UNAUTHORIZED,
            "TOKEN_EXPIRED",
        ),
        (
            AppError::Core(CoreError::Forbidden("admin only".into())),
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
        ),
        (
            AppError::BadRequest("Message requis".into()),
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
        ),
    ];

    for (err, status, code) in cases {
        let (actual_status, body) = render(err).await;
        assert_eq!(actual_status, status);
        assert_eq!(body["code"], code);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn not_found_message_names_entity_and_id() {
    let (_, body) = render(AppError::Core(CoreError::NotFound { entity: "Contract", id: 42 })).await;
    assert_eq!(body["error"], "Contract with id 42 not found");
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let (status, body) = render(AppError::InternalError("db password is hunter2".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "An internal error occurred");

    let (status, body) = render(AppError::Core(CoreError::Internal("stack trace".into()))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_ERROR");
    assert_eq!(body["error"], "An internal error occurred");
}

#[tokio::test]
async fn upstream_failure_carries_fallback_text() {
    let (status, body) = render(AppError::UpstreamUnavailable("timed out".into())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["response"], FALLBACK_RESPONSE);
    assert_eq!(body["error"], "timed out");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn check_constraint_violation_maps_to_400(pool: sqlx::PgPool) {
    let (client_id,): (i64,) = sqlx::query_as("INSERT INTO clients (name) VALUES ('Acme') RETURNING id")
        .fetch_one(&pool)
        .await
        .unwrap();
    let err = sqlx::query(
        "INSERT INTO contracts (client_id, title, amount, start_date, end_date)
         VALUES ($1, 'Backwards', 1, '2026-06-01', '2026-01-01')",
    )
    .bind(client_id)
    .execute(&pool)
    .await
    .unwrap_err();

    let (status, body) = render(AppError::Database(err)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("ck_contracts_date_range"));
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let (status, _) = render(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn repo_errors_keep_their_domain_meaning() {
    let err: AppError = RepoError::Core(CoreError::Conflict("dup".into())).into();
    assert_matches!(err, AppError::Core(CoreError::Conflict(_)));

    let err: AppError = RepoError::Database(sqlx::Error::RowNotFound).into();
    assert_matches!(err, AppError::Database(sqlx::Error::RowNotFound));
}
