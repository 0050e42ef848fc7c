use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Status {
    Ok,
    Degraded,
}

#[derive(Debug, Serialize)]
struct Health {
    status: Status,
    version: &'static str,
    db_healthy: bool,
}

/// GET /health
///
/// 200 when PostgreSQL answers, 503 otherwise. Public, mounted outside `/api`.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = match minicrm_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            false
        }
    };

    let (code, status) = if db_healthy {
        (StatusCode::OK, Status::Ok)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Status::Degraded)
    };

    (
        code,
        Json(Health {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
