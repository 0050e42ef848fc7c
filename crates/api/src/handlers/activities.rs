//! Handler for the recent-activity feed.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use minicrm_core::activity::clamp_recent_limit;
use minicrm_db::repositories::ActivityRepo;

use crate::middleware::rbac::{perm, Authorized};
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/activities/recent?limit=10
///
/// Newest first. The feed is decorative: a storage failure yields an empty
/// list with 200 and a server-side warning.
pub async fn recent(
    _auth: Authorized<perm::ActivityRead>,
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> impl IntoResponse {
    let limit = clamp_recent_limit(params.limit);
    let activities = ActivityRepo::recent(&state.pool, limit)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load recent activities");
            Vec::new()
        });
    Json(DataResponse { data: activities })
}
