//! Handlers for the `/services` resource and its client assignments.
//!
//! `DELETE /services/{id}` deactivates; services are never removed so
//! their assignment history stays intact.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use minicrm_core::activity::activity_types;
use minicrm_core::error::CoreError;
use minicrm_core::types::DbId;
use minicrm_db::models::service::{CreateService, UpdateService};
use minicrm_db::models::service_assignment::CreateAssignment;
use minicrm_db::repositories::{ServiceAssignmentRepo, ServiceRepo, StatsRepo};

use crate::activity::{self, Subject};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::rbac::{perm, Authorized};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "service";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Service",
        id,
    })
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// GET /api/services?include_inactive=true
///
/// Each row carries `clients_count` and `revenue_total`.
pub async fn list(
    _auth: Authorized<perm::ServiceRead>,
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let services = ServiceRepo::list_with_stats(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /api/services/{id}
pub async fn get_by_id(
    _auth: Authorized<perm::ServiceRead>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: service }))
}

/// POST /api/services
pub async fn create(
    auth: Authorized<perm::ServiceCreate>,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateService>,
) -> AppResult<impl IntoResponse> {
    let service = ServiceRepo::create(&state.pool, &input).await?;

    activity::record(
        &state.pool,
        &auth.user,
        activity_types::SERVICE_CREATE,
        Subject::new(ENTITY, service.id),
        format!("Service '{}' created", service.nom),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: service })))
}

/// PUT /api/services/{id}
pub async fn update(
    auth: Authorized<perm::ServiceUpdate>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateService>,
) -> AppResult<impl IntoResponse> {
    let service = ServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    activity::record(
        &state.pool,
        &auth.user,
        activity_types::SERVICE_UPDATE,
        Subject::new(ENTITY, id),
        format!("Service '{}' updated", service.nom),
    )
    .await;

    Ok(Json(DataResponse { data: service }))
}

/// DELETE /api/services/{id}
///
/// Soft delete. Idempotent for existing services; 404 otherwise.
pub async fn deactivate(
    auth: Authorized<perm::ServiceDelete>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let service = ServiceRepo::deactivate(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(service_id = id, user_id = auth.user.user_id, "Service deactivated");
    activity::record(
        &state.pool,
        &auth.user,
        activity_types::SERVICE_DEACTIVATE,
        Subject::new(ENTITY, id),
        format!("Service '{}' deactivated", service.nom),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/services/{id}/stats
pub async fn stats(
    _auth: Authorized<perm::ServiceRead>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let stats = StatsRepo::service_stats(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

/// GET /api/services/{id}/assignments
pub async fn list_assignments(
    _auth: Authorized<perm::ServiceRead>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let assignments = ServiceAssignmentRepo::list_by_service(&state.pool, id).await?;
    Ok(Json(DataResponse { data: assignments }))
}

/// POST /api/services/{id}/assignments
///
/// 400 if the service is inactive, 409 if the client is already assigned.
pub async fn assign(
    auth: Authorized<perm::ServiceUpdate>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<CreateAssignment>,
) -> AppResult<impl IntoResponse> {
    let assignment = ServiceAssignmentRepo::create(&state.pool, id, &input).await?;

    activity::record(
        &state.pool,
        &auth.user,
        activity_types::SERVICE_ASSIGN,
        Subject::new(ENTITY, id),
        format!("Client {} assigned to service {id}", input.client_id),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

/// DELETE /api/services/{id}/assignments/{client_id}
pub async fn unassign(
    auth: Authorized<perm::ServiceUpdate>,
    State(state): State<AppState>,
    Path((id, client_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !ServiceAssignmentRepo::delete(&state.pool, id, client_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ServiceAssignment",
            id: client_id,
        }));
    }

    activity::record(
        &state.pool,
        &auth.user,
        activity_types::SERVICE_UNASSIGN,
        Subject::new(ENTITY, id),
        format!("Client {client_id} removed from service {id}"),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
