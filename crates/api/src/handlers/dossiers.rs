//! Handlers for the `/dossiers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use minicrm_core::activity::activity_types;
use minicrm_core::error::CoreError;
use minicrm_core::types::DbId;
use minicrm_db::models::dossier::{CreateDossier, UpdateDossier};
use minicrm_db::repositories::DossierRepo;

use crate::activity::{self, Subject};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::rbac::{perm, Authorized};
use crate::query::ClientFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "dossier";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Dossier",
        id,
    })
}

/// GET /api/dossiers?client_id=
pub async fn list(
    _auth: Authorized<perm::DossierRead>,
    State(state): State<AppState>,
    Query(params): Query<ClientFilterParams>,
) -> AppResult<impl IntoResponse> {
    let dossiers = DossierRepo::list(&state.pool, params.client_id).await?;
    Ok(Json(DataResponse { data: dossiers }))
}

/// GET /api/dossiers/{id}
pub async fn get_by_id(
    _auth: Authorized<perm::DossierRead>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let dossier = DossierRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: dossier }))
}

/// POST /api/dossiers
pub async fn create(
    auth: Authorized<perm::DossierCreate>,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateDossier>,
) -> AppResult<impl IntoResponse> {
    let dossier = DossierRepo::create(&state.pool, &input).await?;

    activity::record(
        &state.pool,
        &auth.user,
        activity_types::DOSSIER_CREATE,
        Subject::new(ENTITY, dossier.id),
        format!("Dossier '{}' opened", dossier.title),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: dossier })))
}

/// PUT /api/dossiers/{id}
pub async fn update(
    auth: Authorized<perm::DossierUpdate>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateDossier>,
) -> AppResult<impl IntoResponse> {
    let dossier = DossierRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    activity::record(
        &state.pool,
        &auth.user,
        activity_types::DOSSIER_UPDATE,
        Subject::new(ENTITY, id),
        format!("Dossier '{}' updated", dossier.title),
    )
    .await;

    Ok(Json(DataResponse { data: dossier }))
}

/// DELETE /api/dossiers/{id}
pub async fn delete(
    auth: Authorized<perm::DossierDelete>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !DossierRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    activity::record(
        &state.pool,
        &auth.user,
        activity_types::DOSSIER_DELETE,
        Subject::new(ENTITY, id),
        format!("Dossier {id} deleted"),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
