//! Handlers for the `/clients` resource.
//!
//! Any authenticated user may list, create and delete clients; editing is
//! admin-only. Deleting a client that still owns records is refused.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use minicrm_core::activity::activity_types;
use minicrm_core::error::CoreError;
use minicrm_core::types::DbId;
use minicrm_db::models::client::{CreateClient, UpdateClient};
use minicrm_db::repositories::ClientRepo;

use crate::activity::{self, Subject};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::rbac::{perm, Authorized};
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "client";

/// GET /api/clients
pub async fn list(
    _auth: Authorized<perm::ClientRead>,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let clients = ClientRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: clients }))
}

/// GET /api/clients/{id}
pub async fn get_by_id(
    _auth: Authorized<perm::ClientRead>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let client = ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;
    Ok(Json(DataResponse { data: client }))
}

/// POST /api/clients
pub async fn create(
    auth: Authorized<perm::ClientCreate>,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateClient>,
) -> AppResult<impl IntoResponse> {
    let client = ClientRepo::create(&state.pool, &input).await?;

    tracing::info!(client_id = client.id, user_id = auth.user.user_id, "Client created");
    activity::record(
        &state.pool,
        &auth.user,
        activity_types::CLIENT_CREATE,
        Subject::new(ENTITY, client.id),
        format!("Client '{}' created", client.name),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// PUT /api/clients/{id}
///
/// Admin only. Omitted fields are left unchanged.
pub async fn update(
    auth: Authorized<perm::ClientUpdate>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateClient>,
) -> AppResult<impl IntoResponse> {
    let client = ClientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;

    activity::record(
        &state.pool,
        &auth.user,
        activity_types::CLIENT_UPDATE,
        Subject::new(ENTITY, id),
        format!("Client '{}' updated", client.name),
    )
    .await;

    Ok(Json(DataResponse { data: client }))
}

/// DELETE /api/clients/{id}
///
/// Returns 409 while contracts, dossiers or service assignments reference
/// the client.
pub async fn delete(
    auth: Authorized<perm::ClientDelete>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ClientRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }));
    }

    tracing::info!(client_id = id, user_id = auth.user.user_id, "Client deleted");
    activity::record(
        &state.pool,
        &auth.user,
        activity_types::CLIENT_DELETE,
        Subject::new(ENTITY, id),
        format!("Client {id} deleted"),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
