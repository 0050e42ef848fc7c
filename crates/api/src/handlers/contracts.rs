//! Handlers for the `/contracts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use minicrm_core::activity::activity_types;
use minicrm_core::error::CoreError;
use minicrm_core::types::DbId;
use minicrm_db::models::contract::{CreateContract, UpdateContract};
use minicrm_db::repositories::ContractRepo;

use crate::activity::{self, Subject};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::rbac::{perm, Authorized};
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "contract";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Contract",
        id,
    })
}

/// GET /api/contracts
///
/// Each row carries `client_name` for display.
pub async fn list(
    _auth: Authorized<perm::ContractRead>,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let contracts = ContractRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: contracts }))
}

/// GET /api/contracts/{id}
pub async fn get_by_id(
    _auth: Authorized<perm::ContractRead>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let contract = ContractRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: contract }))
}

/// POST /api/contracts
///
/// 404 if `client_id` does not name an existing client.
pub async fn create(
    auth: Authorized<perm::ContractCreate>,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateContract>,
) -> AppResult<impl IntoResponse> {
    let contract = ContractRepo::create(&state.pool, &input).await?;

    tracing::info!(
        contract_id = contract.id,
        client_id = contract.client_id,
        user_id = auth.user.user_id,
        "Contract created"
    );
    activity::record(
        &state.pool,
        &auth.user,
        activity_types::CONTRACT_CREATE,
        Subject::new(ENTITY, contract.id),
        format!("Contract '{}' created ({})", contract.title, contract.amount),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: contract })))
}

/// PUT /api/contracts/{id}
///
/// Admin only.
pub async fn update(
    auth: Authorized<perm::ContractUpdate>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateContract>,
) -> AppResult<impl IntoResponse> {
    let contract = ContractRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    activity::record(
        &state.pool,
        &auth.user,
        activity_types::CONTRACT_UPDATE,
        Subject::new(ENTITY, id),
        format!("Contract '{}' updated", contract.title),
    )
    .await;

    Ok(Json(DataResponse { data: contract }))
}

/// DELETE /api/contracts/{id}
pub async fn delete(
    auth: Authorized<perm::ContractDelete>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ContractRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    activity::record(
        &state.pool,
        &auth.user,
        activity_types::CONTRACT_DELETE,
        Subject::new(ENTITY, id),
        format!("Contract {id} deleted"),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
