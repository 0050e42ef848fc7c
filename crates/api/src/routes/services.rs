use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::services;
use crate::state::AppState;

/// Routes mounted at `/services`.
///
/// ```text
/// GET    /                               -> list
/// POST   /                               -> create
/// GET    /{id}                           -> get_by_id
/// PUT    /{id}                           -> update
/// DELETE /{id}                           -> deactivate
/// GET    /{id}/stats                     -> stats
/// GET    /{id}/assignments               -> list_assignments
/// POST   /{id}/assignments               -> assign
/// DELETE /{id}/assignments/{client_id}   -> unassign
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(services::list).post(services::create))
        .route(
            "/{id}",
            get(services::get_by_id)
                .put(services::update)
                .delete(services::deactivate),
        )
        .route("/{id}/stats", get(services::stats))
        .route(
            "/{id}/assignments",
            get(services::list_assignments).post(services::assign),
        )
        .route(
            "/{id}/assignments/{client_id}",
            delete(services::unassign),
        )
}
