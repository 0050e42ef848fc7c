use axum::routing::get;
use axum::Router;

use crate::handlers::dossiers;
use crate::state::AppState;

/// Routes mounted at `/dossiers`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dossiers::list).post(dossiers::create))
        .route(
            "/{id}",
            get(dossiers::get_by_id)
                .put(dossiers::update)
                .delete(dossiers::delete),
        )
}
