use axum::routing::get;
use axum::Router;

use crate::handlers::contracts;
use crate::state::AppState;

/// Routes mounted at `/contracts`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update (admin)
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contracts::list).post(contracts::create))
        .route(
            "/{id}",
            get(contracts::get_by_id)
                .put(contracts::update)
                .delete(contracts::delete),
        )
}
