use axum::routing::get;
use axum::Router;

use crate::handlers::clients;
use crate::state::AppState;

/// Routes mounted at `/clients`.
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
        .route("/", get(clients::list).post(clients::create))
        .route(
            "/{id}",
            get(clients::get_by_id)
                .put(clients::update)
                .delete(clients::delete),
        )
}
