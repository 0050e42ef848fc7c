use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`. Admin only.
///
/// ```text
/// GET  /                -> list
/// POST /                -> create
/// PUT  /{id}/role       -> update_role
/// PUT  /{id}/password   -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/{id}/role", put(users::update_role))
        .route("/{id}/password", put(users::reset_password))
}
