use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Routes mounted at `/stats`. Public.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(stats::dashboard))
}
