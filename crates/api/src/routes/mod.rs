pub mod activities;
pub mod ai;
pub mod auth;
pub mod clients;
pub mod contracts;
pub mod dossiers;
pub mod health;
pub mod services;
pub mod stats;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Everything below `/api`:
///
/// ```text
/// /auth/login                                   login (public)
/// /auth/me                                      current identity
///
/// /clients                                      list, create
/// /clients/{id}                                 get, update (admin), delete
///
/// /contracts                                    list, create
/// /contracts/{id}                               get, update (admin), delete
///
/// /services                                     list (?include_inactive), create
/// /services/{id}                                get, update, deactivate
/// /services/{id}/stats                          clients_count, revenue_total
/// /services/{id}/assignments                    list, assign
/// /services/{id}/assignments/{client_id}        unassign
///
/// /dossiers                                     list (?client_id), create
/// /dossiers/{id}                                get, update, delete
///
/// /activities/recent                            feed (?limit)
///
/// /stats/dashboard                              aggregates (public)
///
/// /ai/chat                                      assistant proxy
///
/// /users                                        list, create (admin)
/// /users/{id}/role                              change role (admin)
/// /users/{id}/password                          reset password (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/clients", clients::router())
        .nest("/contracts", contracts::router())
        .nest("/services", services::router())
        .nest("/dossiers", dossiers::router())
        .nest("/activities", activities::router())
        .nest("/stats", stats::router())
        .nest("/ai", ai::router())
        .nest("/users", users::router())
}
