//! HTTP-level tests for `/api/contracts`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_client, decimal, delete_auth, get_auth, post_json_auth,
    put_json_auth, token_for,
};
use minicrm_core::roles::Role;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn contract_defaults_and_client_name(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let user = token_for(&app, &pool, "alice", Role::User).await;
    let client_id = create_client(&app, &user, "Acme").await;

    let response = post_json_auth(
        app.clone(),
        "/api/contracts",
        serde_json::json!({ "client_id": client_id, "title": "Hosting", "amount": "250.50" }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["status"], "en_cours");
    assert_eq!(decimal(&created["data"]["amount"]), 250.5);

    let response = get_auth(app.clone(), "/api/contracts", &user).await;
    let list = body_json(response).await;
    assert_eq!(list["data"][0]["client_name"], "Acme");

    let id = created["data"]["id"].as_i64().unwrap();
    let response = get_auth(app, &format!("/api/contracts/{id}"), &user).await;
    assert_eq!(body_json(response).await["data"]["client_name"], "Acme");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contract_for_unknown_client_is_not_found(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let user = token_for(&app, &pool, "alice", Role::User).await;

    let response = post_json_auth(
        app.clone(),
        "/api/contracts",
        serde_json::json!({ "client_id": 999999, "title": "Ghost", "amount": 10 }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, "/api/contracts", &user).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_contracts_are_rejected(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let user = token_for(&app, &pool, "alice", Role::User).await;
    let client_id = create_client(&app, &user, "Acme").await;

    let bad_payloads = [
        serde_json::json!({ "client_id": client_id, "title": "Neg", "amount": -5 }),
        serde_json::json!({ "client_id": client_id, "title": "", "amount": 5 }),
        serde_json::json!({
            "client_id": client_id, "title": "Backwards", "amount": 5,
            "start_date": "2026-06-01", "end_date": "2026-01-01"
        }),
        serde_json::json!({ "client_id": client_id, "title": "Odd", "amount": 5, "status": "archived" }),
    ];

    for payload in bad_payloads {
        let response = post_json_auth(app.clone(), "/api/contracts", payload.clone(), &user).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "payload should be refused: {payload}"
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn users_delete_but_cannot_edit_contracts(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let user = token_for(&app, &pool, "alice", Role::User).await;
    let admin = token_for(&app, &pool, "root", Role::Admin).await;
    let client_id = create_client(&app, &user, "Acme").await;

    let response = post_json_auth(
        app.clone(),
        "/api/contracts",
        serde_json::json!({ "client_id": client_id, "title": "Support", "amount": 40 }),
        &user,
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/contracts/{id}"),
        serde_json::json!({ "status": "actif" }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/contracts/{id}"),
        serde_json::json!({ "status": "actif" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "actif");
    assert_eq!(json["data"]["title"], "Support");

    let response = delete_auth(app.clone(), &format!("/api/contracts/{id}"), &user).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/contracts/{id}"), &user).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reassigning_to_unknown_client_is_not_found(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let admin = token_for(&app, &pool, "root", Role::Admin).await;
    let client_id = create_client(&app, &admin, "Acme").await;

    let response = post_json_auth(
        app.clone(),
        "/api/contracts",
        serde_json::json!({ "client_id": client_id, "title": "Support", "amount": 40 }),
        &admin,
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app,
        &format!("/api/contracts/{id}"),
        serde_json::json!({ "client_id": 999999 }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn end_date_alone_is_checked_against_stored_start(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let admin = token_for(&app, &pool, "root", Role::Admin).await;
    let client_id = create_client(&app, &admin, "Acme").await;

    let response = post_json_auth(
        app.clone(),
        "/api/contracts",
        serde_json::json!({
            "client_id": client_id, "title": "Season", "amount": 90,
            "start_date": "2026-05-01", "end_date": "2026-06-01"
        }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/contracts/{id}"),
        serde_json::json!({ "end_date": "2026-01-01" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = get_auth(app, &format!("/api/contracts/{id}"), &admin).await;
    assert_eq!(body_json(response).await["data"]["end_date"], "2026-06-01");
}
