//! HTTP-level tests for the assistant chat proxy, against a throwaway local
//! upstream.

mod common;

use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use common::{
    body_json, build_test_app, build_test_app_with, post_json, post_json_auth, test_config,
    token_for,
};
use minicrm_api::assistant::FALLBACK_RESPONSE;
use minicrm_api::config::ServerConfig;
use minicrm_core::roles::Role;
use sqlx::PgPool;

/// Serve `upstream` on an ephemeral local port and return its base URL.
async fn spawn_upstream(upstream: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.unwrap();
    });
    format!("http://{addr}")
}

fn config_for(base_url: String, timeout_secs: u64) -> ServerConfig {
    let mut config = test_config();
    config.assistant.base_url = base_url;
    config.assistant.timeout_secs = timeout_secs;
    config
}

/// Echoes the forwarded Authorization header and the message.
async fn echo(headers: HeaderMap, Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string();
    Json(serde_json::json!({
        "response": format!("{auth}|{}", body["message"].as_str().unwrap_or_default()),
    }))
}

async fn slow() -> Json<serde_json::Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(serde_json::json!({ "response": "too late" }))
}

async fn failing() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn chat_forwards_message_and_token(pool: PgPool) {
    let base_url = spawn_upstream(Router::new().route("/chat", post(echo))).await;
    let app = build_test_app_with(pool.clone(), config_for(base_url, 5));
    let token = token_for(&app, &pool, "alice", Role::User).await;

    let response = post_json_auth(
        app,
        "/api/ai/chat",
        serde_json::json!({ "message": "Combien de clients ?" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["response"],
        format!("Bearer {token}|Combien de clients ?")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn slow_upstream_yields_fallback(pool: PgPool) {
    let base_url = spawn_upstream(Router::new().route("/chat", post(slow))).await;
    let app = build_test_app_with(pool.clone(), config_for(base_url, 1));
    let token = token_for(&app, &pool, "alice", Role::User).await;

    let response = post_json_auth(
        app,
        "/api/ai/chat",
        serde_json::json!({ "message": "Bonjour" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["response"], FALLBACK_RESPONSE);
    assert!(json["error"].is_string());
}

/// Request and assistant timeouts at the shipped 45:30 proportion, scaled
/// down. The assistant deadline fires first, so the client sees the fallback
/// instead of a bare 408 from the request timeout.
#[sqlx::test(migrations = "../../db/migrations")]
async fn assistant_timeout_fires_before_request_timeout(pool: PgPool) {
    let base_url = spawn_upstream(Router::new().route("/chat", post(slow))).await;
    let config = ServerConfig::from_lookup(|name| match name {
        "JWT_SECRET" => Some("integration-test-secret".to_string()),
        "AI_SERVICE_URL" => Some(base_url.clone()),
        "AI_TIMEOUT_SECS" => Some("2".to_string()),
        "REQUEST_TIMEOUT_SECS" => Some("3".to_string()),
        _ => None,
    })
    .unwrap();
    let app = build_test_app_with(pool.clone(), config);
    let token = token_for(&app, &pool, "alice", Role::User).await;

    let response = post_json_auth(
        app,
        "/api/ai/chat",
        serde_json::json!({ "message": "Bonjour" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["response"], FALLBACK_RESPONSE);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failing_or_unreachable_upstream_yields_fallback(pool: PgPool) {
    let base_url = spawn_upstream(Router::new().route("/chat", post(failing))).await;
    let failing_app = build_test_app_with(pool.clone(), config_for(base_url, 5));
    let token = token_for(&failing_app, &pool, "alice", Role::User).await;

    let response = post_json_auth(
        failing_app,
        "/api/ai/chat",
        serde_json::json!({ "message": "Bonjour" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["response"], FALLBACK_RESPONSE);

    // test_config points at a closed port.
    let unreachable_app = build_test_app(pool);
    let response = post_json_auth(
        unreachable_app,
        "/api/ai/chat",
        serde_json::json!({ "message": "Bonjour" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["response"], FALLBACK_RESPONSE);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_message_is_rejected_without_calling_upstream(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = token_for(&app, &pool, "alice", Role::User).await;

    for body in [
        serde_json::json!({ "message": "   " }),
        serde_json::json!({ "message": "" }),
        serde_json::json!({}),
    ] {
        let response = post_json_auth(app.clone(), "/api/ai/chat", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Message requis");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn chat_requires_authentication(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/api/ai/chat", serde_json::json!({ "message": "Bonjour" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
