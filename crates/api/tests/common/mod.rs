#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use minicrm_api::assistant::AssistantConfig;
use minicrm_api::auth::jwt::JwtConfig;
use minicrm_api::auth::password::{Argon2Hasher, PasswordHasher};
use minicrm_api::config::ServerConfig;
use minicrm_api::router::build_app_router;
use minicrm_api::state::AppState;
use minicrm_core::roles::Role;
use minicrm_db::models::user::{CreateUser, User};
use minicrm_db::repositories::UserRepo;

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Configuration used by every test app.
///
/// The assistant points at a closed local port so any accidental call fails
/// fast.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_mins: 480,
        },
        assistant: AssistantConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
        },
    }
}

/// Production router and middleware over the test pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config).expect("state should build");
    build_app_router(state)
}

/// Insert a user with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, login: &str, role: Role) -> User {
    let password_hash = Argon2Hasher.hash(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            login: login.to_string(),
            password_hash,
            role,
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Create a user and log it in through the API, returning its token.
pub async fn token_for(app: &Router, pool: &PgPool, login: &str, role: Role) -> String {
    create_user(pool, login, role).await;
    let response = post_json(
        app.clone(),
        "/api/auth/login",
        serde_json::json!({ "login": login, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .expect("token should be a string")
        .to_string()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should not fail")
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::DELETE, uri, Some(token), None)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Decimal fields serialize as JSON strings; read one back as a number.
pub fn decimal(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::String(s) => s.parse().expect("decimal string"),
        other => other.as_f64().expect("decimal number"),
    }
}

/// Create a client through the API and return its id.
pub async fn create_client(app: &Router, token: &str, name: &str) -> i64 {
    let response = post_json_auth(
        app.clone(),
        "/api/clients",
        serde_json::json!({ "name": name }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
