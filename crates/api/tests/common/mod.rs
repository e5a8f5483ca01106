#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use formgate_api::auth::jwt::{generate_access_token, JwtConfig};
use formgate_api::config::ServerConfig;
use formgate_api::router::build_app_router;
use formgate_api::state::AppState;
use formgate_events::EventBus;

/// Fixed JWT config so tests can mint their own tokens.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        access_token_expiry_mins: 60,
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(upload_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir,
        public_base_url: "http://localhost:3000".to_string(),
        visitor_identity_url: None,
        jwt: test_jwt_config(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a throwaway upload directory.
///
/// This goes through the same [`build_app_router`] as production, so
/// integration tests exercise the identical middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let upload_dir = tempfile::tempdir()
        .expect("failed to create temp upload dir")
        .keep();
    build_test_app_with_upload_dir(pool, upload_dir)
}

/// Like [`build_test_app`] but with a caller-owned upload directory, for
/// tests that inspect stored files.
pub fn build_test_app_with_upload_dir(pool: PgPool, upload_dir: PathBuf) -> Router {
    let config = test_config(upload_dir);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
        identity: None,
    };

    build_app_router(state, &config)
}

/// Like [`build_test_app`] but with a caller-owned event bus, for tests
/// that subscribe to published events.
pub fn build_test_app_with_bus(pool: PgPool, event_bus: Arc<EventBus>) -> Router {
    let upload_dir = tempfile::tempdir()
        .expect("failed to create temp upload dir")
        .keep();
    let config = test_config(upload_dir);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus,
        identity: None,
    };

    build_app_router(state, &config)
}

/// Mint an admin Bearer token valid against [`test_jwt_config`].
pub fn admin_token() -> String {
    generate_access_token(1, "admin", &test_jwt_config()).expect("token generation")
}

/// Mint a token with an arbitrary role.
pub fn token_with_role(role: &str) -> String {
    generate_access_token(2, role, &test_jwt_config()).expect("token generation")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// GET without auth.
pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

/// POST a JSON body without auth (public endpoints).
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body), None).await
}

/// GET with an admin Bearer token.
pub async fn auth_get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, Some(&admin_token())).await
}

/// POST a JSON body with an admin Bearer token.
pub async fn auth_post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body), Some(&admin_token())).await
}

/// PUT a JSON body with an admin Bearer token.
pub async fn auth_put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body), Some(&admin_token())).await
}

/// DELETE with an admin Bearer token.
pub async fn auth_delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None, Some(&admin_token())).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as a UTF-8 string.
pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Create a form through the API and return its id.
pub async fn create_form(pool: &PgPool, body: serde_json::Value) -> i64 {
    let app = build_test_app(pool.clone());
    let response = auth_post_json(app, "/api/v1/forms", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
