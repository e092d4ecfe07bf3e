//! Shared helpers for HTTP-level integration tests.
//!
//! `build_test_app` mirrors the router construction in `main.rs` (via
//! [`build_app_router`]) so tests exercise the same middleware stack that
//! production uses.

#![allow(dead_code)] // each test binary uses a different helper subset

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use clientpulse_api::auth::jwt::JwtConfig;
use clientpulse_api::config::ServerConfig;
use clientpulse_api::router::build_app_router;
use clientpulse_api::state::AppState;
use clientpulse_api::ws::WsManager;
use clientpulse_events::EventBus;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        portal_base_url: "http://localhost:5173/portal".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the shared application state around the given pool.
pub fn build_test_state(pool: PgPool) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus: Arc::new(EventBus::default()),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = build_test_state(pool);
    let config = state.config.clone();
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should not fail")
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should not fail")
}

/// Send a JSON request with the given method and optional Bearer token.
async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.clone()
        .oneshot(
            builder
                .body(Body::from(body.to_string()))
                .expect("request should build"),
        )
        .await
        .expect("request should not fail")
}

/// Send an unauthenticated POST with a JSON body.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, None, body).await
}

/// Send an authenticated POST with a JSON body.
pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "POST", uri, Some(token), body).await
}

/// Send an authenticated PUT with a JSON body.
pub async fn put_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "PUT", uri, Some(token), body).await
}

/// Send an authenticated DELETE request.
pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should not fail")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Sign up a fresh agency + admin user through the API and return the auth
/// response JSON (`access_token`, `refresh_token`, `user`).
pub async fn signup(app: &Router, agency_name: &str, email: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "agency_name": agency_name,
        "full_name": "Test Admin",
        "email": email,
        "password": "test_password_123!",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Sign up and return just the access token.
pub async fn signup_token(app: &Router, agency_name: &str, email: &str) -> String {
    let json = signup(app, agency_name, email).await;
    json["access_token"]
        .as_str()
        .expect("signup must return an access token")
        .to_string()
}

/// Create a client through the API, returning the created JSON (includes
/// `portal_token` and `portal_url`).
pub async fn create_client(app: &Router, token: &str, name: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "name": name,
        "email": format!("{}@client.test", name.to_lowercase().replace(' ', ".")),
        "company": null,
        "phone": null,
    });
    let response = post_json_auth(app, "/api/v1/clients", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Create a project for the given client through the API.
pub async fn create_project(
    app: &Router,
    token: &str,
    client_id: i64,
    name: &str,
) -> serde_json::Value {
    let body = serde_json::json!({
        "client_id": client_id,
        "name": name,
        "description": null,
    });
    let response = post_json_auth(app, "/api/v1/projects", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
