//! Authentication test helpers
//!
//! Provides utilities for building the app around a mock store, sending
//! requests through it and minting tokens.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use student_portal::backend::auth::{ClaimSet, Role, UserStore};
use student_portal::backend::routes::create_router;
use student_portal::backend::server::{build_state, AppState};
use student_portal::shared::config::AppConfig;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Config with a cheap bcrypt cost and a short probe timeout
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret(TEST_SECRET)
        .bcrypt_cost(4)
        .probe_timeout_ms(200)
        .build()
        .expect("valid test config")
}

/// Build the app with an optional primary store and no database pool
pub async fn test_app(primary: Option<Arc<dyn UserStore>>) -> (Router, AppState) {
    test_app_with(test_config(), primary).await
}

pub async fn test_app_with(config: AppConfig, primary: Option<Arc<dyn UserStore>>) -> (Router, AppState) {
    let state = build_state(&config, primary, None)
        .await
        .expect("Failed to build app state");
    (create_router(state.clone()), state)
}

/// Send a request and decode the JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// Request with a literal body, for bodies that are not valid JSON
pub fn raw_request(uri: &str, content_type: Option<&str>, body: &'static str) -> Request<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(value) = content_type {
        builder = builder.header(header::CONTENT_TYPE, value);
    }
    builder.body(Body::from(body)).expect("valid request")
}

pub fn get_request(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).expect("valid request")
}

pub async fn register(app: &Router, name: &str, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            Method::POST,
            "/api/auth/register",
            serde_json::json!({ "name": name, "email": email, "password": password }),
        ),
    )
    .await
}

pub async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            Method::POST,
            "/api/auth/login",
            serde_json::json!({ "email": email, "password": password }),
        ),
    )
    .await
}

/// Mint a token for an arbitrary caller with the app's codec
pub fn token_for(state: &AppState, role: Role) -> String {
    let claims = ClaimSet::new(uuid::Uuid::new_v4().to_string(), "caller@x.com", "Caller", role);
    state.auth.codec().encode(&claims).expect("Failed to encode test token")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
