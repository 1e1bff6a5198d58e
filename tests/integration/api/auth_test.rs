//! Authentication API integration tests
//!
//! Tests for registration, login and the current-user endpoint.

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use student_portal::backend::auth::{ClaimSet, Role, UserStore};
use student_portal::shared::config::{AppConfig, TokenCodecKind};

use crate::common::*;

#[tokio::test]
async fn test_register_normalizes_email_and_returns_token() {
    let (app, state) = test_app(None).await;

    let (status, body) = register(&app, "Ann", "Ann@X.com", "secret1").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["email"], json!("ann@x.com"));
    assert_eq!(body["user"]["name"], json!("Ann"));
    assert_eq!(body["user"]["role"], json!("student"));
    assert!(body["user"].get("password_hash").is_none());

    let token = body["token"].as_str().expect("token present");
    let claims = state.auth.codec().decode(token).expect("token decodes");
    assert_eq!(claims.email, "ann@x.com");
    assert_eq!(claims.name, "Ann");
}

#[tokio::test]
async fn test_register_on_primary_store() {
    let primary = Arc::new(MockUserStore::new(MockMode::Healthy));
    let (app, state) = test_app(Some(primary.clone() as Arc<dyn UserStore>)).await;

    let (status, body) = register(&app, "Ann", "Ann@X.com", "secret1").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("Registration successful"));
    assert!(primary.user("ann@x.com").await.is_some());
    assert!(state.auth.fallback().is_empty().await);
}

#[tokio::test]
async fn test_register_with_profile() {
    let (app, _) = test_app(None).await;

    let (status, body) = send(
        &app,
        json_request(
            axum::http::Method::POST,
            "/api/auth/register",
            json!({
                "name": "Ann",
                "email": "ann@x.com",
                "password": "secret1",
                "student_id": "S-100",
                "department": "Physics"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["user"]["profile"],
        json!({ "student_id": "S-100", "department": "Physics" })
    );
}

#[tokio::test]
async fn test_register_validation_errors() {
    let (app, state) = test_app(None).await;

    let (status, body) = register(&app, "Ann", "not-an-email", "secret1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["status"], json!(400));

    let (status, _) = register(&app, "Ann", "ann@x.com", "abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = register(&app, "  ", "ann@x.com", "secret1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(state.auth.fallback().is_empty().await);
}

#[tokio::test]
async fn test_register_missing_field_is_json_400() {
    let (app, state) = test_app(None).await;

    let (status, body) = send(
        &app,
        json_request(
            axum::http::Method::POST,
            "/api/auth/register",
            json!({ "email": "ann@x.com", "password": "secret1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["status"], json!(400));
    assert_eq!(
        body["message"],
        json!("Request body is missing required fields or has invalid values")
    );
    assert!(state.auth.fallback().is_empty().await);
}

#[tokio::test]
async fn test_login_non_json_body_is_json_400() {
    let (app, _) = test_app(None).await;

    let (status, body) = send(&app, raw_request("/api/auth/login", Some("application/json"), "not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "success": false, "message": "Request body is not valid JSON", "status": 400 })
    );

    let (status, body) = send(&app, raw_request("/api/auth/login", None, "{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Expected a JSON request body"));
}

#[tokio::test]
async fn test_long_password_is_checked_in_full() {
    let (app, _) = test_app(None).await;
    let prefix = "p".repeat(72);
    let password = format!("{}-first", prefix);
    assert_eq!(register(&app, "Ann", "ann@x.com", &password).await.0, StatusCode::CREATED);

    let (status, _) = login(&app, "ann@x.com", &format!("{}-other", prefix)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = login(&app, "ann@x.com", &password).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let (app, _) = test_app(None).await;
    assert_eq!(register(&app, "Ann", "ann@x.com", "secret1").await.0, StatusCode::CREATED);

    let (status, body) = register(&app, "Ann Again", "ANN@x.com", "secret2").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], json!("User with this email already exists"));
}

#[tokio::test]
async fn test_login_success() {
    let (app, state) = test_app(None).await;
    register(&app, "Ann", "ann@x.com", "secret1").await;

    let (status, body) = login(&app, "  Ann@X.com ", "secret1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["email"], json!("ann@x.com"));
    let token = body["token"].as_str().expect("token present");
    assert!(state.auth.codec().decode(token).is_ok());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (app, _) = test_app(None).await;
    register(&app, "Ann", "ann@x.com", "secret1").await;

    let (status, body) = login(&app, "ann@x.com", "wrong-password").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Invalid email or password"));
}

#[tokio::test]
async fn test_login_unknown_email_is_indistinguishable() {
    let (app, _) = test_app(None).await;
    register(&app, "Ann", "ann@x.com", "secret1").await;

    let wrong_password = login(&app, "ann@x.com", "wrong-password").await;
    let unknown_email = login(&app, "bob@x.com", "secret1").await;

    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_login_requires_password() {
    let (app, _) = test_app(None).await;
    let (status, _) = login(&app, "ann@x.com", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_deactivated_account() {
    let (app, state) = test_app(None).await;
    register(&app, "Ann", "ann@x.com", "secret1").await;
    state.auth.fallback().set_active("ann@x.com", false).await;

    let (status, body) = login(&app, "ann@x.com", "secret1").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Account is deactivated"));
}

#[tokio::test]
async fn test_me_returns_claims() {
    let (app, _) = test_app(None).await;
    let (_, body) = register(&app, "Ann", "ann@x.com", "secret1").await;
    let token = body["token"].as_str().expect("token present");

    let (status, me) = send(&app, get_request("/api/auth/me", Some(&auth_header(token)))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], json!("ann@x.com"));
    assert_eq!(me["id"], body["user"]["id"]);
    assert_eq!(me["role"], json!("student"));
}

#[tokio::test]
async fn test_me_without_header() {
    let (app, _) = test_app(None).await;

    let (status, body) = send(&app, get_request("/api/auth/me", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("No token provided"));
}

#[tokio::test]
async fn test_me_with_wrong_scheme() {
    let (app, _) = test_app(None).await;

    let (status, body) = send(&app, get_request("/api/auth/me", Some("Token abc"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("No token provided"));
}

#[tokio::test]
async fn test_me_with_expired_token() {
    let (app, state) = test_app(None).await;
    let claims = ClaimSet::new(uuid::Uuid::new_v4().to_string(), "ann@x.com", "Ann", Role::Student);
    let token = state
        .auth
        .codec()
        .encode_at(&claims, Utc::now() - Duration::days(30))
        .expect("token encodes");

    let (status, body) = send(&app, get_request("/api/auth/me", Some(&auth_header(&token)))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Invalid or expired token"));
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let (app, _) = test_app(None).await;

    let (status, body) = send(&app, get_request("/api/auth/me", Some("Bearer garbage"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Invalid or expired token"));
}

#[tokio::test]
async fn test_token_from_other_secret_is_rejected() {
    let (app, _) = test_app(None).await;
    let other = AppConfig::builder()
        .jwt_secret("another-secret")
        .bcrypt_cost(4)
        .build()
        .expect("valid config");
    let (_, other_state) = test_app_with(other, None).await;
    let token = token_for(&other_state, Role::Admin);

    let (status, _) = send(&app, get_request("/api/auth/me", Some(&auth_header(&token)))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unsigned_codec_round_trip() {
    let config = AppConfig::builder()
        .token_codec(TokenCodecKind::Unsigned)
        .bcrypt_cost(4)
        .build()
        .expect("valid config");
    let (app, _) = test_app_with(config, None).await;

    let (status, body) = register(&app, "Ann", "ann@x.com", "secret1").await;
    assert_eq!(status, StatusCode::CREATED);
    let token = body["token"].as_str().expect("token present");
    crate::assert_contains!(token, "plain.");

    let (status, me) = send(&app, get_request("/api/auth/me", Some(&auth_header(token)))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], json!("ann@x.com"));
}

#[tokio::test]
async fn test_demo_accounts() {
    let config = AppConfig::builder()
        .jwt_secret(TEST_SECRET)
        .bcrypt_cost(4)
        .seed_demo_accounts(true)
        .build()
        .expect("valid config");
    let (app, _) = test_app_with(config, None).await;

    let (status, body) = login(&app, "admin@demo.edu", "password123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], json!("admin"));
    assert_eq!(body["message"], json!("Login successful (offline mode)"));
}

#[tokio::test]
async fn test_health_reports_storage() {
    let (app, _) = test_app(None).await;
    let (status, body) = send(&app, get_request("/api/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "storage": "fallback" }));

    let primary = Arc::new(MockUserStore::new(MockMode::Healthy));
    let (app, _) = test_app(Some(primary.clone() as Arc<dyn UserStore>)).await;
    let (_, body) = send(&app, get_request("/api/health", None)).await;
    assert_eq!(body["storage"], json!("primary"));

    primary.set_mode(MockMode::Unreachable).await;
    let (_, body) = send(&app, get_request("/api/health", None)).await;
    assert_eq!(body["storage"], json!("fallback"));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (app, _) = test_app(None).await;
    let (status, body) = send(&app, get_request("/api/nowhere", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["status"], json!(404));
}
