//! Portal resource API integration tests
//!
//! No database pool is configured here, so authorized requests end in 503;
//! these tests cover the auth and role checks in front of the queries.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use student_portal::backend::auth::Role;

use crate::common::*;

fn create_course_request(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/courses")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder
        .body(Body::from(json!({ "code": "CS101", "title": "Intro to CS" }).to_string()))
        .expect("valid request")
}

#[tokio::test]
async fn test_resources_require_token() {
    let (app, _) = test_app(None).await;
    let course_id = uuid::Uuid::new_v4();

    for uri in [
        "/api/courses".to_string(),
        format!("/api/courses/{}", course_id),
        format!("/api/courses/{}/assignments", course_id),
        format!("/api/courses/{}/materials", course_id),
        "/api/grades".to_string(),
    ] {
        let (status, body) = send(&app, get_request(&uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["message"], json!("No token provided"));
    }
}

#[tokio::test]
async fn test_resources_without_database() {
    let (app, state) = test_app(None).await;
    let token = auth_header(&token_for(&state, Role::Student));

    let (status, body) = send(&app, get_request("/api/courses", Some(&token))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], json!(false));

    let (status, _) = send(&app, get_request("/api/grades", Some(&token))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_create_course_requires_admin() {
    let (app, state) = test_app(None).await;

    for role in [Role::Student, Role::Faculty] {
        let token = auth_header(&token_for(&state, role));
        let (status, body) = send(&app, create_course_request(Some(&token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], json!("Insufficient permissions"));
    }
}

#[tokio::test]
async fn test_create_course_without_token() {
    let (app, _) = test_app(None).await;
    let (status, _) = send(&app, create_course_request(None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_passes_role_check() {
    let (app, state) = test_app(None).await;
    let token = auth_header(&token_for(&state, Role::Admin));

    let (status, _) = send(&app, create_course_request(Some(&token))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_create_course_unreadable_body() {
    let (app, state) = test_app(None).await;
    let token = auth_header(&token_for(&state, Role::Admin));

    let mut request = raw_request("/api/courses", Some("application/json"), r#"{"title":"Intro"}"#);
    request
        .headers_mut()
        .insert(header::AUTHORIZATION, token.parse().expect("valid header"));

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_malformed_course_id() {
    let (app, state) = test_app(None).await;
    let token = auth_header(&token_for(&state, Role::Student));

    let (status, _) = send(&app, get_request("/api/courses/not-a-uuid", Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
