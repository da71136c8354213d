//! Authentication API integration tests
//!
//! Registration, login, token checks and the error body they produce.

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::*;

#[tokio::test]
async fn test_register_returns_token_and_user() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/auth/register")
        .json(&json!({
            "name": "Ana Lima",
            "email": "Ana@Example.com",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["accessToken"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["name"], "Ana Lima");
    assert_eq!(body["user"]["email"], "ana@example.com");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new();
    register(&app.server, "First", "dup@example.com", "password123").await;

    let response = app
        .server
        .post("/auth/register")
        .json(&json!({
            "name": "Second",
            "email": "DUP@example.com",
            "password": "password456"
        }))
        .await;

    assert_error(&response, StatusCode::CONFLICT, "CONFLICT");
}

#[tokio::test]
async fn test_register_validation_names_field() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/auth/register")
        .json(&json!({
            "name": "Valid Name",
            "email": "not-an-email",
            "password": "password123"
        }))
        .await;
    let body = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(body["field"], "email");

    let response = app
        .server
        .post("/auth/register")
        .json(&json!({
            "name": "Valid Name",
            "email": "short@example.com",
            "password": "123"
        }))
        .await;
    let body = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(body["field"], "password");
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/auth/register")
        .json(&json!({ "name": "No Email" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    let user = register(&app.server, "Login User", "login@example.com", "password123").await;

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "login@example.com", "password": "password123" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user"]["id"], user.id.to_string());
    assert!(body["accessToken"].is_string());
}

#[tokio::test]
async fn test_login_failures_share_a_message() {
    let app = TestApp::new();
    register(&app.server, "Login User", "login@example.com", "password123").await;

    let wrong_password = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "login@example.com", "password": "wrongpass" }))
        .await;
    let unknown_email = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "password123" }))
        .await;

    let a = assert_error(&wrong_password, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
    let b = assert_error(&unknown_email, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
    assert_eq!(a["error"], b["error"]);
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new();

    let response = app.server.get("/auth/me").await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");

    let response = app
        .server
        .get("/auth/me")
        .authorization_bearer("invalid.token.here")
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let app = TestApp::new();
    let user = register_unique(&app.server).await;

    let response = app
        .server
        .get("/auth/me")
        .authorization_bearer(&user.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["email"], user.email);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new();

    let response = app.server.get("/nowhere").await;
    assert_error(&response, StatusCode::NOT_FOUND, "NOT_FOUND");
}
