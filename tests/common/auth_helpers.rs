//! Registration and fixture helpers
//!
//! Everything goes through the HTTP API so tests exercise the same path a
//! client would.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

/// Registered user with a valid token
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub token: String,
}

pub async fn register(server: &TestServer, name: &str, email: &str, password: &str) -> TestUser {
    let response = server
        .post("/auth/register")
        .json(&json!({ "name": name, "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());

    let body: Value = response.json();
    TestUser {
        id: body["user"]["id"].as_str().and_then(|s| s.parse().ok()).expect("user id"),
        email: email.to_string(),
        password: password.to_string(),
        token: body["accessToken"].as_str().expect("accessToken").to_string(),
    }
}

/// Register a user with a unique email
pub async fn register_unique(server: &TestServer) -> TestUser {
    let email = format!("user_{}@example.com", Uuid::new_v4().simple());
    register(server, "Test User", &email, "password123").await
}

fn id_of(body: &Value) -> Uuid {
    body["id"].as_str().and_then(|s| s.parse().ok()).expect("id in body")
}

pub async fn create_board(server: &TestServer, user: &TestUser, title: &str) -> Uuid {
    let response = server
        .post("/boards")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": title }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    id_of(&response.json())
}

pub async fn create_list(server: &TestServer, user: &TestUser, board_id: Uuid, title: &str) -> Uuid {
    let response = server
        .post("/lists")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": title, "boardId": board_id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    id_of(&response.json())
}

pub async fn create_task(server: &TestServer, user: &TestUser, list_id: Uuid, title: &str) -> Uuid {
    let response = server
        .post("/tasks")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": title, "list": { "id": list_id } }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    id_of(&response.json())
}

/// Titles of a board's lists, in position order
pub async fn list_titles(server: &TestServer, user: &TestUser, board_id: Uuid) -> Vec<String> {
    let body: Value = server
        .get(&format!("/boards/{}/lists", board_id))
        .authorization_bearer(&user.token)
        .await
        .json();
    body.as_array()
        .expect("array")
        .iter()
        .map(|l| l["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Titles of a list's tasks, in position order
pub async fn task_titles(server: &TestServer, user: &TestUser, list_id: Uuid) -> Vec<String> {
    let body: Value = server
        .get("/tasks")
        .add_query_param("listId", list_id)
        .authorization_bearer(&user.token)
        .await
        .json();
    body.as_array()
        .expect("array")
        .iter()
        .map(|t| t["title"].as_str().unwrap_or_default().to_string())
        .collect()
}
