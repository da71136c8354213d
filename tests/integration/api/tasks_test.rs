//! Task API integration tests

use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::*;

struct Fixture {
    user: TestUser,
    lists: Vec<Uuid>,
    tasks: Vec<Vec<Uuid>>,
}

/// One board with a list per entry, each holding the given task titles
async fn fixture(app: &TestApp, layout: &[&[&str]]) -> Fixture {
    let user = register_unique(&app.server).await;
    let board_id = create_board(&app.server, &user, "Board").await;
    let mut lists = Vec::new();
    let mut tasks = Vec::new();
    for (i, titles) in layout.iter().enumerate() {
        let list_id = create_list(&app.server, &user, board_id, &format!("list {}", i)).await;
        let mut ids = Vec::new();
        for title in *titles {
            ids.push(create_task(&app.server, &user, list_id, title).await);
        }
        lists.push(list_id);
        tasks.push(ids);
    }
    Fixture { user, lists, tasks }
}

#[tokio::test]
async fn test_create_task_defaults() {
    let app = TestApp::new();
    let f = fixture(&app, &[&[]]).await;

    let response = app
        .server
        .post("/tasks")
        .authorization_bearer(&f.user.token)
        .json(&json!({ "title": "  Write docs  ", "list": { "id": f.lists[0] } }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let task: Value = response.json();
    assert_eq!(task["title"], "Write docs");
    assert_eq!(task["status"], "pending");
    assert_eq!(task["position"], 0);
    assert_eq!(task["listId"], f.lists[0].to_string());
}

#[tokio::test]
async fn test_move_within_list() {
    let app = TestApp::new();
    let f = fixture(&app, &[&["t0", "t1", "t2", "t3"]]).await;

    let response = app
        .server
        .patch(&format!("/tasks/{}/move", f.tasks[0][3]))
        .authorization_bearer(&f.user.token)
        .json(&json!({ "position": 1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());

    assert_eq!(
        task_titles(&app.server, &f.user, f.lists[0]).await,
        vec!["t0", "t3", "t1", "t2"]
    );
}

#[tokio::test]
async fn test_move_across_lists() {
    let app = TestApp::new();
    let f = fixture(&app, &[&["a0", "a1", "a2", "a3"], &["b0", "b1", "b2"]]).await;

    let response = app
        .server
        .patch(&format!("/tasks/{}/move", f.tasks[0][2]))
        .authorization_bearer(&f.user.token)
        .json(&json!({ "listId": f.lists[1], "position": 1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());
    let moved: Value = response.json();
    assert_eq!(moved["listId"], f.lists[1].to_string());
    assert_eq!(moved["position"], 1);

    assert_eq!(
        task_titles(&app.server, &f.user, f.lists[0]).await,
        vec!["a0", "a1", "a3"]
    );
    assert_eq!(
        task_titles(&app.server, &f.user, f.lists[1]).await,
        vec!["b0", "a2", "b1", "b2"]
    );
}

#[tokio::test]
async fn test_move_to_end_of_other_list() {
    let app = TestApp::new();
    let f = fixture(&app, &[&["a0"], &["b0", "b1"]]).await;

    app.server
        .patch(&format!("/tasks/{}/move", f.tasks[0][0]))
        .authorization_bearer(&f.user.token)
        .json(&json!({ "listId": f.lists[1], "position": 2 }))
        .await
        .assert_status_ok();

    assert!(task_titles(&app.server, &f.user, f.lists[0]).await.is_empty());
    assert_eq!(
        task_titles(&app.server, &f.user, f.lists[1]).await,
        vec!["b0", "b1", "a0"]
    );
}

#[tokio::test]
async fn test_move_out_of_range_is_rejected() {
    let app = TestApp::new();
    let f = fixture(&app, &[&["a0", "a1"], &["b0"]]).await;

    let response = app
        .server
        .patch(&format!("/tasks/{}/move", f.tasks[0][0]))
        .authorization_bearer(&f.user.token)
        .json(&json!({ "listId": f.lists[1], "position": 2 }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "POSITION_OUT_OF_RANGE");

    assert_eq!(task_titles(&app.server, &f.user, f.lists[0]).await, vec!["a0", "a1"]);
    assert_eq!(task_titles(&app.server, &f.user, f.lists[1]).await, vec!["b0"]);
}

#[tokio::test]
async fn test_move_into_missing_or_foreign_list() {
    let app = TestApp::new();
    let f = fixture(&app, &[&["a0"]]).await;
    let other = fixture(&app, &[&[]]).await;

    let response = app
        .server
        .patch(&format!("/tasks/{}/move", f.tasks[0][0]))
        .authorization_bearer(&f.user.token)
        .json(&json!({ "listId": Uuid::new_v4(), "position": 0 }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "NOT_FOUND");

    let response = app
        .server
        .patch(&format!("/tasks/{}/move", f.tasks[0][0]))
        .authorization_bearer(&f.user.token)
        .json(&json!({ "listId": other.lists[0], "position": 0 }))
        .await;
    assert_error(&response, StatusCode::FORBIDDEN, "FORBIDDEN");
}

#[tokio::test]
async fn test_delete_task_compacts_list() {
    let app = TestApp::new();
    let f = fixture(&app, &[&["t0", "t1", "t2"]]).await;

    app.server
        .delete(&format!("/tasks/{}", f.tasks[0][1]))
        .authorization_bearer(&f.user.token)
        .await
        .assert_status_ok();

    let tasks: Value = app
        .server
        .get("/tasks")
        .add_query_param("listId", f.lists[0])
        .authorization_bearer(&f.user.token)
        .await
        .json();
    let tasks = tasks.as_array().expect("array");
    assert_dense(tasks);
    assert_eq!(tasks[1]["title"], "t2");
}

#[tokio::test]
async fn test_update_task_fields() {
    let app = TestApp::new();
    let f = fixture(&app, &[&["t0", "t1"]]).await;

    let response = app
        .server
        .patch(&format!("/tasks/{}", f.tasks[0][1]))
        .authorization_bearer(&f.user.token)
        .json(&json!({ "status": "in_progress", "description": "half done" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let task: Value = response.json();
    assert_eq!(task["status"], "in_progress");
    assert_eq!(task["description"], "half done");
    assert_eq!(task["title"], "t1");
    assert_eq!(task["position"], 1);

    let filtered: Value = app
        .server
        .get("/tasks")
        .add_query_param("status", "in_progress")
        .authorization_bearer(&f.user.token)
        .await
        .json();
    let filtered = filtered.as_array().expect("array");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["id"], f.tasks[0][1].to_string());
}

#[tokio::test]
async fn test_unknown_status_is_rejected() {
    let app = TestApp::new();
    let f = fixture(&app, &[&["t0"]]).await;

    let response = app
        .server
        .patch(&format!("/tasks/{}", f.tasks[0][0]))
        .authorization_bearer(&f.user.token)
        .json(&json!({ "status": "archived" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_foreign_task_is_forbidden() {
    let app = TestApp::new();
    let f = fixture(&app, &[&["t0"]]).await;
    let intruder = register_unique(&app.server).await;

    let response = app
        .server
        .get(&format!("/tasks/{}", f.tasks[0][0]))
        .authorization_bearer(&intruder.token)
        .await;
    assert_error(&response, StatusCode::FORBIDDEN, "FORBIDDEN");

    let response = app
        .server
        .delete(&format!("/tasks/{}", f.tasks[0][0]))
        .authorization_bearer(&intruder.token)
        .await;
    assert_error(&response, StatusCode::FORBIDDEN, "FORBIDDEN");
}
