//! Board API integration tests

use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::*;

#[tokio::test]
async fn test_board_crud() {
    let app = TestApp::new();
    let user = register_unique(&app.server).await;

    let response = app
        .server
        .post("/boards")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "Roadmap", "description": "Q3 work" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let board: Value = response.json();
    assert_eq!(board["ownerId"], user.id.to_string());
    let id = board["id"].as_str().expect("id").to_string();

    let fetched: Value = app
        .server
        .get(&format!("/boards/{}", id))
        .authorization_bearer(&user.token)
        .await
        .json();
    assert_eq!(fetched["title"], "Roadmap");

    let response = app
        .server
        .patch(&format!("/boards/{}", id))
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "Roadmap 2" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["title"], "Roadmap 2");
    assert_eq!(updated["description"], "Q3 work");

    let response = app
        .server
        .delete(&format!("/boards/{}", id))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["success"], true);

    let response = app
        .server
        .get(&format!("/boards/{}", id))
        .authorization_bearer(&user.token)
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "NOT_FOUND");
}

#[tokio::test]
async fn test_create_board_requires_title() {
    let app = TestApp::new();
    let user = register_unique(&app.server).await;

    let response = app
        .server
        .post("/boards")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "   " }))
        .await;
    let body = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(body["field"], "title");
}

#[tokio::test]
async fn test_foreign_board_is_forbidden() {
    let app = TestApp::new();
    let owner = register_unique(&app.server).await;
    let intruder = register_unique(&app.server).await;
    let board_id = create_board(&app.server, &owner, "Private").await;

    let response = app
        .server
        .get(&format!("/boards/{}", board_id))
        .authorization_bearer(&intruder.token)
        .await;
    assert_error(&response, StatusCode::FORBIDDEN, "FORBIDDEN");

    let response = app
        .server
        .delete(&format!("/boards/{}", board_id))
        .authorization_bearer(&intruder.token)
        .await;
    assert_error(&response, StatusCode::FORBIDDEN, "FORBIDDEN");

    let response = app
        .server
        .get(&format!("/boards/{}", Uuid::new_v4()))
        .authorization_bearer(&intruder.token)
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "NOT_FOUND");
}

#[tokio::test]
async fn test_search_boards_only_returns_own() {
    let app = TestApp::new();
    let alice = register_unique(&app.server).await;
    let bob = register_unique(&app.server).await;
    create_board(&app.server, &alice, "Alpha").await;
    create_board(&app.server, &alice, "Beta").await;
    create_board(&app.server, &bob, "Alpha of Bob").await;

    let boards: Value = app
        .server
        .get("/boards")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(boards.as_array().map(Vec::len), Some(2));

    let filtered: Value = app
        .server
        .get("/boards")
        .add_query_param("title", "alp")
        .authorization_bearer(&alice.token)
        .await
        .json();
    let titles: Vec<&str> = filtered
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|b| b["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Alpha"]);
}

#[tokio::test]
async fn test_board_lists_include_ordered_tasks() {
    let app = TestApp::new();
    let user = register_unique(&app.server).await;
    let board_id = create_board(&app.server, &user, "Board").await;
    let todo = create_list(&app.server, &user, board_id, "Todo").await;
    create_list(&app.server, &user, board_id, "Done").await;
    create_task(&app.server, &user, todo, "first").await;
    create_task(&app.server, &user, todo, "second").await;

    let lists: Value = app
        .server
        .get(&format!("/boards/{}/lists", board_id))
        .authorization_bearer(&user.token)
        .await
        .json();
    let lists = lists.as_array().expect("array");
    assert_dense(lists);
    assert_eq!(lists[0]["title"], "Todo");
    assert_eq!(lists[1]["title"], "Done");

    let tasks = lists[0]["tasks"].as_array().expect("tasks");
    assert_dense(tasks);
    assert_eq!(tasks[0]["title"], "first");
    assert_eq!(tasks[1]["title"], "second");
    assert!(lists[1]["tasks"].as_array().expect("tasks").is_empty());
}

#[tokio::test]
async fn test_delete_board_removes_lists_and_tasks() {
    let app = TestApp::new();
    let user = register_unique(&app.server).await;
    let board_id = create_board(&app.server, &user, "Board").await;
    let list_id = create_list(&app.server, &user, board_id, "Todo").await;
    let task_id = create_task(&app.server, &user, list_id, "t").await;

    app.server
        .delete(&format!("/boards/{}", board_id))
        .authorization_bearer(&user.token)
        .await
        .assert_status_ok();

    let response = app
        .server
        .get(&format!("/lists/{}", list_id))
        .authorization_bearer(&user.token)
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "NOT_FOUND");

    let response = app
        .server
        .get(&format!("/tasks/{}", task_id))
        .authorization_bearer(&user.token)
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "NOT_FOUND");
}
