//! Assertion helpers

use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::Value;

/// Assert an error response's status and `code`, returning the body
pub fn assert_error(response: &TestResponse, status: StatusCode, code: &str) -> Value {
    assert_eq!(response.status_code(), status, "{}", response.text());
    let body: Value = response.json();
    assert_eq!(body["code"], code, "unexpected body: {}", body);
    assert_eq!(body["status"], status.as_u16());
    assert!(body["error"].is_string());
    body
}

/// Assert that positions, in the order returned, are exactly `0..n`
pub fn assert_dense(items: &[Value]) {
    let positions: Vec<i64> = items.iter().map(|v| v["position"].as_i64().unwrap_or(-1)).collect();
    let expected: Vec<i64> = (0..items.len() as i64).collect();
    pretty_assertions::assert_eq!(positions, expected);
}
