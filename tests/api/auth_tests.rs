//! User and Authentication API Tests
//!
//! Only the paths rejected before any database access are covered.

use axum::http::StatusCode;
use serde_json::json;
use test_case::test_case;

use crate::common::{json_body, unique_username, TestApp};

#[test_case(json!({"username": "dicoding indonesia", "password": "secret", "fullname": "Dicoding"}) ; "restricted characters")]
#[test_case(json!({"username": "a".repeat(51), "password": "secret", "fullname": "Dicoding"}) ; "username too long")]
#[test_case(json!({"username": "dicoding", "password": "", "fullname": "Dicoding"}) ; "empty password")]
#[test_case(json!({"username": "dicoding", "password": "secret", "fullname": "   "}) ; "blank fullname")]
#[test_case(json!({"username": "dicoding", "password": "secret"}) ; "missing fullname")]
#[test_case(json!({"username": 123, "password": "secret", "fullname": "Dicoding"}) ; "wrong type")]
#[tokio::test]
async fn test_register_with_invalid_payload_fails(payload: serde_json::Value) {
    let app = TestApp::new();

    let (status, body) = json_body(app.post_json("/users", &payload.to_string()).await).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_register_with_malformed_json_fails() {
    let app = TestApp::new();
    let body = format!(r#"{{"username": "{}", "#, unique_username());

    let (status, body) = json_body(app.post_json("/users", &body).await).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_login_without_password_fails() {
    let app = TestApp::new();

    let response = app
        .post_json("/authentications", &json!({"username": "dicoding"}).to_string())
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_without_token_fails() {
    let app = TestApp::new();

    let (status, body) = json_body(app.request("PUT", "/authentications", Some("{}"), None).await).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_refresh_with_forged_token_fails() {
    let app = TestApp::new();
    // An access token is signed with the wrong key for a refresh
    let forged = app.access_token();
    let payload = json!({ "refreshToken": forged }).to_string();

    let (status, body) =
        json_body(app.request("PUT", "/authentications", Some(&payload), None).await).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "refresh token is invalid");
}
