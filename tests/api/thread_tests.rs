//! Thread, Comment and Reply API Tests
//!
//! Only the paths rejected before any database access are covered.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{json_body, TestApp};

#[tokio::test]
async fn test_create_thread_without_token_is_unauthorized() {
    let app = TestApp::new();
    let payload = json!({"title": "A Thread", "body": "Thread body"}).to_string();

    let (status, body) = json_body(app.post_json("/threads", &payload).await).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_create_thread_with_invalid_token_is_unauthorized() {
    let app = TestApp::new();
    let payload = json!({"title": "A Thread", "body": "Thread body"}).to_string();

    let response = app.post_json_auth("/threads", &payload, "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_thread_with_blank_title_fails() {
    let app = TestApp::new();
    let token = app.access_token();
    let payload = json!({"title": "  ", "body": "Thread body"}).to_string();

    let (status, body) = json_body(app.post_json_auth("/threads", &payload, &token).await).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_create_comment_without_token_is_unauthorized() {
    let app = TestApp::new();
    let payload = json!({"content": "A comment"}).to_string();

    let response = app.post_json("/threads/thread-123/comments", &payload).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_reply_with_missing_content_fails() {
    let app = TestApp::new();
    let token = app.access_token();

    let response = app
        .post_json_auth("/threads/thread-123/comments/comment-123/replies", "{}", &token)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_comment_without_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request("DELETE", "/threads/thread-123/comments/comment-123", None, None)
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_reply_without_token_is_unauthorized() {
    let app = TestApp::new();

    let (status, body) = json_body(
        app.request(
            "DELETE",
            "/threads/thread-123/comments/comment-123/replies/reply-123",
            None,
            None,
        )
        .await,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "fail");
}
