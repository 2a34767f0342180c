//! Request DTOs
//!
//! Data structures for API request bodies.

use serde::Deserialize;
use validator::Validate;

use crate::shared::validation::{validate_not_blank, validate_username_charset};

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(
        length(min = 1, max = 50, message = "username must be 1-50 characters"),
        custom(function = validate_username_charset)
    )]
    pub username: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,

    #[validate(custom(function = validate_not_blank))]
    pub fullname: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Refresh or revoke request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "refreshToken is required"))]
    pub refresh_token: String,
}

/// Create thread request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateThreadRequest {
    #[validate(
        length(max = 255, message = "title must be at most 255 characters"),
        custom(function = validate_not_blank)
    )]
    pub title: String,

    #[validate(custom(function = validate_not_blank))]
    pub body: String,
}

/// Create comment or reply request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(custom(function = validate_not_blank))]
    pub content: String,
}
