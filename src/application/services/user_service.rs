//! User Service
//!
//! Handles user registration.

use std::sync::Arc;

use async_trait::async_trait;

use super::auth_service::hash_password;
use crate::application::dto::request::RegisterUserRequest;
use crate::domain::{RegisteredUser, User, UserRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisteredUser, AppError>;
}

/// UserService implementation
pub struct UserServiceImpl<U: UserRepository> {
    user_repo: Arc<U>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<U: UserRepository> UserServiceImpl<U> {
    pub fn new(user_repo: Arc<U>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            user_repo,
            id_generator,
        }
    }
}

#[async_trait]
impl<U: UserRepository + 'static> UserService for UserServiceImpl<U> {
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisteredUser, AppError> {
        self.user_repo
            .verify_available_username(&request.username)
            .await?;

        let password = hash_password(&request.password)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let user = User {
            id: self.id_generator.next_id("user"),
            username: request.username,
            password,
            fullname: request.fullname,
        };

        let registered = self.user_repo.add_user(&user).await?;
        tracing::info!(user_id = %registered.id, "User registered");

        Ok(registered)
    }
}
