//! Refresh token registry.
//!
//! Maps to the `authentications` table. Only SHA-256 digests of refresh
//! tokens are stored; a token is usable for refresh while its digest exists.

use async_trait::async_trait;

use crate::shared::error::AppError;

/// Repository trait for the refresh token registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthenticationRepository: Send + Sync {
    /// Register a refresh token digest.
    async fn add_token(&self, token_hash: &str) -> Result<(), AppError>;

    /// Check whether a refresh token digest is registered.
    async fn token_exists(&self, token_hash: &str) -> Result<bool, AppError>;

    /// Remove a refresh token digest.
    async fn delete_token(&self, token_hash: &str) -> Result<(), AppError>;
}
