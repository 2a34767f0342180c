//! Authentication Repository Implementation
//!
//! PostgreSQL implementation of the refresh token registry.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::AuthenticationRepository;
use crate::shared::error::AppError;

/// PostgreSQL refresh token registry.
#[derive(Clone)]
pub struct PgAuthenticationRepository {
    pool: PgPool,
}

impl PgAuthenticationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthenticationRepository for PgAuthenticationRepository {
    async fn add_token(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query("INSERT INTO authentications (token) VALUES ($1)")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn token_exists(&self, token_hash: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authentications WHERE token = $1)")
                .bind(token_hash)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn delete_token(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM authentications WHERE token = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
