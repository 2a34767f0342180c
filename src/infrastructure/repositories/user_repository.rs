//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{RegisteredUser, User, UserRepository};
use crate::shared::error::AppError;

const USERNAME_TAKEN: &str = "username is not available";
const USERNAME_NOT_FOUND: &str = "username not found";

/// Row returned by inserts; the password column is never read back.
#[derive(Debug, sqlx::FromRow)]
struct RegisteredUserRow {
    id: String,
    username: String,
    fullname: String,
}

impl RegisteredUserRow {
    fn into_registered_user(self) -> RegisteredUser {
        RegisteredUser {
            id: self.id,
            username: self.username,
            fullname: self.fullname,
        }
    }
}

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn verify_available_username(&self, username: &str) -> Result<(), AppError> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        if taken {
            return Err(AppError::BadRequest(USERNAME_TAKEN.to_string()));
        }
        Ok(())
    }

    async fn add_user(&self, user: &User) -> Result<RegisteredUser, AppError> {
        let row = sqlx::query_as::<_, RegisteredUserRow>(
            r#"
            INSERT INTO users (id, username, password, fullname)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, fullname
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.fullname)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::BadRequest(USERNAME_TAKEN.to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_registered_user())
    }

    async fn get_password_by_username(&self, username: &str) -> Result<String, AppError> {
        sqlx::query_scalar::<_, String>("SELECT password FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::BadRequest(USERNAME_NOT_FOUND.to_string()))
    }

    async fn get_id_by_username(&self, username: &str) -> Result<String, AppError> {
        sqlx::query_scalar::<_, String>("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::BadRequest(USERNAME_NOT_FOUND.to_string()))
    }
}
