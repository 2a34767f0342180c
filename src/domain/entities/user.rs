//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a registered forum user.
///
/// Maps to the `users` table:
/// - id: VARCHAR(50) PRIMARY KEY (`user-<snowflake>`)
/// - username: VARCHAR(50) NOT NULL UNIQUE
/// - password: TEXT NOT NULL (Argon2 PHC string)
/// - fullname: TEXT NOT NULL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Prefixed snowflake ID (primary key)
    pub id: String,

    /// Username (unique, letters, digits and underscores)
    pub username: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password: String,

    /// Full display name
    pub fullname: String,
}

/// Public view of a freshly registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredUser {
    pub id: String,
    pub username: String,
    pub fullname: String,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            fullname: user.fullname,
        }
    }
}

/// Repository trait for User data access operations.
///
/// Lookup failures are reported as `AppError::BadRequest`: an unknown
/// username is a client mistake, not a missing resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fail if the username is already taken.
    async fn verify_available_username(&self, username: &str) -> Result<(), AppError>;

    /// Insert a new user.
    async fn add_user(&self, user: &User) -> Result<RegisteredUser, AppError>;

    /// Get the stored password hash for a username.
    async fn get_password_by_username(&self, username: &str) -> Result<String, AppError>;

    /// Get the user ID for a username.
    async fn get_id_by_username(&self, username: &str) -> Result<String, AppError>;
}
