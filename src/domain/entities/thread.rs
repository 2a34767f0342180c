//! Thread entity and repository trait.
//!
//! Maps to the `threads` table in the database schema.

use async_trait::async_trait;
use serde::Serialize;

use super::thread_detail::ThreadDetailRow;
use crate::shared::error::AppError;

/// A thread about to be inserted.
///
/// Maps to the `threads` table:
/// - id: VARCHAR(50) PRIMARY KEY (`thread-<snowflake>`)
/// - title: VARCHAR(255) NOT NULL
/// - body: TEXT NOT NULL
/// - user_id: VARCHAR(50) NOT NULL REFERENCES users(id)
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThread {
    pub id: String,
    pub title: String,
    pub body: String,
    pub owner: String,
}

/// Public view of a freshly created thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedThread {
    pub id: String,
    pub title: String,
    pub owner: String,
}

/// Repository trait for Thread data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// Insert a new thread.
    async fn add_thread(&self, thread: &NewThread) -> Result<CreatedThread, AppError>;

    /// Fetch the denormalized thread-detail rows for one thread.
    ///
    /// Returns an empty vector when the thread does not exist. Rows are
    /// ordered by comment creation time.
    async fn find_detail_rows(&self, thread_id: &str) -> Result<Vec<ThreadDetailRow>, AppError>;
}
