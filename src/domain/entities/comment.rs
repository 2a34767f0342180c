//! Comment entity and repository trait.
//!
//! Comments and replies share the `comments` table; a reply is a comment
//! whose `parent_comment_id` points at another comment or reply.

use async_trait::async_trait;
use serde::Serialize;

use crate::shared::error::AppError;

/// A comment or reply about to be inserted.
///
/// Maps to the `comments` table:
/// - id: VARCHAR(50) PRIMARY KEY (`comment-<snowflake>` or `reply-<snowflake>`)
/// - content: TEXT NOT NULL
/// - thread_id: VARCHAR(50) NOT NULL REFERENCES threads(id)
/// - user_id: VARCHAR(50) NOT NULL REFERENCES users(id)
/// - parent_comment_id: VARCHAR(50) NULL REFERENCES comments(id)
/// - is_deleted: BOOLEAN DEFAULT FALSE (soft deletion flag)
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub id: String,
    pub content: String,
    pub thread_id: String,
    pub owner: String,
    pub parent_comment_id: Option<String>,
}

impl NewComment {
    /// Check if this is a reply to another comment.
    pub fn is_reply(&self) -> bool {
        self.parent_comment_id.is_some()
    }
}

/// Public view of a freshly created comment or reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedComment {
    pub id: String,
    pub content: String,
    pub owner: String,
}

/// Repository trait for Comment data access operations.
///
/// The `verify_*` guards are called by the mutation use cases before any
/// write, in a fixed order: existence checks first, then ownership.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment or reply.
    async fn add_comment(&self, comment: &NewComment) -> Result<CreatedComment, AppError>;

    /// Soft-delete a comment or reply. `NotFound` if no row was updated.
    async fn soft_delete(&self, comment_id: &str) -> Result<(), AppError>;

    /// `NotFound` if the thread does not exist.
    async fn verify_thread_exists(&self, thread_id: &str) -> Result<(), AppError>;

    /// `NotFound` if the comment or reply does not exist.
    async fn verify_comment_exists(&self, comment_id: &str) -> Result<(), AppError>;

    /// `Forbidden` if the comment or reply is owned by someone else.
    async fn verify_comment_owner(&self, comment_id: &str, user_id: &str) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_comment_is_reply() {
        let mut comment = NewComment {
            id: "comment-123".into(),
            content: "A comment".into(),
            thread_id: "thread-123".into(),
            owner: "user-123".into(),
            parent_comment_id: None,
        };
        assert!(!comment.is_reply());

        comment.parent_comment_id = Some("comment-456".into());
        assert!(comment.is_reply());
    }

    #[test]
    fn test_created_comment_serialization() {
        let created = CreatedComment {
            id: "reply-123".into(),
            content: "A reply".into(),
            owner: "user-123".into(),
        };

        let value = serde_json::to_value(&created).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": "reply-123", "content": "A reply", "owner": "user-123"})
        );
    }
}
