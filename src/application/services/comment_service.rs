//! Comment Service
//!
//! Creates and soft-deletes comments and replies. Every mutation runs its
//! guards in a fixed order (existence before ownership before the write)
//! and stops at the first failure.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{CommentRepository, CreatedComment, NewComment};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Comment service trait
#[async_trait]
pub trait CommentService: Send + Sync {
    async fn create_comment(
        &self,
        thread_id: &str,
        owner: &str,
        content: String,
    ) -> Result<CreatedComment, AppError>;

    async fn delete_comment(
        &self,
        thread_id: &str,
        comment_id: &str,
        owner: &str,
    ) -> Result<(), AppError>;

    async fn create_reply(
        &self,
        thread_id: &str,
        comment_id: &str,
        owner: &str,
        content: String,
    ) -> Result<CreatedComment, AppError>;

    async fn delete_reply(
        &self,
        thread_id: &str,
        comment_id: &str,
        reply_id: &str,
        owner: &str,
    ) -> Result<(), AppError>;
}

/// CommentService implementation
pub struct CommentServiceImpl<C: CommentRepository> {
    comment_repo: Arc<C>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<C: CommentRepository> CommentServiceImpl<C> {
    pub fn new(comment_repo: Arc<C>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            comment_repo,
            id_generator,
        }
    }
}

#[async_trait]
impl<C: CommentRepository + 'static> CommentService for CommentServiceImpl<C> {
    async fn create_comment(
        &self,
        thread_id: &str,
        owner: &str,
        content: String,
    ) -> Result<CreatedComment, AppError> {
        self.comment_repo.verify_thread_exists(thread_id).await?;

        let comment = NewComment {
            id: self.id_generator.next_id("comment"),
            content,
            thread_id: thread_id.to_string(),
            owner: owner.to_string(),
            parent_comment_id: None,
        };

        self.comment_repo.add_comment(&comment).await
    }

    async fn delete_comment(
        &self,
        thread_id: &str,
        comment_id: &str,
        owner: &str,
    ) -> Result<(), AppError> {
        self.comment_repo.verify_thread_exists(thread_id).await?;
        self.comment_repo.verify_comment_exists(comment_id).await?;
        self.comment_repo.verify_comment_owner(comment_id, owner).await?;
        self.comment_repo.soft_delete(comment_id).await?;

        tracing::debug!(thread_id, comment_id, "Comment deleted");
        Ok(())
    }

    async fn create_reply(
        &self,
        thread_id: &str,
        comment_id: &str,
        owner: &str,
        content: String,
    ) -> Result<CreatedComment, AppError> {
        self.comment_repo.verify_thread_exists(thread_id).await?;
        self.comment_repo.verify_comment_exists(comment_id).await?;

        let reply = NewComment {
            id: self.id_generator.next_id("reply"),
            content,
            thread_id: thread_id.to_string(),
            owner: owner.to_string(),
            parent_comment_id: Some(comment_id.to_string()),
        };

        self.comment_repo.add_comment(&reply).await
    }

    async fn delete_reply(
        &self,
        thread_id: &str,
        comment_id: &str,
        reply_id: &str,
        owner: &str,
    ) -> Result<(), AppError> {
        self.comment_repo.verify_thread_exists(thread_id).await?;
        self.comment_repo.verify_comment_exists(comment_id).await?;
        self.comment_repo.verify_comment_exists(reply_id).await?;
        self.comment_repo.verify_comment_owner(reply_id, owner).await?;
        self.comment_repo.soft_delete(reply_id).await?;

        tracing::debug!(thread_id, comment_id, reply_id, "Reply deleted");
        Ok(())
    }
}
