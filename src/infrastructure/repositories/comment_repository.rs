//! Comment Repository Implementation
//!
//! PostgreSQL implementation of the CommentRepository trait. Comments and
//! replies live in the same table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{CommentRepository, CreatedComment, NewComment};
use crate::shared::error::AppError;

const THREAD_NOT_FOUND: &str = "thread not found";
const COMMENT_NOT_FOUND: &str = "comment not found";
const NOT_OWNER: &str = "you are not the owner of this comment";

#[derive(Debug, sqlx::FromRow)]
struct CreatedCommentRow {
    id: String,
    content: String,
    owner: String,
}

impl CreatedCommentRow {
    fn into_created_comment(self) -> CreatedComment {
        CreatedComment {
            id: self.id,
            content: self.content,
            owner: self.owner,
        }
    }
}

/// PostgreSQL comment repository implementation.
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn add_comment(&self, comment: &NewComment) -> Result<CreatedComment, AppError> {
        let row = sqlx::query_as::<_, CreatedCommentRow>(
            r#"
            INSERT INTO comments (id, content, thread_id, user_id, parent_comment_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, content, user_id AS owner
            "#,
        )
        .bind(&comment.id)
        .bind(&comment.content)
        .bind(&comment.thread_id)
        .bind(&comment.owner)
        .bind(&comment.parent_comment_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_created_comment())
    }

    async fn soft_delete(&self, comment_id: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE comments SET is_deleted = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(comment_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(COMMENT_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    async fn verify_thread_exists(&self, thread_id: &str) -> Result<(), AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM threads WHERE id = $1)")
            .bind(thread_id)
            .fetch_one(&self.pool)
            .await?;

        if !exists {
            return Err(AppError::NotFound(THREAD_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    async fn verify_comment_exists(&self, comment_id: &str) -> Result<(), AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1)")
                .bind(comment_id)
                .fetch_one(&self.pool)
                .await?;

        if !exists {
            return Err(AppError::NotFound(COMMENT_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    async fn verify_comment_owner(&self, comment_id: &str, user_id: &str) -> Result<(), AppError> {
        let owner: String = sqlx::query_scalar("SELECT user_id FROM comments WHERE id = $1")
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(COMMENT_NOT_FOUND.to_string()))?;

        if owner != user_id {
            return Err(AppError::Forbidden(NOT_OWNER.to_string()));
        }
        Ok(())
    }
}
