//! Thread Repository Implementation
//!
//! PostgreSQL implementation of the ThreadRepository trait, including the
//! denormalized join that feeds the thread detail read model.

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::PgPool;

use crate::domain::{CreatedThread, NewThread, ThreadDetailRow, ThreadRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// One row of the thread/comment/user join.
///
/// Comment columns are NULL for a thread without comments.
#[derive(Debug, sqlx::FromRow)]
struct ThreadDetailJoinRow {
    thread_id: String,
    title: String,
    body: String,
    updated_at: DateTime<Utc>,
    username: String,
    comment_id: Option<String>,
    comment_username: Option<String>,
    comment_date: Option<DateTime<Utc>>,
    content: Option<String>,
    parent_comment_id: Option<String>,
    is_deleted: Option<bool>,
}

impl ThreadDetailJoinRow {
    fn into_detail_row(self) -> ThreadDetailRow {
        ThreadDetailRow {
            thread_id: Some(self.thread_id),
            title: Some(self.title),
            body: Some(self.body),
            updated_at: Some(format_timestamp(self.updated_at)),
            username: Some(self.username),
            comment_id: self.comment_id,
            comment_username: self.comment_username,
            comment_date: self.comment_date.map(format_timestamp),
            content: self.content,
            parent_comment_id: self.parent_comment_id,
            is_deleted: self.is_deleted,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CreatedThreadRow {
    id: String,
    title: String,
    owner: String,
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// PostgreSQL thread repository implementation.
#[derive(Clone)]
pub struct PgThreadRepository {
    pool: PgPool,
}

impl PgThreadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThreadRepository for PgThreadRepository {
    async fn add_thread(&self, thread: &NewThread) -> Result<CreatedThread, AppError> {
        let row = sqlx::query_as::<_, CreatedThreadRow>(
            r#"
            INSERT INTO threads (id, title, body, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, user_id AS owner
            "#,
        )
        .bind(&thread.id)
        .bind(&thread.title)
        .bind(&thread.body)
        .bind(&thread.owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(CreatedThread {
            id: row.id,
            title: row.title,
            owner: row.owner,
        })
    }

    async fn find_detail_rows(&self, thread_id: &str) -> Result<Vec<ThreadDetailRow>, AppError> {
        let started = Instant::now();

        let rows = sqlx::query_as::<_, ThreadDetailJoinRow>(
            r#"
            SELECT t.id AS thread_id, t.title, t.body, t.updated_at,
                   u.username,
                   c.id AS comment_id, cu.username AS comment_username,
                   c.created_at AS comment_date, c.content,
                   c.parent_comment_id, c.is_deleted
            FROM threads t
            JOIN users u ON u.id = t.user_id
            LEFT JOIN comments c ON c.thread_id = t.id
            LEFT JOIN users cu ON cu.id = c.user_id
            WHERE t.id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await?;

        metrics::record_db_query("select_detail", "threads", started.elapsed().as_secs_f64());

        Ok(rows.into_iter().map(ThreadDetailJoinRow::into_detail_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_uses_millis_and_z() {
        let value = Utc.with_ymd_and_hms(2025, 1, 20, 7, 0, 0).unwrap();
        assert_eq!(format_timestamp(value), "2025-01-20T07:00:00.000Z");
    }

    #[test]
    fn test_header_row_has_no_comment_fields() {
        let row = ThreadDetailJoinRow {
            thread_id: "thread-123".into(),
            title: "A Thread".into(),
            body: "Body".into(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 20, 7, 0, 0).unwrap(),
            username: "dicoding".into(),
            comment_id: None,
            comment_username: None,
            comment_date: None,
            content: None,
            parent_comment_id: None,
            is_deleted: None,
        }
        .into_detail_row();

        assert_eq!(row.thread_id.as_deref(), Some("thread-123"));
        assert_eq!(row.updated_at.as_deref(), Some("2025-01-20T07:00:00.000Z"));
        assert!(row.comment_id.is_none());
        assert!(row.comment_date.is_none());
    }
}
