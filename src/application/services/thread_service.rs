//! Thread Service
//!
//! Handles thread creation and the thread detail read model.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dto::request::CreateThreadRequest;
use crate::domain::{CreatedThread, NewThread, ThreadDetail, ThreadDetailSource, ThreadRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Thread service trait
#[async_trait]
pub trait ThreadService: Send + Sync {
    /// Create a thread owned by `owner`
    async fn create_thread(
        &self,
        owner: &str,
        request: CreateThreadRequest,
    ) -> Result<CreatedThread, AppError>;

    /// Load a thread with its nested, redacted comments
    async fn get_thread_detail(&self, thread_id: &str) -> Result<ThreadDetail, AppError>;
}

/// ThreadService implementation
pub struct ThreadServiceImpl<T: ThreadRepository> {
    thread_repo: Arc<T>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<T: ThreadRepository> ThreadServiceImpl<T> {
    pub fn new(thread_repo: Arc<T>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            thread_repo,
            id_generator,
        }
    }
}

#[async_trait]
impl<T: ThreadRepository + 'static> ThreadService for ThreadServiceImpl<T> {
    async fn create_thread(
        &self,
        owner: &str,
        request: CreateThreadRequest,
    ) -> Result<CreatedThread, AppError> {
        let thread = NewThread {
            id: self.id_generator.next_id("thread"),
            title: request.title,
            body: request.body,
            owner: owner.to_string(),
        };

        self.thread_repo.add_thread(&thread).await
    }

    async fn get_thread_detail(&self, thread_id: &str) -> Result<ThreadDetail, AppError> {
        let rows = self.thread_repo.find_detail_rows(thread_id).await?;

        if rows.is_empty() {
            metrics::record_thread_detail("not_found");
            return Err(AppError::NotFound("thread not found".into()));
        }

        match ThreadDetail::new(ThreadDetailSource::Rows(rows)) {
            Ok(detail) => {
                metrics::record_thread_detail("ok");
                Ok(detail)
            }
            Err(e) => {
                metrics::record_thread_detail("invalid");
                tracing::warn!(thread_id, code = e.code(), "Stored thread failed validation");
                Err(e.into())
            }
        }
    }
}
