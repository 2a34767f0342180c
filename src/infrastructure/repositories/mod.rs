//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **UserRepository** - User registration and credential lookup
//! - **AuthenticationRepository** - Refresh token registry
//! - **ThreadRepository** - Thread creation and the thread detail join
//! - **CommentRepository** - Comments, replies and their guards
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgCommentRepository, PgThreadRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let thread_repo = PgThreadRepository::new(pool.clone());
//!     let comment_repo = PgCommentRepository::new(pool.clone());
//! }
//! ```

pub mod authentication_repository;
pub mod comment_repository;
pub mod thread_repository;
pub mod user_repository;

pub use authentication_repository::PgAuthenticationRepository;
pub use comment_repository::PgCommentRepository;
pub use thread_repository::PgThreadRepository;
pub use user_repository::PgUserRepository;
