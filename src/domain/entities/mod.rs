//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the forum.
//! Persisted entities map directly to their corresponding database tables.
//!
//! ## Core Entities
//!
//! - **User**: User account with credentials and display name
//! - **Thread**: A discussion thread opened by a user
//! - **Comment**: A comment on a thread, or a reply to another comment
//! - **ThreadDetail**: The validated, nested read model of one thread
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod authentication;
mod comment;
mod thread;
mod thread_detail;
mod user;

// Re-export User entity and related types
pub use user::{RegisteredUser, User, UserRepository};

// Re-export refresh token registry
pub use authentication::AuthenticationRepository;

// Re-export Thread entity and related types
pub use thread::{CreatedThread, NewThread, ThreadRepository};

// Re-export Comment entity and related types
pub use comment::{CommentRepository, CreatedComment, NewComment};

// Re-export the thread detail read model
pub use thread_detail::{
    parse_timestamp, CommentNode, NodeKind, ThreadDetail, ThreadDetailError, ThreadDetailRow,
    ThreadDetailSource, DELETED_COMMENT_CONTENT, DELETED_REPLY_CONTENT,
};

#[cfg(test)]
pub use authentication::MockAuthenticationRepository;
#[cfg(test)]
pub use comment::MockCommentRepository;
#[cfg(test)]
pub use thread::MockThreadRepository;
#[cfg(test)]
pub use user::MockUserRepository;
