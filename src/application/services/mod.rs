//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Login, JWT tokens, logout
//! - **UserService**: User registration
//! - **ThreadService**: Thread creation and thread detail
//! - **CommentService**: Comments and replies

pub mod auth_service;
pub mod comment_service;
pub mod thread_service;
pub mod user_service;

// Re-export auth service types
pub use auth_service::{AuthError, AuthService, AuthServiceImpl, AuthTokens, Claims, TokenManager};

// Re-export user service types
pub use user_service::{UserService, UserServiceImpl};

// Re-export thread service types
pub use thread_service::{ThreadService, ThreadServiceImpl};

// Re-export comment service types
pub use comment_service::{CommentService, CommentServiceImpl};
