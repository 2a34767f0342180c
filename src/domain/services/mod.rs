//! # Domain Services
//!
//! Domain services encapsulate business logic that doesn't naturally
//! belong to a single entity.
//!
//! ## Services
//!
//! - **comment_tree**: Assembly of flat thread-detail rows into nested comments

mod comment_tree;

pub use comment_tree::*;
