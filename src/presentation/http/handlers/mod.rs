//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod auth;
pub mod comment;
pub mod health;
pub mod thread;
pub mod user;
