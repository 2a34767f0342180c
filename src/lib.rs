//! # Forum API Library
//!
//! This crate provides a discussion forum backend with:
//! - RESTful HTTP API endpoints for users, authentication, threads,
//!   comments and replies
//! - Nested, redacted thread detail assembled from a flat join
//! - PostgreSQL for persistent storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities, the comment tree and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database, repositories and metrics
//! - **Presentation Layer**: HTTP handlers, extractors and middleware
//!
//! ## Module Structure
//!
//! ```text
//! forum_api/
//! +-- config/        Configuration management
//! +-- domain/        Domain entities, comment tree and traits
//! +-- application/   Application services and DTOs
//! +-- infrastructure/ Database, repositories and metrics
//! +-- presentation/  HTTP routes, handlers and middleware
//! +-- shared/        Common utilities (errors, snowflake IDs, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers and middleware
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
