//! Blog Store - Validated Author and Post Persistence
//!
//! A Rust library for storing the authors and posts of a small blogging
//! application in SQLite, rejecting invalid field values before they are
//! written.
//!
//! # Features
//!
//! - Field validation for author names, phone numbers, post titles,
//!   content, summaries and categories
//! - Store-enforced author name uniqueness
//! - Configurable clickbait phrases and categories
//! - Connection pooling and schema migrations

/// Configuration management
pub mod config;
/// Database operations and connection pooling
pub mod db;
/// Error types
pub mod error;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Repository pattern for data access
pub mod repository;
/// Database schema definitions
pub mod schema;
/// Validate-then-write orchestration
pub mod service;
/// Entity field validation
pub mod validation;

// Re-export key components for easier access
pub use db::Database;
pub use error::{BlogError, Result, ValidationError};
pub use models::{Author, AuthorChanges, NewAuthor, NewPost, Post, PostChanges};
pub use service::BlogService;
pub use validation::{EntityValidator, ValidationRules};
