//! Database module for SQLite operations.
//!
//! This module provides:
//! - The `Session` owning the single store connection
//! - Schema creation and SQLite pragma configuration
//! - Repository layer for student and admin records

pub mod migrations;
pub mod repo;
pub mod session;

pub use repo::Repository;
pub use session::Session;
