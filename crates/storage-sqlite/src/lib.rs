//! SQLite storage implementation for Giftwise.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `giftwise-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for people and gifts
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel
//! dependencies exist; `core` is database-agnostic and works with traits.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod gifts;
pub mod people;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from giftwise-core for convenience
pub use giftwise_core::errors::{DatabaseError, Error, Result};
