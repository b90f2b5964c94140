//! SQLite storage implementation for the Folio backend.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in `folio-core`
//! and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users, portfolios, and assets
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. The `core` crate is database-agnostic and works with traits.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod portfolio;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, run_migrations, spawn_writer, DbConnection, DbPool, WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from folio-core for convenience
pub use folio_core::errors::{DatabaseError, Error, Result};
