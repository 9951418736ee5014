//! SQLite storage implementation for BudgetWise.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `budgetwise-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for categories, budgets, expenses and notifications
//! - Database-specific model types (with Diesel derives)
//!
//! All writes go through a single writer actor ([`WriteHandle`]); reads use
//! pooled connections.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod notifications;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from budgetwise-core for convenience
pub use budgetwise_core::errors::{DatabaseError, Error, Result};
