//! SQLite storage implementation for Kingston's Portal.
//!
//! This crate is the record store behind the net-worth screens. It
//! implements the repository traits defined in `kingston-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for client groups, holdings and snapshots
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! All writes go through a single writer actor, which is also what
//! serializes snapshot creation per client.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod clients;
pub mod holdings;
pub mod networth;

#[cfg(test)]
mod test_utils;

// Re-export database utilities
pub use db::{create_pool, get_connection, get_db_path, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from kingston-core for convenience
pub use kingston_core::errors::{DatabaseError, Error, Result};
