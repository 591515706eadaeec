//! Kingston Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic behind the client net-worth
//! screens: client groups and their product owners, the holdings recorded
//! against them, and the snapshot builder / change calculator that turn
//! those holdings into point-in-time net-worth documents.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod clients;
pub mod constants;
pub mod errors;
pub mod holdings;
pub mod networth;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
