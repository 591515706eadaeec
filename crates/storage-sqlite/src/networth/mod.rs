//! SQLite storage implementation for net-worth snapshots.
//!
//! Snapshot rows are append-only; a trigger rejects updates.

mod model;
mod repository;

pub use model::{NetWorthSnapshotDB, NetWorthSnapshotSummaryDB, NewNetWorthSnapshotDB};
pub use repository::NetWorthRepository;
