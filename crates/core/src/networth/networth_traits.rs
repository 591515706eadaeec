//! Net-worth repository and service traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::networth_model::{
    ChangeSinceLast, NetWorthSnapshot, NetWorthSnapshotSummary, SnapshotData,
};
use crate::errors::Result;

/// Produces the final snapshot document once the previous snapshot is known.
///
/// Receives the previous snapshot chosen by `select_previous_snapshot`, or
/// `None` for a client's first snapshot.
pub type SnapshotComposer =
    Box<dyn FnOnce(Option<&NetWorthSnapshotSummary>) -> Result<SnapshotData> + Send + 'static>;

/// Trait defining the contract for snapshot persistence.
///
/// There is deliberately no update or delete: persisted snapshots are immutable.
#[async_trait]
pub trait NetWorthRepositoryTrait: Send + Sync {
    /// Inserts a snapshot for `client_group_id`.
    ///
    /// Implementations must look up the previous snapshot and insert the new
    /// one as a single serialized unit, so that two concurrent creations for
    /// the same client cannot both compare against the same predecessor.
    async fn create_snapshot(
        &self,
        client_group_id: &str,
        created_by: &str,
        snapshot_date: DateTime<Utc>,
        compose: SnapshotComposer,
    ) -> Result<NetWorthSnapshot>;

    /// Retrieves a snapshot by id. Returns `Error::NotFound` if it does not exist.
    fn get_by_id(&self, snapshot_id: i32) -> Result<NetWorthSnapshot>;

    /// Lists snapshot summaries of a client group, newest first.
    fn list_by_client_group(&self, client_group_id: &str) -> Result<Vec<NetWorthSnapshotSummary>>;
}

/// Trait defining the contract for net-worth service operations.
#[async_trait]
pub trait NetWorthServiceTrait: Send + Sync {
    /// Builds the live (unpersisted) net-worth document for a client group,
    /// compared with the latest snapshot taken before `as_of`.
    fn get_current_networth(
        &self,
        client_group_id: &str,
        as_of: DateTime<Utc>,
    ) -> Result<SnapshotData>;

    /// Builds and persists a snapshot dated `snapshot_date`.
    async fn create_snapshot(
        &self,
        client_group_id: &str,
        created_by: &str,
        snapshot_date: DateTime<Utc>,
    ) -> Result<NetWorthSnapshot>;

    fn get_snapshot(&self, snapshot_id: i32) -> Result<NetWorthSnapshot>;

    /// Snapshot history of a client group, newest first.
    fn list_snapshots(&self, client_group_id: &str) -> Result<Vec<NetWorthSnapshotSummary>>;

    /// Change from snapshot `from_id` to snapshot `to_id` of the same client group.
    fn compare_snapshots(&self, from_id: i32, to_id: i32) -> Result<ChangeSinceLast>;
}
