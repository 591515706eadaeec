//! Net-worth service implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::change_calculator::{compute_change, select_previous_snapshot};
use super::networth_model::{
    ChangeSinceLast, HoldingInput, NetWorthSnapshot, NetWorthSnapshotSummary, PreviousSnapshot,
    SnapshotData,
};
use super::networth_traits::{NetWorthRepositoryTrait, NetWorthServiceTrait, SnapshotComposer};
use super::snapshot_builder::build_snapshot_data;
use crate::clients::ClientRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::holdings::{Holding, HoldingRepositoryTrait};

/// Service assembling, persisting and comparing net-worth snapshots.
pub struct NetWorthService {
    client_repository: Arc<dyn ClientRepositoryTrait>,
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    snapshot_repository: Arc<dyn NetWorthRepositoryTrait>,
}

impl NetWorthService {
    pub fn new(
        client_repository: Arc<dyn ClientRepositoryTrait>,
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        snapshot_repository: Arc<dyn NetWorthRepositoryTrait>,
    ) -> Self {
        Self {
            client_repository,
            holding_repository,
            snapshot_repository,
        }
    }

    /// Builds the document from the client's current owners and holdings.
    fn build_current(&self, client_group_id: &str) -> Result<SnapshotData> {
        self.client_repository.get_by_id(client_group_id)?;
        let owners = self.client_repository.list_owners(client_group_id)?;
        let holdings = self.holding_repository.list_by_client_group(client_group_id)?;

        let known_as_by_id: HashMap<&str, &str> = owners
            .iter()
            .map(|o| (o.id.as_str(), o.known_as.as_str()))
            .collect();
        let owner_keys: Vec<String> = owners.iter().map(|o| o.known_as.clone()).collect();

        // Repository order is the advisor's curated display order
        let inputs: Vec<HoldingInput> = holdings
            .iter()
            .map(|h| to_holding_input(h, &known_as_by_id))
            .collect();

        debug!(
            "Building net worth for client group {}: {} owners, {} holdings",
            client_group_id,
            owner_keys.len(),
            inputs.len()
        );
        build_snapshot_data(&owner_keys, &inputs)
    }
}

/// Translates owner ids to current known-as names.
///
/// Ids with no matching owner are passed through unchanged so the builder
/// rejects them as unknown owners instead of dropping them.
fn to_holding_input(holding: &Holding, known_as_by_id: &HashMap<&str, &str>) -> HoldingInput {
    let owner_amounts: BTreeMap<String, _> = holding
        .owner_amounts
        .iter()
        .map(|(owner_id, amount)| {
            let key = known_as_by_id
                .get(owner_id.as_str())
                .map(|k| k.to_string())
                .unwrap_or_else(|| owner_id.clone());
            (key, *amount)
        })
        .collect();
    HoldingInput {
        item_type: holding.item_type.clone(),
        name: holding.name.clone(),
        is_managed: holding.is_managed,
        is_liability: holding.is_liability,
        owner_amounts,
        joint: holding.joint,
    }
}

#[async_trait]
impl NetWorthServiceTrait for NetWorthService {
    fn get_current_networth(
        &self,
        client_group_id: &str,
        as_of: DateTime<Utc>,
    ) -> Result<SnapshotData> {
        let data = self.build_current(client_group_id)?;
        let history = self.snapshot_repository.list_by_client_group(client_group_id)?;
        let previous = select_previous_snapshot(&history, as_of).map(PreviousSnapshot::from);
        let change = compute_change(data.net_worth(), as_of, previous)?;
        Ok(data.with_change(change))
    }

    async fn create_snapshot(
        &self,
        client_group_id: &str,
        created_by: &str,
        snapshot_date: DateTime<Utc>,
    ) -> Result<NetWorthSnapshot> {
        if created_by.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "createdBy".to_string(),
            )));
        }
        let data = self.build_current(client_group_id)?;

        let compose: SnapshotComposer = Box::new(move |previous| {
            let previous = previous.map(PreviousSnapshot::from);
            let change = compute_change(data.net_worth(), snapshot_date, previous)?;
            Ok(data.with_change(change))
        });

        let snapshot = self
            .snapshot_repository
            .create_snapshot(client_group_id, created_by, snapshot_date, compose)
            .await?;
        info!(
            "Created net-worth snapshot {} for client group {} (net worth {})",
            snapshot.id,
            client_group_id,
            snapshot.data.net_worth()
        );
        Ok(snapshot)
    }

    fn get_snapshot(&self, snapshot_id: i32) -> Result<NetWorthSnapshot> {
        self.snapshot_repository.get_by_id(snapshot_id)
    }

    fn list_snapshots(&self, client_group_id: &str) -> Result<Vec<NetWorthSnapshotSummary>> {
        self.client_repository.get_by_id(client_group_id)?;
        self.snapshot_repository.list_by_client_group(client_group_id)
    }

    fn compare_snapshots(&self, from_id: i32, to_id: i32) -> Result<ChangeSinceLast> {
        let from = self.snapshot_repository.get_by_id(from_id)?;
        let to = self.snapshot_repository.get_by_id(to_id)?;
        if from.client_group_id != to.client_group_id {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Snapshots {} and {} belong to different client groups",
                from_id, to_id
            ))));
        }
        compute_change(
            to.data.net_worth(),
            to.snapshot_date,
            Some(PreviousSnapshot::from(&from)),
        )?
        .ok_or_else(|| {
            Error::InvariantViolation("comparison with a snapshot produced no change".to_string())
        })
    }
}
