//! Net-worth snapshot domain models.
//!
//! Everything under `SnapshotData` is part of the persisted snapshot document
//! and is serialised with snake_case field names. Owner amounts are flattened
//! into the item/totals objects so each owner's known-as name becomes a column.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{Error, Result};

/// One holding as handed to the snapshot builder.
///
/// `owner_amounts` is keyed by owner key (known-as name).
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingInput {
    pub item_type: String,
    pub name: String,
    pub is_managed: bool,
    pub is_liability: bool,
    pub owner_amounts: BTreeMap<String, Decimal>,
    pub joint: Decimal,
}

/// A single row of a net-worth table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    name: String,
    is_managed: bool,
    #[serde(default)]
    is_liability: bool,
    #[serde(flatten)]
    owner_amounts: BTreeMap<String, Decimal>,
    joint: Decimal,
    total: Decimal,
}

impl Item {
    /// Creates an item; `total` is always derived from the amounts.
    pub(crate) fn new(
        name: String,
        is_managed: bool,
        is_liability: bool,
        owner_amounts: BTreeMap<String, Decimal>,
        joint: Decimal,
    ) -> Self {
        let total = owner_amounts.values().copied().sum::<Decimal>() + joint;
        Self {
            name,
            is_managed,
            is_liability,
            owner_amounts,
            joint,
            total,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_managed(&self) -> bool {
        self.is_managed
    }

    pub fn is_liability(&self) -> bool {
        self.is_liability
    }

    /// Amount attributed to `owner_key`, zero when the key is absent.
    pub fn amount_for(&self, owner_key: &str) -> Decimal {
        self.owner_amounts
            .get(owner_key)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn owner_amounts(&self) -> &BTreeMap<String, Decimal> {
        &self.owner_amounts
    }

    pub fn joint(&self) -> Decimal {
        self.joint
    }

    pub fn total(&self) -> Decimal {
        self.total
    }
}

/// Per-owner, joint and overall subtotals of an item type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ItemTotals {
    #[serde(flatten)]
    owner_amounts: BTreeMap<String, Decimal>,
    joint: Decimal,
    total: Decimal,
}

impl ItemTotals {
    /// Sums the given items for every key in `owner_keys`.
    pub(crate) fn from_items(owner_keys: &[String], items: &[Item]) -> Self {
        let owner_amounts = owner_keys
            .iter()
            .map(|key| {
                let sum = items.iter().map(|i| i.amount_for(key)).sum::<Decimal>();
                (key.clone(), sum)
            })
            .collect();
        Self {
            owner_amounts,
            joint: items.iter().map(Item::joint).sum(),
            total: items.iter().map(Item::total).sum(),
        }
    }

    pub fn amount_for(&self, owner_key: &str) -> Decimal {
        self.owner_amounts
            .get(owner_key)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn owner_amounts(&self) -> &BTreeMap<String, Decimal> {
        &self.owner_amounts
    }

    pub fn joint(&self) -> Decimal {
        self.joint
    }

    pub fn total(&self) -> Decimal {
        self.total
    }
}

/// A named category of items, e.g. "GIAs" or "Bank Accounts".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemType {
    #[serde(rename = "type")]
    item_type: String,
    items: Vec<Item>,
    totals: ItemTotals,
}

impl ItemType {
    pub(crate) fn new(item_type: String, owner_keys: &[String], items: Vec<Item>) -> Self {
        let totals = ItemTotals::from_items(owner_keys, &items);
        Self {
            item_type,
            items,
            totals,
        }
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn totals(&self) -> &ItemTotals {
        &self.totals
    }

    pub fn total(&self) -> Decimal {
        self.totals.total
    }
}

/// Net worth movement against the previous snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeSinceLast {
    /// Signed change; positive means net worth increased
    pub value: Decimal,
    /// Signed percentage change, `None` when the previous net worth was zero
    pub percentage: Option<Decimal>,
    pub last_snapshot_date: DateTime<Utc>,
    pub last_snapshot_net_worth: Decimal,
    /// e.g. "Apr 24 to Aug 25"
    pub period_display: String,
    pub current_date: DateTime<Utc>,
}

/// Totals across all item types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SnapshotSummary {
    managed_total: Decimal,
    unmanaged_total: Decimal,
    total_assets: Decimal,
    total_liabilities: Decimal,
    net_worth: Decimal,
    #[serde(default)]
    change_since_last: Option<ChangeSinceLast>,
}

impl SnapshotSummary {
    pub(crate) fn from_item_types(item_types: &[ItemType]) -> Self {
        let items = || item_types.iter().flat_map(|t| t.items.iter());
        let sum_where = |pred: &dyn Fn(&Item) -> bool| -> Decimal {
            items().filter(|i| pred(i)).map(Item::total).sum()
        };

        let managed_total = sum_where(&|i| i.is_managed);
        let unmanaged_total = sum_where(&|i| !i.is_managed);
        let total_assets = sum_where(&|i| !i.is_liability);
        let total_liabilities = sum_where(&|i| i.is_liability);

        Self {
            managed_total,
            unmanaged_total,
            total_assets,
            total_liabilities,
            net_worth: total_assets - total_liabilities,
            change_since_last: None,
        }
    }

    pub fn managed_total(&self) -> Decimal {
        self.managed_total
    }

    pub fn unmanaged_total(&self) -> Decimal {
        self.unmanaged_total
    }

    pub fn total_assets(&self) -> Decimal {
        self.total_assets
    }

    pub fn total_liabilities(&self) -> Decimal {
        self.total_liabilities
    }

    pub fn net_worth(&self) -> Decimal {
        self.net_worth
    }

    pub fn change_since_last(&self) -> Option<&ChangeSinceLast> {
        self.change_since_last.as_ref()
    }
}

/// The `data` document of a snapshot: grouped items plus summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SnapshotData {
    item_types: Vec<ItemType>,
    summary: SnapshotSummary,
}

impl SnapshotData {
    pub(crate) fn new(item_types: Vec<ItemType>) -> Self {
        let summary = SnapshotSummary::from_item_types(&item_types);
        Self {
            item_types,
            summary,
        }
    }

    pub fn item_types(&self) -> &[ItemType] {
        &self.item_types
    }

    pub fn summary(&self) -> &SnapshotSummary {
        &self.summary
    }

    pub fn net_worth(&self) -> Decimal {
        self.summary.net_worth
    }

    /// Attaches the comparison with the previous snapshot.
    pub fn with_change(mut self, change: Option<ChangeSinceLast>) -> Self {
        self.summary.change_since_last = change;
        self
    }

    /// Re-checks every roll-up of the document.
    ///
    /// Returns `Error::InvariantViolation` on the first inconsistency. Used
    /// after building and after loading persisted documents.
    pub fn verify(&self) -> Result<()> {
        for item_type in &self.item_types {
            let mut keys: Vec<&String> = item_type.totals.owner_amounts.keys().collect();
            for item in &item_type.items {
                let expected = item.owner_amounts.values().copied().sum::<Decimal>() + item.joint;
                if expected != item.total {
                    return Err(invariant(format!(
                        "item '{}' total {} != owner amounts + joint {}",
                        item.name, item.total, expected
                    )));
                }
                keys.extend(item.owner_amounts.keys());
            }
            keys.sort();
            keys.dedup();
            for key in keys {
                let sum: Decimal = item_type.items.iter().map(|i| i.amount_for(key)).sum();
                if sum != item_type.totals.amount_for(key) {
                    return Err(invariant(format!(
                        "type '{}' subtotal for '{}' is {} but items sum to {}",
                        item_type.item_type,
                        key,
                        item_type.totals.amount_for(key),
                        sum
                    )));
                }
            }
            let joint: Decimal = item_type.items.iter().map(Item::joint).sum();
            let total: Decimal = item_type.items.iter().map(Item::total).sum();
            if joint != item_type.totals.joint || total != item_type.totals.total {
                return Err(invariant(format!(
                    "type '{}' totals do not match its items",
                    item_type.item_type
                )));
            }
        }

        let grand_total: Decimal = self.item_types.iter().map(ItemType::total).sum();
        let s = &self.summary;
        if grand_total != s.managed_total + s.unmanaged_total {
            return Err(invariant(format!(
                "grand total {} != managed {} + unmanaged {}",
                grand_total, s.managed_total, s.unmanaged_total
            )));
        }
        if grand_total != s.total_assets + s.total_liabilities {
            return Err(invariant(format!(
                "grand total {} != assets {} + liabilities {}",
                grand_total, s.total_assets, s.total_liabilities
            )));
        }
        if s.net_worth != s.total_assets - s.total_liabilities {
            return Err(invariant(format!(
                "net worth {} != assets {} - liabilities {}",
                s.net_worth, s.total_assets, s.total_liabilities
            )));
        }
        Ok(())
    }
}

fn invariant(message: String) -> Error {
    Error::InvariantViolation(message)
}

/// A persisted, immutable net-worth snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetWorthSnapshot {
    pub id: i32,
    pub client_group_id: String,
    pub snapshot_date: DateTime<Utc>,
    pub created_by: String,
    pub data: SnapshotData,
}

/// Listing row for snapshot history; carries what comparisons need.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetWorthSnapshotSummary {
    pub id: i32,
    pub client_group_id: String,
    pub snapshot_date: DateTime<Utc>,
    pub created_by: String,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub net_worth: Decimal,
}

impl From<&NetWorthSnapshot> for NetWorthSnapshotSummary {
    fn from(snapshot: &NetWorthSnapshot) -> Self {
        Self {
            id: snapshot.id,
            client_group_id: snapshot.client_group_id.clone(),
            snapshot_date: snapshot.snapshot_date,
            created_by: snapshot.created_by.clone(),
            total_assets: snapshot.data.summary.total_assets,
            total_liabilities: snapshot.data.summary.total_liabilities,
            net_worth: snapshot.data.summary.net_worth,
        }
    }
}

/// The point a new snapshot is compared against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviousSnapshot {
    pub snapshot_date: DateTime<Utc>,
    pub net_worth: Decimal,
}

impl From<&NetWorthSnapshotSummary> for PreviousSnapshot {
    fn from(summary: &NetWorthSnapshotSummary) -> Self {
        Self {
            snapshot_date: summary.snapshot_date,
            net_worth: summary.net_worth,
        }
    }
}

impl From<&NetWorthSnapshot> for PreviousSnapshot {
    fn from(snapshot: &NetWorthSnapshot) -> Self {
        Self {
            snapshot_date: snapshot.snapshot_date,
            net_worth: snapshot.data.net_worth(),
        }
    }
}

/// Request body for taking a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSnapshotRequest {
    pub created_by: String,
}
