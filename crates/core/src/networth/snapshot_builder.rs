//! Builds the hierarchical net-worth document from a client's holdings.

use log::{debug, error};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::networth_model::{HoldingInput, Item, ItemType, SnapshotData};
use crate::clients::validate_owner_key;
use crate::errors::{Error, Result, ValidationError};
use crate::holdings::ensure_non_negative;

/// Builds `SnapshotData` (without `change_since_last`) for the given owners.
///
/// Items are grouped by their exact `item_type` label. Groups appear in the
/// order their first item was supplied and items keep their supplied order.
/// Every owner key appears on every item, zero-filled.
///
/// # Errors
/// * `ValidationError` for negative amounts, owner keys outside `owner_keys`,
///   blank names/type labels, or an invalid owner set. Nothing is built.
/// * `InvariantViolation` if the finished document fails its own roll-up checks.
pub fn build_snapshot_data(owner_keys: &[String], holdings: &[HoldingInput]) -> Result<SnapshotData> {
    validate_owner_set(owner_keys)?;
    for holding in holdings {
        validate_holding(owner_keys, holding)?;
    }

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<Item>> = HashMap::new();
    for holding in holdings {
        let key = holding.item_type.as_str();
        if !groups.contains_key(key) {
            order.push(key);
        }
        groups.entry(key).or_default().push(to_item(owner_keys, holding));
    }

    let item_types: Vec<ItemType> = order
        .into_iter()
        .map(|label| {
            let items = groups.remove(label).unwrap_or_default();
            ItemType::new(label.to_string(), owner_keys, items)
        })
        .collect();

    let data = SnapshotData::new(item_types);
    if let Err(e) = data.verify() {
        error!("Built snapshot failed its consistency check: {}", e);
        return Err(e);
    }

    debug!(
        "Built net-worth snapshot: {} item types, {} items, net worth {}",
        data.item_types().len(),
        holdings.len(),
        data.net_worth()
    );
    Ok(data)
}

fn validate_owner_set(owner_keys: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for key in owner_keys {
        validate_owner_key(key)?;
        if !seen.insert(key.as_str()) {
            return Err(Error::Validation(ValidationError::DuplicateOwnerKey(
                key.clone(),
            )));
        }
    }
    Ok(())
}

fn validate_holding(owner_keys: &[String], holding: &HoldingInput) -> Result<()> {
    if holding.name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "name".to_string(),
        )));
    }
    if holding.item_type.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Item '{}' has no type",
            holding.name
        ))));
    }
    for (key, amount) in &holding.owner_amounts {
        if !owner_keys.iter().any(|k| k == key) {
            return Err(Error::Validation(ValidationError::UnknownOwner {
                item: holding.name.clone(),
                owner: key.clone(),
            }));
        }
        ensure_non_negative(&holding.name, key, *amount)?;
    }
    ensure_non_negative(&holding.name, "joint", holding.joint)
}

fn to_item(owner_keys: &[String], holding: &HoldingInput) -> Item {
    let owner_amounts: BTreeMap<String, Decimal> = owner_keys
        .iter()
        .map(|key| {
            let amount = holding
                .owner_amounts
                .get(key)
                .copied()
                .unwrap_or(Decimal::ZERO);
            (key.clone(), amount)
        })
        .collect();
    Item::new(
        holding.name.clone(),
        holding.is_managed,
        holding.is_liability,
        owner_amounts,
        holding.joint,
    )
}
