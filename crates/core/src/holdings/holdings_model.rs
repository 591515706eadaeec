//! Holdings domain models.
//!
//! A holding is one named line on a client's net-worth statement. Managed
//! holdings are products administered through the firm; unmanaged ones are
//! recorded by an advisor for completeness.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a stored holding.
///
/// `owner_amounts` is keyed by owner *id*; keys are translated to the owners'
/// current known-as names when a snapshot is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub client_group_id: String,
    pub name: String,
    /// Grouping label, e.g. "GIAs" or "Bank Accounts"
    pub item_type: String,
    pub is_managed: bool,
    pub is_liability: bool,
    pub owner_amounts: BTreeMap<String, Decimal>,
    pub joint: Decimal,
    /// Curated position within its group
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    pub id: Option<String>,
    #[serde(default)]
    pub client_group_id: String,
    pub name: String,
    pub item_type: String,
    pub is_managed: bool,
    #[serde(default)]
    pub is_liability: bool,
    #[serde(default)]
    pub owner_amounts: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub joint: Decimal,
    #[serde(default)]
    pub display_order: i32,
}

impl NewHolding {
    /// Validates the shape of the holding. Owner membership is checked by the service.
    pub fn validate(&self) -> Result<()> {
        if self.client_group_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "clientGroupId".to_string(),
            )));
        }
        validate_holding_fields(&self.name, &self.item_type, &self.owner_amounts, self.joint)
    }
}

/// Input model for updating a holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingUpdate {
    pub id: Option<String>,
    pub name: String,
    pub item_type: String,
    pub is_managed: bool,
    #[serde(default)]
    pub is_liability: bool,
    #[serde(default)]
    pub owner_amounts: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub joint: Decimal,
    #[serde(default)]
    pub display_order: i32,
}

impl HoldingUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Holding ID is required for updates".to_string(),
            )));
        }
        validate_holding_fields(&self.name, &self.item_type, &self.owner_amounts, self.joint)
    }
}

fn validate_holding_fields(
    name: &str,
    item_type: &str,
    owner_amounts: &BTreeMap<String, Decimal>,
    joint: Decimal,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "name".to_string(),
        )));
    }
    if item_type.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "itemType".to_string(),
        )));
    }
    for (key, amount) in owner_amounts {
        ensure_non_negative(name, key, *amount)?;
    }
    ensure_non_negative(name, "joint", joint)
}

/// Fails with `NegativeAmount` when `amount` is below zero.
pub fn ensure_non_negative(item: &str, key: &str, amount: Decimal) -> Result<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::Validation(ValidationError::NegativeAmount {
            item: item.to_string(),
            key: key.to_string(),
            amount,
        }));
    }
    Ok(())
}
