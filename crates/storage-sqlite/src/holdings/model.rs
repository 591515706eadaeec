//! Database models for holdings.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use kingston_core::errors::DatabaseError;
use kingston_core::holdings::Holding;
use kingston_core::Error;

use crate::errors::StorageError;

/// Database model for holdings.
///
/// Amounts are stored as decimal strings; `owner_amounts` is a JSON object of
/// owner id to decimal string.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct HoldingDB {
    pub id: String,
    pub client_group_id: String,
    pub name: String,
    pub item_type: String,
    pub is_managed: bool,
    pub is_liability: bool,
    pub owner_amounts: String,
    pub joint: String,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

pub(crate) fn encode_owner_amounts(
    owner_amounts: &BTreeMap<String, Decimal>,
) -> Result<String, StorageError> {
    let as_text: BTreeMap<&str, String> = owner_amounts
        .iter()
        .map(|(owner_id, amount)| (owner_id.as_str(), amount.to_string()))
        .collect();
    Ok(serde_json::to_string(&as_text)?)
}

fn decode_owner_amounts(raw: &str) -> Result<BTreeMap<String, Decimal>, StorageError> {
    let as_text: BTreeMap<String, String> = serde_json::from_str(raw)?;
    as_text
        .into_iter()
        .map(|(owner_id, amount)| Ok((owner_id, parse_amount(&amount)?)))
        .collect()
}

fn parse_amount(raw: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw).map_err(|e| {
        StorageError::Core(Error::Database(DatabaseError::Internal(format!(
            "Corrupt holding amount '{}': {}",
            raw, e
        ))))
    })
}

// Conversion to domain model; stored amounts must parse, never default to zero
impl TryFrom<HoldingDB> for Holding {
    type Error = StorageError;

    fn try_from(db: HoldingDB) -> Result<Self, Self::Error> {
        Ok(Self {
            owner_amounts: decode_owner_amounts(&db.owner_amounts)?,
            joint: parse_amount(&db.joint)?,
            id: db.id,
            client_group_id: db.client_group_id,
            name: db.name,
            item_type: db.item_type,
            is_managed: db.is_managed,
            is_liability: db.is_liability,
            display_order: db.display_order,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
