//! Database models for net-worth snapshots.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use kingston_core::errors::DatabaseError;
use kingston_core::networth::{NetWorthSnapshot, NetWorthSnapshotSummary, SnapshotData};
use kingston_core::Error;

use crate::errors::StorageError;

/// Database model for a stored snapshot row.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::networth_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NetWorthSnapshotDB {
    pub id: i32,
    pub client_group_id: String,
    pub snapshot_date: String,
    pub created_by: String,
    pub total_assets: String,
    pub total_liabilities: String,
    pub net_worth: String,
    pub data: String,
    pub created_at: NaiveDateTime,
}

/// Database model for inserting a snapshot; the id is assigned by SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::networth_snapshots)]
pub struct NewNetWorthSnapshotDB {
    pub client_group_id: String,
    pub snapshot_date: String,
    pub created_by: String,
    pub total_assets: String,
    pub total_liabilities: String,
    pub net_worth: String,
    pub data: String,
    pub created_at: NaiveDateTime,
}

/// History row without the document body.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::networth_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NetWorthSnapshotSummaryDB {
    pub id: i32,
    pub client_group_id: String,
    pub snapshot_date: String,
    pub created_by: String,
    pub total_assets: String,
    pub total_liabilities: String,
    pub net_worth: String,
}

impl NewNetWorthSnapshotDB {
    pub fn new(
        client_group_id: &str,
        created_by: &str,
        snapshot_date: DateTime<Utc>,
        data: &SnapshotData,
    ) -> Result<Self, StorageError> {
        let summary = data.summary();
        Ok(Self {
            client_group_id: client_group_id.to_string(),
            snapshot_date: format_snapshot_date(snapshot_date),
            created_by: created_by.to_string(),
            total_assets: summary.total_assets().to_string(),
            total_liabilities: summary.total_liabilities().to_string(),
            net_worth: summary.net_worth().to_string(),
            data: serde_json::to_string(data)?,
            created_at: Utc::now().naive_utc(),
        })
    }
}

/// Fixed-width RFC 3339 in UTC so that text ordering matches time ordering.
pub(crate) fn format_snapshot_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_snapshot_date(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| corrupt(format!("snapshot date '{}': {}", raw, e)))
}

fn parse_amount(raw: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw).map_err(|e| corrupt(format!("amount '{}': {}", raw, e)))
}

fn corrupt(message: String) -> StorageError {
    StorageError::Core(Error::Database(DatabaseError::Internal(format!(
        "Corrupt snapshot row, {}",
        message
    ))))
}

// Loaded documents are re-checked; a document that no longer adds up is an invariant violation
impl TryFrom<NetWorthSnapshotDB> for NetWorthSnapshot {
    type Error = StorageError;

    fn try_from(db: NetWorthSnapshotDB) -> Result<Self, Self::Error> {
        let data: SnapshotData = serde_json::from_str(&db.data)?;
        data.verify()?;
        Ok(Self {
            id: db.id,
            client_group_id: db.client_group_id,
            snapshot_date: parse_snapshot_date(&db.snapshot_date)?,
            created_by: db.created_by,
            data,
        })
    }
}

impl TryFrom<NetWorthSnapshotSummaryDB> for NetWorthSnapshotSummary {
    type Error = StorageError;

    fn try_from(db: NetWorthSnapshotSummaryDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            client_group_id: db.client_group_id,
            snapshot_date: parse_snapshot_date(&db.snapshot_date)?,
            created_by: db.created_by,
            total_assets: parse_amount(&db.total_assets)?,
            total_liabilities: parse_amount(&db.total_liabilities)?,
            net_worth: parse_amount(&db.net_worth)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn snapshot_dates_sort_lexically() {
        let earlier = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap();

        let a = format_snapshot_date(earlier);
        let b = format_snapshot_date(later);
        assert_eq!(a, "2024-04-01T09:00:00.000000Z");
        assert!(a < b);
        assert_eq!(parse_snapshot_date(&a).unwrap(), earlier);
    }

    #[test]
    fn malformed_date_is_reported_as_corrupt() {
        let err = Error::from(parse_snapshot_date("last tuesday").unwrap_err());
        assert!(matches!(err, Error::Database(DatabaseError::Internal(_))));
    }
}
