use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use kingston_core::networth::{
    select_previous_snapshot, NetWorthRepositoryTrait, NetWorthSnapshot,
    NetWorthSnapshotSummary, SnapshotComposer,
};
use kingston_core::{Error, Result};

use super::model::{
    format_snapshot_date, NetWorthSnapshotDB, NetWorthSnapshotSummaryDB, NewNetWorthSnapshotDB,
};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::networth_snapshots;

pub struct NetWorthRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl NetWorthRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        NetWorthRepository { pool, writer }
    }
}

fn load_summaries(
    conn: &mut SqliteConnection,
    client_group_id: &str,
    before: Option<DateTime<Utc>>,
) -> Result<Vec<NetWorthSnapshotSummary>> {
    let mut query = networth_snapshots::table
        .filter(networth_snapshots::client_group_id.eq(client_group_id))
        .into_boxed();
    if let Some(before) = before {
        query = query.filter(networth_snapshots::snapshot_date.lt(format_snapshot_date(before)));
    }

    let rows = query
        .order((
            networth_snapshots::snapshot_date.desc(),
            networth_snapshots::id.desc(),
        ))
        .select(NetWorthSnapshotSummaryDB::as_select())
        .load(conn)
        .map_err(StorageError::from)?;

    rows.into_iter()
        .map(|row| NetWorthSnapshotSummary::try_from(row).map_err(Error::from))
        .collect()
}

#[async_trait]
impl NetWorthRepositoryTrait for NetWorthRepository {
    async fn create_snapshot(
        &self,
        client_group_id: &str,
        created_by: &str,
        snapshot_date: DateTime<Utc>,
        compose: SnapshotComposer,
    ) -> Result<NetWorthSnapshot> {
        let client_group_id = client_group_id.to_string();
        let created_by = created_by.to_string();

        // Selection and insert share one immediate transaction on the writer
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<NetWorthSnapshot> {
                let history = load_summaries(conn, &client_group_id, Some(snapshot_date))?;
                let previous = select_previous_snapshot(&history, snapshot_date);
                debug!(
                    "Previous snapshot for client group {}: {:?}",
                    client_group_id,
                    previous.map(|p| p.id)
                );

                let data = compose(previous)?;
                let new_row =
                    NewNetWorthSnapshotDB::new(&client_group_id, &created_by, snapshot_date, &data)?;

                let inserted = diesel::insert_into(networth_snapshots::table)
                    .values(&new_row)
                    .returning(NetWorthSnapshotDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(NetWorthSnapshot::try_from(inserted)?)
            })
            .await
    }

    fn get_by_id(&self, snapshot_id: i32) -> Result<NetWorthSnapshot> {
        let mut conn = get_connection(&self.pool)?;
        let row = networth_snapshots::table
            .find(snapshot_id)
            .select(NetWorthSnapshotDB::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("Snapshot {}", snapshot_id)))?;
        Ok(NetWorthSnapshot::try_from(row)?)
    }

    fn list_by_client_group(&self, client_group_id: &str) -> Result<Vec<NetWorthSnapshotSummary>> {
        let mut conn = get_connection(&self.pool)?;
        load_summaries(&mut conn, client_group_id, None)
    }
}
