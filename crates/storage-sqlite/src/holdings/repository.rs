use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use kingston_core::holdings::{Holding, HoldingRepositoryTrait, HoldingUpdate, NewHolding};
use kingston_core::{Error, Result};

use super::model::{encode_owner_amounts, HoldingDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::holdings;

pub struct HoldingRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl HoldingRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        HoldingRepository { pool, writer }
    }
}

#[async_trait]
impl HoldingRepositoryTrait for HoldingRepository {
    async fn create(&self, new_holding: NewHolding) -> Result<Holding> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Holding> {
                let now = Utc::now().naive_utc();
                let holding_db = HoldingDB {
                    id: new_holding
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    client_group_id: new_holding.client_group_id,
                    name: new_holding.name,
                    item_type: new_holding.item_type,
                    is_managed: new_holding.is_managed,
                    is_liability: new_holding.is_liability,
                    owner_amounts: encode_owner_amounts(&new_holding.owner_amounts)?,
                    joint: new_holding.joint.to_string(),
                    display_order: new_holding.display_order,
                    created_at: now,
                    updated_at: now,
                };
                let result_db = diesel::insert_into(holdings::table)
                    .values(&holding_db)
                    .returning(HoldingDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Holding::try_from(result_db)?)
            })
            .await
    }

    async fn update(&self, holding_update: HoldingUpdate) -> Result<Holding> {
        let holding_id = holding_update.id.clone().unwrap_or_default();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Holding> {
                let updated = diesel::update(holdings::table.find(&holding_id))
                    .set((
                        holdings::name.eq(holding_update.name),
                        holdings::item_type.eq(holding_update.item_type),
                        holdings::is_managed.eq(holding_update.is_managed),
                        holdings::is_liability.eq(holding_update.is_liability),
                        holdings::owner_amounts
                            .eq(encode_owner_amounts(&holding_update.owner_amounts)?),
                        holdings::joint.eq(holding_update.joint.to_string()),
                        holdings::display_order.eq(holding_update.display_order),
                        holdings::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(HoldingDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::NotFound(format!("Holding {}", holding_id)))?;
                Ok(Holding::try_from(updated)?)
            })
            .await
    }

    async fn delete(&self, holding_id: &str) -> Result<usize> {
        let id_owned = holding_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let affected = diesel::delete(holdings::table.find(id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, holding_id: &str) -> Result<Holding> {
        let mut conn = get_connection(&self.pool)?;
        let holding_db = holdings::table
            .find(holding_id)
            .select(HoldingDB::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("Holding {}", holding_id)))?;
        Ok(Holding::try_from(holding_db)?)
    }

    fn list_by_client_group(&self, client_group_id: &str) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;
        let holdings_db = holdings::table
            .filter(holdings::client_group_id.eq(client_group_id))
            .order((
                holdings::display_order.asc(),
                holdings::created_at.asc(),
                holdings::id.asc(),
            ))
            .select(HoldingDB::as_select())
            .load(&mut conn)
            .into_core()?;

        holdings_db
            .into_iter()
            .map(|db| Holding::try_from(db).map_err(Error::from))
            .collect()
    }
}
