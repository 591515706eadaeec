use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use kingston_core::clients::{
    ClientGroup, ClientGroupUpdate, ClientRepositoryTrait, NewClientGroup, NewProductOwner,
    ProductOwner, ProductOwnerUpdate,
};
use kingston_core::constants::STATUS_ACTIVE;
use kingston_core::{Error, Result};

use super::model::{ClientGroupDB, ProductOwnerDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{client_groups, product_owners};

pub struct ClientRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ClientRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ClientRepository { pool, writer }
    }
}

#[async_trait]
impl ClientRepositoryTrait for ClientRepository {
    async fn create(&self, new_group: NewClientGroup) -> Result<ClientGroup> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ClientGroup> {
                let now = Utc::now().naive_utc();
                let group_db = ClientGroupDB {
                    id: new_group
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: new_group.name,
                    status: new_group
                        .status
                        .unwrap_or_else(|| STATUS_ACTIVE.to_string()),
                    created_at: now,
                    updated_at: now,
                };
                let result_db = diesel::insert_into(client_groups::table)
                    .values(&group_db)
                    .returning(ClientGroupDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(ClientGroup::from(result_db))
            })
            .await
    }

    async fn update(&self, group_update: ClientGroupUpdate) -> Result<ClientGroup> {
        let group_id = group_update.id.clone().unwrap_or_default();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ClientGroup> {
                let updated = diesel::update(client_groups::table.find(&group_id))
                    .set((
                        client_groups::name.eq(group_update.name),
                        client_groups::status.eq(group_update.status),
                        client_groups::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(ClientGroupDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::NotFound(format!("Client group {}", group_id)))?;
                Ok(ClientGroup::from(updated))
            })
            .await
    }

    fn get_by_id(&self, client_group_id: &str) -> Result<ClientGroup> {
        let mut conn = get_connection(&self.pool)?;
        client_groups::table
            .find(client_group_id)
            .select(ClientGroupDB::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(ClientGroup::from)
            .ok_or_else(|| Error::NotFound(format!("Client group {}", client_group_id)))
    }

    fn list(&self) -> Result<Vec<ClientGroup>> {
        let mut conn = get_connection(&self.pool)?;
        let groups_db = client_groups::table
            .order(client_groups::name.asc())
            .select(ClientGroupDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(groups_db.into_iter().map(ClientGroup::from).collect())
    }

    async fn create_owner(&self, new_owner: NewProductOwner) -> Result<ProductOwner> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ProductOwner> {
                let now = Utc::now().naive_utc();
                let owner_db = ProductOwnerDB {
                    id: new_owner
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    client_group_id: new_owner.client_group_id,
                    known_as: new_owner.known_as,
                    firstname: new_owner.firstname,
                    surname: new_owner.surname,
                    status: new_owner
                        .status
                        .unwrap_or_else(|| STATUS_ACTIVE.to_string()),
                    created_at: now,
                    updated_at: now,
                };
                let result_db = diesel::insert_into(product_owners::table)
                    .values(&owner_db)
                    .returning(ProductOwnerDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(ProductOwner::from(result_db))
            })
            .await
    }

    async fn update_owner(&self, owner_update: ProductOwnerUpdate) -> Result<ProductOwner> {
        let owner_id = owner_update.id.clone().unwrap_or_default();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ProductOwner> {
                let updated = diesel::update(product_owners::table.find(&owner_id))
                    .set((
                        product_owners::known_as.eq(owner_update.known_as),
                        product_owners::firstname.eq(owner_update.firstname),
                        product_owners::surname.eq(owner_update.surname),
                        product_owners::status.eq(owner_update.status),
                        product_owners::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(ProductOwnerDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::NotFound(format!("Owner {}", owner_id)))?;
                Ok(ProductOwner::from(updated))
            })
            .await
    }

    fn get_owner(&self, owner_id: &str) -> Result<ProductOwner> {
        let mut conn = get_connection(&self.pool)?;
        product_owners::table
            .find(owner_id)
            .select(ProductOwnerDB::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(ProductOwner::from)
            .ok_or_else(|| Error::NotFound(format!("Owner {}", owner_id)))
    }

    fn list_owners(&self, client_group_id: &str) -> Result<Vec<ProductOwner>> {
        let mut conn = get_connection(&self.pool)?;
        let owners_db = product_owners::table
            .filter(product_owners::client_group_id.eq(client_group_id))
            .order((product_owners::created_at.asc(), product_owners::id.asc()))
            .select(ProductOwnerDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(owners_db.into_iter().map(ProductOwner::from).collect())
    }
}
