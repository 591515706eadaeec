//! Database models for client groups and product owners.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use kingston_core::clients::{ClientGroup, ProductOwner};

/// Database model for client groups
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
#[diesel(table_name = crate::schema::client_groups)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ClientGroupDB {
    pub id: String,
    pub name: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for product owners
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(ClientGroupDB, foreign_key = client_group_id))]
#[diesel(table_name = crate::schema::product_owners)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ProductOwnerDB {
    pub id: String,
    pub client_group_id: String,
    pub known_as: String,
    pub firstname: Option<String>,
    pub surname: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl From<ClientGroupDB> for ClientGroup {
    fn from(db: ClientGroupDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            status: db.status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<ProductOwnerDB> for ProductOwner {
    fn from(db: ProductOwnerDB) -> Self {
        Self {
            id: db.id,
            client_group_id: db.client_group_id,
            known_as: db.known_as,
            firstname: db.firstname,
            surname: db.surname,
            status: db.status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
