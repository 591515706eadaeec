//! Client group and product owner domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{RESERVED_CLIENT_GROUP_IDS, RESERVED_ITEM_KEYS};
use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a client group (a household or related set of clients).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientGroup {
    pub id: String,
    pub name: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new client group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClientGroup {
    pub id: Option<String>,
    pub name: String,
    pub status: Option<String>,
}

impl NewClientGroup {
    /// Validates the new client group data.
    ///
    /// A caller-chosen id must be usable as a single URL path segment and must
    /// not shadow a fixed net-worth route.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Client group name cannot be empty".to_string(),
            )));
        }
        if let Some(id) = &self.id {
            if id.trim().is_empty() || id.contains('/') {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Client group ID '{}' is not a valid path segment",
                    id
                ))));
            }
            if RESERVED_CLIENT_GROUP_IDS.contains(&id.as_str()) {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Client group ID '{}' is reserved",
                    id
                ))));
            }
        }
        Ok(())
    }
}

/// Input model for updating an existing client group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientGroupUpdate {
    pub id: Option<String>,
    pub name: String,
    pub status: String,
}

impl ClientGroupUpdate {
    /// Validates the client group update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Client group ID is required for updates".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Client group name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// A person associated with a client group.
///
/// `known_as` is the owner's chosen display name and doubles as the column
/// key in net-worth tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductOwner {
    pub id: String,
    pub client_group_id: String,
    pub known_as: String,
    pub firstname: Option<String>,
    pub surname: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a product owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductOwner {
    pub id: Option<String>,
    /// Taken from the route when created over HTTP
    #[serde(default)]
    pub client_group_id: String,
    pub known_as: String,
    pub firstname: Option<String>,
    pub surname: Option<String>,
    pub status: Option<String>,
}

impl NewProductOwner {
    pub fn validate(&self) -> Result<()> {
        if self.client_group_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "clientGroupId".to_string(),
            )));
        }
        validate_owner_key(&self.known_as)
    }
}

/// Input model for updating (typically renaming) a product owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOwnerUpdate {
    pub id: Option<String>,
    pub known_as: String,
    pub firstname: Option<String>,
    pub surname: Option<String>,
    pub status: String,
}

impl ProductOwnerUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Owner ID is required for updates".to_string(),
            )));
        }
        validate_owner_key(&self.known_as)
    }
}

/// Checks that a known-as name can be used as a snapshot column key.
pub fn validate_owner_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "knownAs".to_string(),
        )));
    }
    if RESERVED_ITEM_KEYS.contains(&key) {
        return Err(Error::Validation(ValidationError::ReservedOwnerKey(
            key.to_string(),
        )));
    }
    Ok(())
}
