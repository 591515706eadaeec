//! Client group repository and service traits.
//!
//! These traits define the contract for client group and owner operations
//! without any database-specific types.

use async_trait::async_trait;

use super::clients_model::{
    ClientGroup, ClientGroupUpdate, NewClientGroup, NewProductOwner, ProductOwner,
    ProductOwnerUpdate,
};
use crate::errors::Result;

/// Trait defining the contract for client group persistence.
#[async_trait]
pub trait ClientRepositoryTrait: Send + Sync {
    async fn create(&self, new_group: NewClientGroup) -> Result<ClientGroup>;

    async fn update(&self, group_update: ClientGroupUpdate) -> Result<ClientGroup>;

    /// Retrieves a client group by its ID.
    ///
    /// Returns `Error::NotFound` when no such group exists.
    fn get_by_id(&self, client_group_id: &str) -> Result<ClientGroup>;

    fn list(&self) -> Result<Vec<ClientGroup>>;

    async fn create_owner(&self, new_owner: NewProductOwner) -> Result<ProductOwner>;

    async fn update_owner(&self, owner_update: ProductOwnerUpdate) -> Result<ProductOwner>;

    fn get_owner(&self, owner_id: &str) -> Result<ProductOwner>;

    /// Lists the owners of a client group in display order (creation order).
    fn list_owners(&self, client_group_id: &str) -> Result<Vec<ProductOwner>>;
}

/// Trait defining the contract for client group service operations.
#[async_trait]
pub trait ClientServiceTrait: Send + Sync {
    async fn create_client_group(&self, new_group: NewClientGroup) -> Result<ClientGroup>;
    async fn update_client_group(&self, group_update: ClientGroupUpdate) -> Result<ClientGroup>;
    fn get_client_group(&self, client_group_id: &str) -> Result<ClientGroup>;
    fn list_client_groups(&self) -> Result<Vec<ClientGroup>>;

    /// Adds an owner to a client group. Known-as names must be unique within the group.
    async fn create_owner(&self, new_owner: NewProductOwner) -> Result<ProductOwner>;

    /// Updates an owner. Renaming only changes keys of snapshots built afterwards.
    async fn update_owner(&self, owner_update: ProductOwnerUpdate) -> Result<ProductOwner>;

    fn list_owners(&self, client_group_id: &str) -> Result<Vec<ProductOwner>>;
}
