use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::clients_model::{
    ClientGroup, ClientGroupUpdate, NewClientGroup, NewProductOwner, ProductOwner,
    ProductOwnerUpdate,
};
use super::clients_traits::{ClientRepositoryTrait, ClientServiceTrait};
use crate::errors::{Error, Result, ValidationError};

/// Service for managing client groups and their product owners
pub struct ClientService {
    repository: Arc<dyn ClientRepositoryTrait>,
}

impl ClientService {
    pub fn new(repository: Arc<dyn ClientRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Rejects a known-as name already taken by another owner of the same group.
    fn ensure_unique_known_as(
        &self,
        client_group_id: &str,
        known_as: &str,
        exclude_owner_id: Option<&str>,
    ) -> Result<()> {
        let clash = self
            .repository
            .list_owners(client_group_id)?
            .into_iter()
            .any(|o| o.known_as == known_as && Some(o.id.as_str()) != exclude_owner_id);
        if clash {
            return Err(Error::Validation(ValidationError::DuplicateOwnerKey(
                known_as.to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ClientServiceTrait for ClientService {
    async fn create_client_group(&self, new_group: NewClientGroup) -> Result<ClientGroup> {
        new_group.validate()?;
        debug!("Creating client group '{}'", new_group.name);
        self.repository.create(new_group).await
    }

    async fn update_client_group(&self, group_update: ClientGroupUpdate) -> Result<ClientGroup> {
        group_update.validate()?;
        self.repository.update(group_update).await
    }

    fn get_client_group(&self, client_group_id: &str) -> Result<ClientGroup> {
        self.repository.get_by_id(client_group_id)
    }

    fn list_client_groups(&self) -> Result<Vec<ClientGroup>> {
        self.repository.list()
    }

    async fn create_owner(&self, new_owner: NewProductOwner) -> Result<ProductOwner> {
        new_owner.validate()?;
        // Fails with NotFound for an unknown group
        self.repository.get_by_id(&new_owner.client_group_id)?;
        self.ensure_unique_known_as(&new_owner.client_group_id, &new_owner.known_as, None)?;
        debug!(
            "Adding owner '{}' to client group {}",
            new_owner.known_as, new_owner.client_group_id
        );
        self.repository.create_owner(new_owner).await
    }

    async fn update_owner(&self, owner_update: ProductOwnerUpdate) -> Result<ProductOwner> {
        owner_update.validate()?;
        let owner_id = owner_update.id.clone().unwrap_or_default();
        let existing = self.repository.get_owner(&owner_id)?;
        self.ensure_unique_known_as(
            &existing.client_group_id,
            &owner_update.known_as,
            Some(&existing.id),
        )?;
        if existing.known_as != owner_update.known_as {
            debug!(
                "Renaming owner {} from '{}' to '{}'",
                existing.id, existing.known_as, owner_update.known_as
            );
        }
        self.repository.update_owner(owner_update).await
    }

    fn list_owners(&self, client_group_id: &str) -> Result<Vec<ProductOwner>> {
        self.repository.get_by_id(client_group_id)?;
        self.repository.list_owners(client_group_id)
    }
}
