use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::holdings_model::{Holding, HoldingUpdate, NewHolding};
use super::holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};
use crate::clients::ClientRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};

/// Service for recording managed and unmanaged holdings against a client group
pub struct HoldingService {
    repository: Arc<dyn HoldingRepositoryTrait>,
    client_repository: Arc<dyn ClientRepositoryTrait>,
}

impl HoldingService {
    pub fn new(
        repository: Arc<dyn HoldingRepositoryTrait>,
        client_repository: Arc<dyn ClientRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            client_repository,
        }
    }

    /// Every attributed owner id must belong to the holding's client group.
    fn ensure_owners_belong(
        &self,
        client_group_id: &str,
        holding_name: &str,
        owner_amounts: &BTreeMap<String, Decimal>,
    ) -> Result<()> {
        let owners = self.client_repository.list_owners(client_group_id)?;
        for owner_id in owner_amounts.keys() {
            if !owners.iter().any(|o| &o.id == owner_id) {
                return Err(Error::Validation(ValidationError::UnknownOwner {
                    item: holding_name.to_string(),
                    owner: owner_id.clone(),
                }));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl HoldingServiceTrait for HoldingService {
    async fn create_holding(&self, new_holding: NewHolding) -> Result<Holding> {
        new_holding.validate()?;
        self.client_repository
            .get_by_id(&new_holding.client_group_id)?;
        self.ensure_owners_belong(
            &new_holding.client_group_id,
            &new_holding.name,
            &new_holding.owner_amounts,
        )?;
        debug!(
            "Recording {} holding '{}' ({}) for client group {}",
            if new_holding.is_managed { "managed" } else { "unmanaged" },
            new_holding.name,
            new_holding.item_type,
            new_holding.client_group_id
        );
        self.repository.create(new_holding).await
    }

    async fn update_holding(&self, holding_update: HoldingUpdate) -> Result<Holding> {
        holding_update.validate()?;
        let holding_id = holding_update.id.clone().unwrap_or_default();
        let existing = self.repository.get_by_id(&holding_id)?;
        self.ensure_owners_belong(
            &existing.client_group_id,
            &holding_update.name,
            &holding_update.owner_amounts,
        )?;
        self.repository.update(holding_update).await
    }

    async fn delete_holding(&self, holding_id: &str) -> Result<()> {
        let deleted = self.repository.delete(holding_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Holding {}", holding_id)));
        }
        Ok(())
    }

    fn get_holding(&self, holding_id: &str) -> Result<Holding> {
        self.repository.get_by_id(holding_id)
    }

    fn list_holdings(&self, client_group_id: &str) -> Result<Vec<Holding>> {
        self.client_repository.get_by_id(client_group_id)?;
        self.repository.list_by_client_group(client_group_id)
    }
}
