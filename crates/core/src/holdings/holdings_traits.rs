use async_trait::async_trait;

use super::holdings_model::{Holding, HoldingUpdate, NewHolding};
use crate::errors::Result;

/// Trait defining the contract for holding persistence.
#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    async fn create(&self, new_holding: NewHolding) -> Result<Holding>;
    async fn update(&self, holding_update: HoldingUpdate) -> Result<Holding>;
    async fn delete(&self, holding_id: &str) -> Result<usize>;
    fn get_by_id(&self, holding_id: &str) -> Result<Holding>;

    /// Lists holdings of a client group ordered by `display_order`, then creation time.
    fn list_by_client_group(&self, client_group_id: &str) -> Result<Vec<Holding>>;
}

/// Trait defining the contract for holding service operations.
#[async_trait]
pub trait HoldingServiceTrait: Send + Sync {
    async fn create_holding(&self, new_holding: NewHolding) -> Result<Holding>;
    async fn update_holding(&self, holding_update: HoldingUpdate) -> Result<Holding>;
    async fn delete_holding(&self, holding_id: &str) -> Result<()>;
    fn get_holding(&self, holding_id: &str) -> Result<Holding>;
    fn list_holdings(&self, client_group_id: &str) -> Result<Vec<Holding>>;
}
