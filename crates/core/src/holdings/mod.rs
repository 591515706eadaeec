//! Holdings module - managed products and unmanaged items recorded per client group.

mod holdings_model;
mod holdings_service;
mod holdings_traits;

pub use holdings_model::{ensure_non_negative, Holding, HoldingUpdate, NewHolding};
pub use holdings_service::HoldingService;
pub use holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};
