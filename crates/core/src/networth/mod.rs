//! Net-worth snapshot module.
//!
//! This module builds hierarchical net-worth documents from a client's
//! holdings, compares them with the previous persisted snapshot, and
//! defines the persistence contract for snapshot history.

mod change_calculator;
mod networth_model;
mod networth_service;
mod networth_traits;
mod snapshot_builder;

pub use change_calculator::*;
pub use networth_model::*;
pub use networth_service::*;
pub use networth_traits::*;
pub use snapshot_builder::*;

#[cfg(test)]
mod snapshot_builder_tests;
