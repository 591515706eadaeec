//! Clients module - client groups and product owners.

mod clients_model;
mod clients_service;
mod clients_traits;

pub use clients_model::{
    validate_owner_key, ClientGroup, ClientGroupUpdate, NewClientGroup, NewProductOwner,
    ProductOwner, ProductOwnerUpdate,
};
pub use clients_service::ClientService;
pub use clients_traits::{ClientRepositoryTrait, ClientServiceTrait};

#[cfg(test)]
mod clients_service_tests;
