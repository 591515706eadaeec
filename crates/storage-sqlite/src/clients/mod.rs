//! SQLite storage implementation for client groups and product owners.

mod model;
mod repository;

pub use model::{ClientGroupDB, ProductOwnerDB};
pub use repository::ClientRepository;
