//! Business logic services

pub mod accounts;
pub mod catalog;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub accounts: accounts::AccountsService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            accounts: accounts::AccountsService::new(repository.users.clone()),
            catalog: catalog::CatalogService::new(repository.books),
        }
    }
}
