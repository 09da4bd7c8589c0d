//! Port for group shops.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::Shop;
use crate::domain::value_objects::{Identifier, NameWithSpaces};

use super::RepositoryError;

/// Port for storing shops.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopRepository: Send + Sync {
    async fn save(&self, shop: &Shop) -> Result<(), RepositoryError>;

    async fn find_by_id(
        &self,
        group_id: &Identifier,
        id: &Identifier,
    ) -> Result<Option<Shop>, RepositoryError>;

    async fn find_by_name(
        &self,
        group_id: &Identifier,
        name: &NameWithSpaces,
    ) -> Result<Option<Shop>, RepositoryError>;

    /// Shops of the group ordered by name, optionally filtered by a
    /// case-insensitive name prefix.
    async fn list(
        &self,
        group_id: &Identifier,
        name_prefix: Option<String>,
        request: PageRequest,
    ) -> Result<Page<Shop>, RepositoryError>;
}
