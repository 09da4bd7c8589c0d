//! Port for group product catalogues.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::value_objects::{Identifier, NameWithSpaces};
use crate::domain::{Product, ProductShop};

use super::RepositoryError;

/// Port for storing products and their shop prices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a product with its per-shop prices.
    async fn save(&self, product: &Product, prices: &[ProductShop]) -> Result<(), RepositoryError>;

    async fn find_by_id(
        &self,
        group_id: &Identifier,
        id: &Identifier,
    ) -> Result<Option<Product>, RepositoryError>;

    async fn find_by_name(
        &self,
        group_id: &Identifier,
        name: &NameWithSpaces,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Products of the group ordered by name, optionally filtered by a
    /// case-insensitive name prefix.
    async fn list(
        &self,
        group_id: &Identifier,
        name_prefix: Option<String>,
        request: PageRequest,
    ) -> Result<Page<Product>, RepositoryError>;

    /// Shop prices recorded for a product.
    async fn prices(&self, product_id: &Identifier) -> Result<Vec<ProductShop>, RepositoryError>;
}
