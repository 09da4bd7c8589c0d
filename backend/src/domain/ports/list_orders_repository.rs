//! Port for shopping lists.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ListOrders;
use crate::domain::value_objects::{Identifier, NameWithSpaces};

use super::RepositoryError;

/// Port for storing lists of orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListOrdersRepository: Send + Sync {
    async fn save(&self, list_orders: &ListOrders) -> Result<(), RepositoryError>;

    async fn find_by_id(
        &self,
        group_id: &Identifier,
        id: &Identifier,
    ) -> Result<Option<ListOrders>, RepositoryError>;

    async fn find_by_name(
        &self,
        group_id: &Identifier,
        name: &NameWithSpaces,
    ) -> Result<Option<ListOrders>, RepositoryError>;

    /// Lists of the group, newest first.
    async fn list(
        &self,
        group_id: &Identifier,
        request: PageRequest,
    ) -> Result<Page<ListOrders>, RepositoryError>;
}
