//! Port for orders on shopping lists.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::Order;
use crate::domain::value_objects::Identifier;

use super::RepositoryError;

/// Port for storing orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError>;

    /// Replace a stored order.
    async fn update(&self, order: &Order) -> Result<(), RepositoryError>;

    async fn find_by_id(
        &self,
        group_id: &Identifier,
        id: &Identifier,
    ) -> Result<Option<Order>, RepositoryError>;

    /// Orders on one list, oldest first.
    async fn list_for_list_orders(
        &self,
        group_id: &Identifier,
        list_orders_id: &Identifier,
        request: PageRequest,
    ) -> Result<Page<Order>, RepositoryError>;
}
