//! In-memory shopping lists and their orders.

use std::cmp::Reverse;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tokio::sync::RwLock;

use super::paginate;
use crate::domain::ports::{ListOrdersRepository, OrderRepository, RepositoryError};
use crate::domain::value_objects::{Identifier, NameWithSpaces};
use crate::domain::{ListOrders, Order};

/// Shopping lists of every group.
#[derive(Debug, Default)]
pub struct MemoryListOrdersRepository {
    lists: RwLock<Vec<ListOrders>>,
}

#[async_trait]
impl ListOrdersRepository for MemoryListOrdersRepository {
    async fn save(&self, list_orders: &ListOrders) -> Result<(), RepositoryError> {
        let mut lists = self.lists.write().await;
        if lists.iter().any(|stored| {
            stored.group_id == list_orders.group_id && stored.name == list_orders.name
        }) {
            return Err(RepositoryError::duplicate(format!(
                "list name {}",
                list_orders.name
            )));
        }
        lists.push(list_orders.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        group_id: &Identifier,
        id: &Identifier,
    ) -> Result<Option<ListOrders>, RepositoryError> {
        let lists = self.lists.read().await;
        Ok(lists
            .iter()
            .find(|list| &list.group_id == group_id && &list.id == id)
            .cloned())
    }

    async fn find_by_name(
        &self,
        group_id: &Identifier,
        name: &NameWithSpaces,
    ) -> Result<Option<ListOrders>, RepositoryError> {
        let lists = self.lists.read().await;
        Ok(lists
            .iter()
            .find(|list| &list.group_id == group_id && &list.name == name)
            .cloned())
    }

    async fn list(
        &self,
        group_id: &Identifier,
        request: PageRequest,
    ) -> Result<Page<ListOrders>, RepositoryError> {
        let lists = self.lists.read().await;
        let mut rows: Vec<ListOrders> = lists
            .iter()
            .filter(|list| &list.group_id == group_id)
            .cloned()
            .collect();
        rows.sort_by_key(|list| Reverse(list.created_on));
        Ok(paginate(rows, request))
    }
}

/// Orders placed on shopping lists.
#[derive(Debug, Default)]
pub struct MemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|stored| stored.id == order.id) {
            return Err(RepositoryError::duplicate(format!("order {}", order.id)));
        }
        orders.push(order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut orders = self.orders.write().await;
        let stored = orders
            .iter_mut()
            .find(|stored| stored.id == order.id)
            .ok_or_else(|| RepositoryError::query(format!("order {} does not exist", order.id)))?;
        *stored = order.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        group_id: &Identifier,
        id: &Identifier,
    ) -> Result<Option<Order>, RepositoryError> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .find(|order| &order.group_id == group_id && &order.id == id)
            .cloned())
    }

    async fn list_for_list_orders(
        &self,
        group_id: &Identifier,
        list_orders_id: &Identifier,
        request: PageRequest,
    ) -> Result<Page<Order>, RepositoryError> {
        let orders = self.orders.read().await;
        let mut rows: Vec<Order> = orders
            .iter()
            .filter(|order| &order.group_id == group_id && &order.list_orders_id == list_orders_id)
            .cloned()
            .collect();
        rows.sort_by_key(|order| order.created_on);
        Ok(paginate(rows, request))
    }
}
