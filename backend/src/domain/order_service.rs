//! Order services: items placed on shopping lists.

use std::sync::Arc;

use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::info;

use crate::domain::ports::{
    GroupRepository, ListOrdersRepository, OrderRepository, ProductRepository, ShopRepository,
};
use crate::domain::service_support::{
    ensure_valid, map_repository_error, not_found, require_member,
};
use crate::domain::validation::ValidationBuilder;
use crate::domain::value_objects::{Amount, Description, Identifier, IdentifierNullable};
use crate::domain::{Error, Order};

/// Data required to place an order.
#[derive(Debug, Clone)]
pub struct CreateOrderRequest {
    pub group_id: Identifier,
    pub user_id: Identifier,
    pub list_orders_id: Identifier,
    pub product_id: Identifier,
    pub shop_id: IdentifierNullable,
    pub description: Description,
    pub amount: Amount,
}

/// Stores an order service reads from.
pub struct OrderStores<O, L, P, S, G> {
    pub orders: Arc<O>,
    pub lists: Arc<L>,
    pub products: Arc<P>,
    pub shops: Arc<S>,
    pub groups: Arc<G>,
}

impl<O, L, P, S, G> Clone for OrderStores<O, L, P, S, G> {
    fn clone(&self) -> Self {
        Self {
            orders: Arc::clone(&self.orders),
            lists: Arc::clone(&self.lists),
            products: Arc::clone(&self.products),
            shops: Arc::clone(&self.shops),
            groups: Arc::clone(&self.groups),
        }
    }
}

/// Order service.
#[derive(Clone)]
pub struct OrderService<O, L, P, S, G> {
    stores: OrderStores<O, L, P, S, G>,
    clock: Arc<dyn Clock>,
}

impl<O, L, P, S, G> OrderService<O, L, P, S, G> {
    /// Create a new service over the given stores.
    pub fn new(stores: OrderStores<O, L, P, S, G>, clock: Arc<dyn Clock>) -> Self {
        Self { stores, clock }
    }
}

impl<O, L, P, S, G> OrderService<O, L, P, S, G>
where
    O: OrderRepository,
    L: ListOrdersRepository,
    P: ProductRepository,
    S: ShopRepository,
    G: GroupRepository,
{
    fn order_not_found() -> Error {
        not_found("order_not_found", "Order not found")
    }

    async fn ensure_list_exists(
        &self,
        group_id: &Identifier,
        list_orders_id: &Identifier,
    ) -> Result<(), Error> {
        self.stores
            .lists
            .find_by_id(group_id, list_orders_id)
            .await
            .map_err(map_repository_error)?
            .map(|_| ())
            .ok_or_else(|| not_found("list_orders_not_found", "List orders not found"))
    }

    /// Place an order on a list. Product, shop and list must all belong to
    /// the group.
    ///
    /// # Errors
    /// `invalid_request` for malformed fields, `forbidden` with
    /// `permissions`, `not_found` with `list_orders_not_found`,
    /// `product_not_found` or `shop_not_found`.
    pub async fn create(&self, request: CreateOrderRequest) -> Result<Order, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("group_id", &request.group_id)
                .value("user_id", &request.user_id)
                .value("list_orders_id", &request.list_orders_id)
                .value("product_id", &request.product_id)
                .value("shop_id", &request.shop_id)
                .value("description", &request.description)
                .value("amount", &request.amount)
                .build(),
        )?;
        require_member(self.stores.groups.as_ref(), &request.group_id, &request.user_id).await?;

        self.ensure_list_exists(&request.group_id, &request.list_orders_id)
            .await?;
        self.stores
            .products
            .find_by_id(&request.group_id, &request.product_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("product_not_found", "Product not found"))?;
        if let Some(shop_id) = request.shop_id.value() {
            self.stores
                .shops
                .find_by_id(&request.group_id, &Identifier::new(shop_id))
                .await
                .map_err(map_repository_error)?
                .ok_or_else(|| not_found("shop_not_found", "Shop not found"))?;
        }

        let order = Order {
            id: Identifier::random(),
            group_id: request.group_id,
            list_orders_id: request.list_orders_id,
            product_id: request.product_id,
            shop_id: request.shop_id,
            user_id: request.user_id,
            description: request.description,
            amount: request.amount,
            bought: false,
            created_on: self.clock.utc(),
        };
        self.stores
            .orders
            .save(&order)
            .await
            .map_err(map_repository_error)?;
        info!(order_id = %order.id, list_orders_id = %order.list_orders_id, "order created");
        Ok(order)
    }

    /// Orders on one list.
    ///
    /// # Errors
    /// `forbidden` with `permissions`, `not_found` with
    /// `list_orders_not_found`.
    pub async fn list_for_list_orders(
        &self,
        group_id: &Identifier,
        requester: &Identifier,
        list_orders_id: &Identifier,
        request: PageRequest,
    ) -> Result<Page<Order>, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("group_id", group_id)
                .value("user_id", requester)
                .value("list_orders_id", list_orders_id)
                .build(),
        )?;
        require_member(self.stores.groups.as_ref(), group_id, requester).await?;
        self.ensure_list_exists(group_id, list_orders_id).await?;
        self.stores
            .orders
            .list_for_list_orders(group_id, list_orders_id, request)
            .await
            .map_err(map_repository_error)
    }

    /// Mark an order as bought or not bought.
    ///
    /// # Errors
    /// `forbidden` with `permissions`, `not_found` with `order_not_found`.
    pub async fn set_bought(
        &self,
        group_id: &Identifier,
        requester: &Identifier,
        order_id: &Identifier,
        bought: bool,
    ) -> Result<Order, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("group_id", group_id)
                .value("user_id", requester)
                .value("order_id", order_id)
                .build(),
        )?;
        require_member(self.stores.groups.as_ref(), group_id, requester).await?;

        let mut order = self
            .stores
            .orders
            .find_by_id(group_id, order_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(Self::order_not_found)?;
        if order.bought == bought {
            return Ok(order);
        }
        order.bought = bought;
        self.stores
            .orders
            .update(&order)
            .await
            .map_err(map_repository_error)?;
        info!(%order_id, bought, "order bought state changed");
        Ok(order)
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
