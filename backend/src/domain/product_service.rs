//! Product catalogue services.

use std::sync::Arc;

use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::info;

use crate::domain::ports::{GroupRepository, ProductRepository, RepositoryError, ShopRepository};
use crate::domain::service_support::{
    WRONG_DATA, ensure_valid, map_repository_error, not_found, repeated, require_member,
};
use crate::domain::validation::ValidationBuilder;
use crate::domain::value_objects::{
    Description, Identifier, Money, NameWithSpaces, Path, UnitMeasure,
};
use crate::domain::{Error, Product, ProductShop};

/// Data required to create a product.
///
/// `shops`, `prices` and `units` are parallel lists: entry `i` prices the
/// product at shop `i`.
#[derive(Debug, Clone)]
pub struct CreateProductRequest {
    pub group_id: Identifier,
    pub user_id: Identifier,
    pub name: NameWithSpaces,
    pub description: Description,
    pub image: Path,
    pub shops: Vec<Identifier>,
    pub prices: Vec<Money>,
    pub units: Vec<UnitMeasure>,
}

/// Product catalogue service.
#[derive(Clone)]
pub struct ProductService<P, S, G> {
    products: Arc<P>,
    shops: Arc<S>,
    groups: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<P, S, G> ProductService<P, S, G> {
    /// Create a new service over the product, shop and group stores.
    pub fn new(products: Arc<P>, shops: Arc<S>, groups: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            products,
            shops,
            groups,
            clock,
        }
    }
}

impl<P, S, G> ProductService<P, S, G>
where
    P: ProductRepository,
    S: ShopRepository,
    G: GroupRepository,
{
    fn product_name_repeated() -> Error {
        repeated("product_name_repeated", "The product name already exists")
    }

    /// Create a product in a group, optionally priced at some of its shops.
    ///
    /// # Errors
    /// `invalid_request` for malformed fields or mismatched price lists,
    /// `forbidden` with `permissions`, `not_found` with `shop_not_found`,
    /// `conflict` with `product_name_repeated`.
    pub async fn create(&self, request: CreateProductRequest) -> Result<Product, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("group_id", &request.group_id)
                .value("user_id", &request.user_id)
                .value("name", &request.name)
                .value("description", &request.description)
                .value("image", &request.image)
                .values("shops", &request.shops)
                .values("prices", &request.prices)
                .values("units", &request.units)
                .build(),
        )?;
        if request.shops.len() != request.prices.len() || request.shops.len() != request.units.len()
        {
            return Err(Error::invalid_request(WRONG_DATA).with_error(
                "shops_prices_not_equals",
                "Shops, prices and units must have the same length",
            ));
        }

        require_member(self.groups.as_ref(), &request.group_id, &request.user_id).await?;
        let existing = self
            .products
            .find_by_name(&request.group_id, &request.name)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(Self::product_name_repeated());
        }
        for shop_id in &request.shops {
            self.shops
                .find_by_id(&request.group_id, shop_id)
                .await
                .map_err(map_repository_error)?
                .ok_or_else(|| not_found("shop_not_found", "Shop not found"))?;
        }

        let product = Product {
            id: Identifier::random(),
            group_id: request.group_id,
            name: request.name,
            description: request.description,
            image: request.image,
            created_on: self.clock.utc(),
        };
        let prices: Vec<ProductShop> = request
            .shops
            .into_iter()
            .zip(request.prices)
            .zip(request.units)
            .map(|((shop_id, price), unit)| ProductShop {
                product_id: product.id.clone(),
                shop_id,
                price,
                unit,
            })
            .collect();

        match self.products.save(&product, &prices).await {
            Ok(()) => {}
            Err(RepositoryError::Duplicate { .. }) => return Err(Self::product_name_repeated()),
            Err(error) => return Err(map_repository_error(error)),
        }
        info!(
            product_id = %product.id,
            group_id = %product.group_id,
            prices = prices.len(),
            "product created"
        );
        Ok(product)
    }

    /// Products of a group, optionally filtered by name prefix.
    ///
    /// # Errors
    /// `forbidden` with `permissions` when the requester is not a member.
    pub async fn list(
        &self,
        group_id: &Identifier,
        requester: &Identifier,
        name_prefix: Option<&NameWithSpaces>,
        request: PageRequest,
    ) -> Result<Page<Product>, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("group_id", group_id)
                .value("user_id", requester)
                .optional("products_name_starts_with", name_prefix)
                .build(),
        )?;
        require_member(self.groups.as_ref(), group_id, requester).await?;
        self.products
            .list(group_id, name_prefix.map(|prefix| prefix.value().to_owned()), request)
            .await
            .map_err(map_repository_error)
    }

    /// Shop prices recorded for a product of the group.
    ///
    /// # Errors
    /// `forbidden` with `permissions` when the requester is not a member,
    /// `not_found` with `product_not_found` when the group has no such
    /// product.
    pub async fn prices(
        &self,
        group_id: &Identifier,
        requester: &Identifier,
        product_id: &Identifier,
    ) -> Result<Vec<ProductShop>, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("group_id", group_id)
                .value("user_id", requester)
                .value("product_id", product_id)
                .build(),
        )?;
        require_member(self.groups.as_ref(), group_id, requester).await?;
        self.products
            .find_by_id(group_id, product_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("product_not_found", "Product not found"))?;
        self.products
            .prices(product_id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "product_service_tests.rs"]
mod tests;
