//! In-memory products and shops of each group.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tokio::sync::RwLock;

use super::{paginate, starts_with_ignore_case};
use crate::domain::ports::{ProductRepository, RepositoryError, ShopRepository};
use crate::domain::value_objects::{Identifier, NameWithSpaces};
use crate::domain::{Product, ProductShop, Shop};

/// Filter a group's rows by name prefix and order them by name.
fn by_name<'a, T: Clone + 'a>(
    rows: impl Iterator<Item = &'a T>,
    name: impl Fn(&T) -> &str,
    name_prefix: Option<&str>,
) -> Vec<T> {
    let mut rows: Vec<T> = rows
        .filter(|row| {
            name_prefix.is_none_or(|prefix| starts_with_ignore_case(name(*row), prefix))
        })
        .cloned()
        .collect();
    rows.sort_by_key(|row| name(row).to_lowercase());
    rows
}

#[derive(Debug, Default)]
struct ProductTables {
    products: Vec<Product>,
    prices: Vec<ProductShop>,
}

/// Product catalogue with per-shop prices.
#[derive(Debug, Default)]
pub struct MemoryProductRepository {
    tables: RwLock<ProductTables>,
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn save(&self, product: &Product, prices: &[ProductShop]) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables
            .products
            .iter()
            .any(|stored| stored.group_id == product.group_id && stored.name == product.name)
        {
            return Err(RepositoryError::duplicate(format!(
                "product name {}",
                product.name
            )));
        }
        tables.products.push(product.clone());
        tables.prices.extend_from_slice(prices);
        Ok(())
    }

    async fn find_by_id(
        &self,
        group_id: &Identifier,
        id: &Identifier,
    ) -> Result<Option<Product>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .find(|product| &product.group_id == group_id && &product.id == id)
            .cloned())
    }

    async fn find_by_name(
        &self,
        group_id: &Identifier,
        name: &NameWithSpaces,
    ) -> Result<Option<Product>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .find(|product| &product.group_id == group_id && &product.name == name)
            .cloned())
    }

    async fn list(
        &self,
        group_id: &Identifier,
        name_prefix: Option<String>,
        request: PageRequest,
    ) -> Result<Page<Product>, RepositoryError> {
        let tables = self.tables.read().await;
        let rows = by_name(
            tables
                .products
                .iter()
                .filter(|product| &product.group_id == group_id),
            |product| product.name.value(),
            name_prefix.as_deref(),
        );
        Ok(paginate(rows, request))
    }

    async fn prices(&self, product_id: &Identifier) -> Result<Vec<ProductShop>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .prices
            .iter()
            .filter(|price| &price.product_id == product_id)
            .cloned()
            .collect())
    }
}

/// Shops known to each group.
#[derive(Debug, Default)]
pub struct MemoryShopRepository {
    shops: RwLock<Vec<Shop>>,
}

#[async_trait]
impl ShopRepository for MemoryShopRepository {
    async fn save(&self, shop: &Shop) -> Result<(), RepositoryError> {
        let mut shops = self.shops.write().await;
        if shops
            .iter()
            .any(|stored| stored.group_id == shop.group_id && stored.name == shop.name)
        {
            return Err(RepositoryError::duplicate(format!("shop name {}", shop.name)));
        }
        shops.push(shop.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        group_id: &Identifier,
        id: &Identifier,
    ) -> Result<Option<Shop>, RepositoryError> {
        let shops = self.shops.read().await;
        Ok(shops
            .iter()
            .find(|shop| &shop.group_id == group_id && &shop.id == id)
            .cloned())
    }

    async fn find_by_name(
        &self,
        group_id: &Identifier,
        name: &NameWithSpaces,
    ) -> Result<Option<Shop>, RepositoryError> {
        let shops = self.shops.read().await;
        Ok(shops
            .iter()
            .find(|shop| &shop.group_id == group_id && &shop.name == name)
            .cloned())
    }

    async fn list(
        &self,
        group_id: &Identifier,
        name_prefix: Option<String>,
        request: PageRequest,
    ) -> Result<Page<Shop>, RepositoryError> {
        let shops = self.shops.read().await;
        let rows = by_name(
            shops.iter().filter(|shop| &shop.group_id == group_id),
            |shop| shop.name.value(),
            name_prefix.as_deref(),
        );
        Ok(paginate(rows, request))
    }
}
