//! Shop services.

use std::sync::Arc;

use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::info;

use crate::domain::ports::{GroupRepository, RepositoryError, ShopRepository};
use crate::domain::service_support::{
    ensure_valid, map_repository_error, repeated, require_member,
};
use crate::domain::validation::ValidationBuilder;
use crate::domain::value_objects::{Address, Description, Identifier, NameWithSpaces, Path};
use crate::domain::{Error, Shop};

/// Data required to create a shop.
#[derive(Debug, Clone)]
pub struct CreateShopRequest {
    pub group_id: Identifier,
    pub user_id: Identifier,
    pub name: NameWithSpaces,
    pub address: Address,
    pub description: Description,
    pub image: Path,
}

/// Shop service.
#[derive(Clone)]
pub struct ShopService<S, G> {
    shops: Arc<S>,
    groups: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<S, G> ShopService<S, G> {
    /// Create a new service over the shop and group stores.
    pub fn new(shops: Arc<S>, groups: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            shops,
            groups,
            clock,
        }
    }
}

impl<S, G> ShopService<S, G>
where
    S: ShopRepository,
    G: GroupRepository,
{
    fn shop_name_repeated() -> Error {
        repeated("shop_name_repeated", "The shop name already exists")
    }

    /// Create a shop in a group.
    ///
    /// # Errors
    /// `invalid_request` for malformed fields, `forbidden` with
    /// `permissions`, `conflict` with `shop_name_repeated`.
    pub async fn create(&self, request: CreateShopRequest) -> Result<Shop, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("group_id", &request.group_id)
                .value("user_id", &request.user_id)
                .value("name", &request.name)
                .value("address", &request.address)
                .value("description", &request.description)
                .value("image", &request.image)
                .build(),
        )?;
        require_member(self.groups.as_ref(), &request.group_id, &request.user_id).await?;

        let existing = self
            .shops
            .find_by_name(&request.group_id, &request.name)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(Self::shop_name_repeated());
        }

        let shop = Shop {
            id: Identifier::random(),
            group_id: request.group_id,
            name: request.name,
            address: request.address,
            description: request.description,
            image: request.image,
            created_on: self.clock.utc(),
        };
        match self.shops.save(&shop).await {
            Ok(()) => {}
            Err(RepositoryError::Duplicate { .. }) => return Err(Self::shop_name_repeated()),
            Err(error) => return Err(map_repository_error(error)),
        }
        info!(shop_id = %shop.id, group_id = %shop.group_id, "shop created");
        Ok(shop)
    }

    /// Shops of a group, optionally filtered by name prefix.
    ///
    /// # Errors
    /// `forbidden` with `permissions` when the requester is not a member.
    pub async fn list(
        &self,
        group_id: &Identifier,
        requester: &Identifier,
        name_prefix: Option<&NameWithSpaces>,
        request: PageRequest,
    ) -> Result<Page<Shop>, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("group_id", group_id)
                .value("user_id", requester)
                .optional("shop_name_starts_with", name_prefix)
                .build(),
        )?;
        require_member(self.groups.as_ref(), group_id, requester).await?;
        self.shops
            .list(group_id, name_prefix.map(|prefix| prefix.value().to_owned()), request)
            .await
            .map_err(map_repository_error)
    }
}
