//! Shopping list services.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::info;

use crate::domain::ports::{GroupRepository, ListOrdersRepository, RepositoryError};
use crate::domain::service_support::{
    ensure_valid, map_repository_error, repeated, require_member,
};
use crate::domain::validation::ValidationBuilder;
use crate::domain::value_objects::{Description, Identifier, NameWithSpaces};
use crate::domain::{Error, ListOrders};

/// Data required to create a list of orders.
#[derive(Debug, Clone)]
pub struct CreateListOrdersRequest {
    pub group_id: Identifier,
    pub user_id: Identifier,
    pub name: NameWithSpaces,
    pub description: Description,
    pub date_to_buy: Option<DateTime<Utc>>,
}

/// Shopping list service.
#[derive(Clone)]
pub struct ListOrdersService<L, G> {
    lists: Arc<L>,
    groups: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<L, G> ListOrdersService<L, G> {
    /// Create a new service over the list and group stores.
    pub fn new(lists: Arc<L>, groups: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            lists,
            groups,
            clock,
        }
    }
}

impl<L, G> ListOrdersService<L, G>
where
    L: ListOrdersRepository,
    G: GroupRepository,
{
    fn name_repeated() -> Error {
        repeated("list_orders_name_repeated", "The list orders name already exists")
    }

    /// Create a list of orders in a group.
    ///
    /// # Errors
    /// `invalid_request` for malformed fields, `forbidden` with
    /// `permissions`, `conflict` with `list_orders_name_repeated`.
    pub async fn create(&self, request: CreateListOrdersRequest) -> Result<ListOrders, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("group_id", &request.group_id)
                .value("user_id", &request.user_id)
                .value("name", &request.name)
                .value("description", &request.description)
                .build(),
        )?;
        require_member(self.groups.as_ref(), &request.group_id, &request.user_id).await?;

        let existing = self
            .lists
            .find_by_name(&request.group_id, &request.name)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(Self::name_repeated());
        }

        let list_orders = ListOrders {
            id: Identifier::random(),
            group_id: request.group_id,
            user_id: request.user_id,
            name: request.name,
            description: request.description,
            date_to_buy: request.date_to_buy,
            created_on: self.clock.utc(),
        };
        match self.lists.save(&list_orders).await {
            Ok(()) => {}
            Err(RepositoryError::Duplicate { .. }) => return Err(Self::name_repeated()),
            Err(error) => return Err(map_repository_error(error)),
        }
        info!(
            list_orders_id = %list_orders.id,
            group_id = %list_orders.group_id,
            "list of orders created"
        );
        Ok(list_orders)
    }

    /// Lists of a group, newest first.
    ///
    /// # Errors
    /// `forbidden` with `permissions` when the requester is not a member.
    pub async fn list(
        &self,
        group_id: &Identifier,
        requester: &Identifier,
        request: PageRequest,
    ) -> Result<Page<ListOrders>, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("group_id", group_id)
                .value("user_id", requester)
                .build(),
        )?;
        require_member(self.groups.as_ref(), group_id, requester).await?;
        self.lists
            .list(group_id, request)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{MockGroupRepository, MockListOrdersRepository};
    use crate::domain::test_fixtures::{fixture_clock, membership};
    use crate::domain::{ErrorCode, GroupRole};

    #[fixture]
    fn request() -> CreateListOrdersRequest {
        CreateListOrdersRequest {
            group_id: Identifier::random(),
            user_id: Identifier::random(),
            name: NameWithSpaces::new("Weekend"),
            description: Description::null(),
            date_to_buy: None,
        }
    }

    fn groups_with(member: Option<crate::domain::UserGroup>) -> MockGroupRepository {
        let mut groups = MockGroupRepository::new();
        groups
            .expect_find_membership()
            .returning(move |_, _| Ok(member.clone()));
        groups
    }

    #[rstest]
    #[tokio::test]
    async fn create_saves_list(request: CreateListOrdersRequest) {
        let member = membership(&request.group_id, &request.user_id, GroupRole::User);
        let mut lists = MockListOrdersRepository::new();
        lists.expect_find_by_name().return_once(|_, _| Ok(None));
        lists.expect_save().times(1).return_once(|_| Ok(()));

        let service = ListOrdersService::new(
            Arc::new(lists),
            Arc::new(groups_with(Some(member))),
            fixture_clock(),
        );
        let created = service.create(request).await.expect("list created");
        assert_eq!(created.name.value(), "Weekend");
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_outsiders(request: CreateListOrdersRequest) {
        let mut lists = MockListOrdersRepository::new();
        lists.expect_save().never();

        let service =
            ListOrdersService::new(Arc::new(lists), Arc::new(groups_with(None)), fixture_clock());
        let error = service.create(request).await.expect_err("outsider");
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn create_maps_duplicate_write(request: CreateListOrdersRequest) {
        let member = membership(&request.group_id, &request.user_id, GroupRole::Admin);
        let mut lists = MockListOrdersRepository::new();
        lists.expect_find_by_name().return_once(|_, _| Ok(None));
        lists
            .expect_save()
            .return_once(|_| Err(RepositoryError::duplicate("name")));

        let service = ListOrdersService::new(
            Arc::new(lists),
            Arc::new(groups_with(Some(member))),
            fixture_clock(),
        );
        let error = service.create(request).await.expect_err("repeated");
        assert!(error.errors().contains_key("list_orders_name_repeated"));
    }

    #[rstest]
    #[tokio::test]
    async fn create_surfaces_unavailable_storage(request: CreateListOrdersRequest) {
        let member = membership(&request.group_id, &request.user_id, GroupRole::User);
        let mut lists = MockListOrdersRepository::new();
        lists
            .expect_find_by_name()
            .return_once(|_, _| Err(RepositoryError::connection("refused")));

        let service = ListOrdersService::new(
            Arc::new(lists),
            Arc::new(groups_with(Some(member))),
            fixture_clock(),
        );
        let error = service.create(request).await.expect_err("storage down");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
