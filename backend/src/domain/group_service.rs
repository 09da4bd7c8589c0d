//! Group services: creation and membership management.

use std::sync::Arc;

use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::info;

use crate::domain::ports::{GroupRepository, RepositoryError, UserRepository};
use crate::domain::service_support::{
    ensure_valid, map_repository_error, not_found, permissions, repeated, require_admin,
    require_member,
};
use crate::domain::validation::ValidationBuilder;
use crate::domain::value_objects::{Description, GroupType, Identifier, Name, Path};
use crate::domain::{Error, Group, GroupRole, UserGroup};

/// Data required to create a group.
#[derive(Debug, Clone)]
pub struct CreateGroupRequest {
    /// Creator, who becomes the first admin.
    pub user_id: Identifier,
    pub name: Name,
    pub description: Description,
    pub image: Path,
    pub group_type: GroupType,
}

/// Group service.
#[derive(Clone)]
pub struct GroupService<G, U> {
    groups: Arc<G>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<G, U> GroupService<G, U> {
    /// Create a new service over the group and user stores.
    pub fn new(groups: Arc<G>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            groups,
            users,
            clock,
        }
    }
}

impl<G, U> GroupService<G, U>
where
    G: GroupRepository,
    U: UserRepository,
{
    fn group_name_repeated() -> Error {
        repeated("group_name_repeated", "The group name already exists")
    }

    /// Create a group with the requester as its admin.
    ///
    /// Names of shared groups are unique; personal groups may share names.
    ///
    /// # Errors
    /// `invalid_request` for malformed fields, `conflict` with
    /// `group_name_repeated`.
    pub async fn create(&self, request: CreateGroupRequest) -> Result<Group, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("user_id", &request.user_id)
                .value("name", &request.name)
                .value("description", &request.description)
                .value("image", &request.image)
                .value("type", &request.group_type)
                .build(),
        )?;

        if request.group_type.is_group() {
            let existing = self
                .groups
                .find_by_name(&request.name)
                .await
                .map_err(map_repository_error)?;
            if existing.is_some() {
                return Err(Self::group_name_repeated());
            }
        }

        let now = self.clock.utc();
        let group = Group {
            id: Identifier::random(),
            name: request.name,
            description: request.description,
            image: request.image,
            group_type: request.group_type,
            created_on: now,
        };
        let creator = UserGroup {
            group_id: group.id.clone(),
            user_id: request.user_id,
            role: GroupRole::Admin,
            created_on: now,
        };

        match self.groups.save(&group, &creator).await {
            Ok(()) => {}
            Err(RepositoryError::Duplicate { .. }) => return Err(Self::group_name_repeated()),
            Err(error) => return Err(map_repository_error(error)),
        }
        info!(group_id = %group.id, user_id = %creator.user_id, "group created");
        Ok(group)
    }

    /// Members of a group, one page at a time.
    ///
    /// # Errors
    /// `forbidden` with `permissions` when the requester is not a member.
    pub async fn users(
        &self,
        group_id: &Identifier,
        requester: &Identifier,
        request: PageRequest,
    ) -> Result<Page<UserGroup>, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("group_id", group_id)
                .value("user_id", requester)
                .build(),
        )?;
        require_member(self.groups.as_ref(), group_id, requester).await?;
        self.groups
            .list_members(group_id, request)
            .await
            .map_err(map_repository_error)
    }

    /// Add a user to a group. Only admins may add members.
    ///
    /// # Errors
    /// `forbidden` with `permissions`, `not_found` with `group_not_found` or
    /// `user_not_found`, `conflict` with `group_user_already_exists`.
    pub async fn add_user(
        &self,
        group_id: &Identifier,
        admin_id: &Identifier,
        user_id: &Identifier,
        role: GroupRole,
    ) -> Result<UserGroup, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("group_id", group_id)
                .value("admin_id", admin_id)
                .value("user_id", user_id)
                .build(),
        )?;

        let group = self
            .groups
            .find_by_id(group_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("group_not_found", "Group not found"))?;
        if !group.group_type.is_group() {
            return Err(permissions());
        }
        require_admin(self.groups.as_ref(), group_id, admin_id).await?;
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("user_not_found", "User not found"))?;

        let membership = UserGroup {
            group_id: group_id.clone(),
            user_id: user_id.clone(),
            role,
            created_on: self.clock.utc(),
        };
        match self.groups.save_membership(&membership).await {
            Ok(()) => {}
            Err(RepositoryError::Duplicate { .. }) => {
                return Err(repeated(
                    "group_user_already_exists",
                    "The user is already in the group",
                ));
            }
            Err(error) => return Err(map_repository_error(error)),
        }
        info!(%group_id, %user_id, ?role, "user added to group");
        Ok(membership)
    }

    /// Remove a user from a group.
    ///
    /// Admins may remove anyone; members may only remove themselves. The
    /// last admin cannot leave.
    ///
    /// # Errors
    /// `forbidden` with `permissions`, `not_found` with
    /// `group_user_not_found`, `conflict` with `group_without_admin`.
    pub async fn remove_user(
        &self,
        group_id: &Identifier,
        requester: &Identifier,
        user_id: &Identifier,
    ) -> Result<(), Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("group_id", group_id)
                .value("admin_id", requester)
                .value("user_id", user_id)
                .build(),
        )?;

        let requester_membership = require_member(self.groups.as_ref(), group_id, requester).await?;
        if requester != user_id && !requester_membership.is_admin() {
            return Err(permissions());
        }
        let target = self
            .groups
            .find_membership(group_id, user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("group_user_not_found", "User is not in the group"))?;
        if target.is_admin() {
            let admins = self
                .groups
                .count_admins(group_id)
                .await
                .map_err(map_repository_error)?;
            if admins <= 1 {
                return Err(repeated(
                    "group_without_admin",
                    "The group cannot be left without an admin",
                ));
            }
        }

        self.groups
            .remove_membership(group_id, user_id)
            .await
            .map_err(map_repository_error)?;
        info!(%group_id, %user_id, "user removed from group");
        Ok(())
    }
}

#[cfg(test)]
#[path = "group_service_tests.rs"]
mod tests;
