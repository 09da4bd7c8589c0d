//! Port for groups and their memberships.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::value_objects::{Identifier, Name};
use crate::domain::{Group, UserGroup};

use super::RepositoryError;

/// Port for storing groups and membership records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Persist a group together with its first member.
    async fn save(&self, group: &Group, creator: &UserGroup) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &Identifier) -> Result<Option<Group>, RepositoryError>;

    /// Shared group with the given name, if any.
    async fn find_by_name(&self, name: &Name) -> Result<Option<Group>, RepositoryError>;

    /// Add a member; fails with `Duplicate` when already a member.
    async fn save_membership(&self, membership: &UserGroup) -> Result<(), RepositoryError>;

    async fn find_membership(
        &self,
        group_id: &Identifier,
        user_id: &Identifier,
    ) -> Result<Option<UserGroup>, RepositoryError>;

    /// Drop a membership, returning whether one existed.
    async fn remove_membership(
        &self,
        group_id: &Identifier,
        user_id: &Identifier,
    ) -> Result<bool, RepositoryError>;

    /// Number of admins in the group.
    async fn count_admins(&self, group_id: &Identifier) -> Result<u64, RepositoryError>;

    /// Members of the group ordered by join time.
    async fn list_members(
        &self,
        group_id: &Identifier,
        request: PageRequest,
    ) -> Result<Page<UserGroup>, RepositoryError>;
}
