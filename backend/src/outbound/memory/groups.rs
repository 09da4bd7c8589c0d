//! In-memory groups and memberships.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tokio::sync::RwLock;

use super::paginate;
use crate::domain::ports::{GroupRepository, RepositoryError};
use crate::domain::value_objects::{Identifier, Name};
use crate::domain::{Group, UserGroup};

#[derive(Debug, Default)]
struct Tables {
    groups: Vec<Group>,
    memberships: Vec<UserGroup>,
}

impl Tables {
    fn has_membership(&self, group_id: &Identifier, user_id: &Identifier) -> bool {
        self.memberships
            .iter()
            .any(|member| &member.group_id == group_id && &member.user_id == user_id)
    }
}

/// Group and membership tables sharing one lock.
#[derive(Debug, Default)]
pub struct MemoryGroupRepository {
    tables: RwLock<Tables>,
}

#[async_trait]
impl GroupRepository for MemoryGroupRepository {
    async fn save(&self, group: &Group, creator: &UserGroup) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if group.group_type.is_group()
            && tables
                .groups
                .iter()
                .any(|stored| stored.group_type.is_group() && stored.name == group.name)
        {
            return Err(RepositoryError::duplicate(format!("group name {}", group.name)));
        }
        if tables.has_membership(&creator.group_id, &creator.user_id) {
            return Err(RepositoryError::duplicate("group creator membership"));
        }
        tables.groups.push(group.clone());
        tables.memberships.push(creator.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &Identifier) -> Result<Option<Group>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.groups.iter().find(|group| &group.id == id).cloned())
    }

    async fn find_by_name(&self, name: &Name) -> Result<Option<Group>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .groups
            .iter()
            .find(|group| group.group_type.is_group() && &group.name == name)
            .cloned())
    }

    async fn save_membership(&self, membership: &UserGroup) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.has_membership(&membership.group_id, &membership.user_id) {
            return Err(RepositoryError::duplicate(format!(
                "user {} in group {}",
                membership.user_id, membership.group_id
            )));
        }
        tables.memberships.push(membership.clone());
        Ok(())
    }

    async fn find_membership(
        &self,
        group_id: &Identifier,
        user_id: &Identifier,
    ) -> Result<Option<UserGroup>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .iter()
            .find(|member| &member.group_id == group_id && &member.user_id == user_id)
            .cloned())
    }

    async fn remove_membership(
        &self,
        group_id: &Identifier,
        user_id: &Identifier,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.memberships.len();
        tables
            .memberships
            .retain(|member| !(&member.group_id == group_id && &member.user_id == user_id));
        Ok(tables.memberships.len() < before)
    }

    async fn count_admins(&self, group_id: &Identifier) -> Result<u64, RepositoryError> {
        let tables = self.tables.read().await;
        let admins = tables
            .memberships
            .iter()
            .filter(|member| &member.group_id == group_id && member.is_admin())
            .count();
        Ok(u64::try_from(admins).unwrap_or(u64::MAX))
    }

    async fn list_members(
        &self,
        group_id: &Identifier,
        request: PageRequest,
    ) -> Result<Page<UserGroup>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<UserGroup> = tables
            .memberships
            .iter()
            .filter(|member| &member.group_id == group_id)
            .cloned()
            .collect();
        rows.sort_by_key(|member| member.created_on);
        Ok(paginate(rows, request))
    }
}
