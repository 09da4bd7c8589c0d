//! In-memory user store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};
use tokio::sync::RwLock;

use super::paginate;
use crate::domain::User;
use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::value_objects::{Email, Identifier};

/// User table held in memory, in registration order.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    /// Start from previously stored users.
    pub fn from_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Copy of every stored user.
    pub async fn snapshot(&self) -> Vec<User> {
        self.users.read().await.clone()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|stored| stored.email == user.email) {
            return Err(RepositoryError::duplicate(format!("email {}", user.email)));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        let stored = users
            .iter_mut()
            .find(|stored| stored.id == user.id)
            .ok_or_else(|| RepositoryError::query(format!("user {} does not exist", user.id)))?;
        *stored = user.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &Identifier) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| &user.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| &user.email == email).cloned())
    }

    async fn find_inactive_created_before(
        &self,
        cutoff: DateTime<Utc>,
        request: PageRequest,
    ) -> Result<Page<User>, RepositoryError> {
        let users = self.users.read().await;
        let rows = users
            .iter()
            .filter(|user| !user.is_active() && user.created_on < cutoff)
            .cloned()
            .collect();
        Ok(paginate(rows, request))
    }

    async fn remove(&self, ids: &[Identifier]) -> Result<u64, RepositoryError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|user| !ids.contains(&user.id));
        Ok(u64::try_from(before - users.len()).unwrap_or(u64::MAX))
    }
}
