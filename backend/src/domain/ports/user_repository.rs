//! Port for user account persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::User;
use crate::domain::value_objects::{Email, Identifier};

use super::RepositoryError;

/// Port for storing and querying user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user; fails with `Duplicate` when the e-mail is taken.
    async fn save(&self, user: &User) -> Result<(), RepositoryError>;

    /// Replace a stored user.
    async fn update(&self, user: &User) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &Identifier) -> Result<Option<User>, RepositoryError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Users still holding the inactive role that registered before `cutoff`.
    async fn find_inactive_created_before(
        &self,
        cutoff: DateTime<Utc>,
        request: PageRequest,
    ) -> Result<Page<User>, RepositoryError>;

    /// Delete users by id, returning how many were removed.
    async fn remove(&self, ids: &[Identifier]) -> Result<u64, RepositoryError>;
}
