//! Port for shared list links.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::Share;
use crate::domain::value_objects::Identifier;

use super::RepositoryError;

/// Port for storing shared links.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShareRepository: Send + Sync {
    async fn save(&self, share: &Share) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &Identifier) -> Result<Option<Share>, RepositoryError>;

    /// Links whose expiry is at or before `now`.
    async fn find_expired(
        &self,
        now: DateTime<Utc>,
        request: PageRequest,
    ) -> Result<Page<Share>, RepositoryError>;

    /// Delete links by id, returning how many were removed.
    async fn remove(&self, ids: &[Identifier]) -> Result<u64, RepositoryError>;
}
