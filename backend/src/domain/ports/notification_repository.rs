//! Port for user notifications.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::Notification;
use crate::domain::value_objects::Identifier;

use super::RepositoryError;

/// Port for storing notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn save(&self, notification: &Notification) -> Result<(), RepositoryError>;

    /// Replace a stored notification.
    async fn update(&self, notification: &Notification) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &Identifier) -> Result<Option<Notification>, RepositoryError>;

    /// Notifications of a user, newest first.
    async fn list_for_user(
        &self,
        user_id: &Identifier,
        request: PageRequest,
    ) -> Result<Page<Notification>, RepositoryError>;

    /// Delete notifications by id, returning how many were removed.
    async fn remove(&self, ids: &[Identifier]) -> Result<u64, RepositoryError>;
}
