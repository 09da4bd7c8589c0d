//! In-memory notification inbox.

use std::cmp::Reverse;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tokio::sync::RwLock;

use super::paginate;
use crate::domain::Notification;
use crate::domain::ports::{NotificationRepository, RepositoryError};
use crate::domain::value_objects::Identifier;

#[derive(Debug, Default)]
pub struct MemoryNotificationRepository {
    notifications: RwLock<Vec<Notification>>,
}

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn save(&self, notification: &Notification) -> Result<(), RepositoryError> {
        self.notifications.write().await.push(notification.clone());
        Ok(())
    }

    async fn update(&self, notification: &Notification) -> Result<(), RepositoryError> {
        let mut notifications = self.notifications.write().await;
        let stored = notifications
            .iter_mut()
            .find(|stored| stored.id == notification.id)
            .ok_or_else(|| {
                RepositoryError::query(format!("notification {} does not exist", notification.id))
            })?;
        *stored = notification.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &Identifier) -> Result<Option<Notification>, RepositoryError> {
        let notifications = self.notifications.read().await;
        Ok(notifications.iter().find(|n| &n.id == id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &Identifier,
        request: PageRequest,
    ) -> Result<Page<Notification>, RepositoryError> {
        let notifications = self.notifications.read().await;
        let mut rows: Vec<Notification> = notifications
            .iter()
            .filter(|n| &n.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|n| Reverse(n.created_on));
        Ok(paginate(rows, request))
    }

    async fn remove(&self, ids: &[Identifier]) -> Result<u64, RepositoryError> {
        let mut notifications = self.notifications.write().await;
        let before = notifications.len();
        notifications.retain(|n| !ids.contains(&n.id));
        Ok(u64::try_from(before - notifications.len()).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use serde_json::json;

    use super::*;
    use crate::domain::test_fixtures::fixture_timestamp;
    use crate::domain::value_objects::NotificationType;

    fn notification(user_id: &Identifier, minute: i64) -> Notification {
        Notification {
            id: Identifier::random(),
            user_id: user_id.clone(),
            notification_type: NotificationType::new(NotificationType::ORDER_BOUGHT),
            data: json!({ "minute": minute }),
            viewed: false,
            created_on: fixture_timestamp() + Duration::minutes(minute),
        }
    }

    #[tokio::test]
    async fn inbox_is_newest_first_and_per_user() {
        let user_id = Identifier::random();
        let repo = MemoryNotificationRepository::default();
        let older = notification(&user_id, 1);
        let newer = notification(&user_id, 2);
        repo.save(&older).await.expect("saved");
        repo.save(&newer).await.expect("saved");
        repo.save(&notification(&Identifier::random(), 3))
            .await
            .expect("saved");

        let page = repo
            .list_for_user(&user_id, PageRequest::default())
            .await
            .expect("list");
        assert_eq!(page.items(), [newer, older]);
    }

    #[tokio::test]
    async fn remove_reports_deleted_rows() {
        let user_id = Identifier::random();
        let repo = MemoryNotificationRepository::default();
        let first = notification(&user_id, 1);
        repo.save(&first).await.expect("saved");

        assert_eq!(repo.remove(&[first.id.clone()]).await.expect("removed"), 1);
        assert!(repo.find_by_id(&first.id).await.expect("query").is_none());
        assert!(matches!(
            repo.update(&first).await,
            Err(RepositoryError::Query { .. })
        ));
    }
}
