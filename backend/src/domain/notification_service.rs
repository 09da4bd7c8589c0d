//! Notification services.

use std::sync::Arc;

use mockable::Clock;
use pagination::{Page, PageRequest};
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::paginator::collect_all;
use crate::domain::ports::NotificationRepository;
use crate::domain::service_support::{
    ensure_valid, first_page, map_repository_error, not_found, permissions,
};
use crate::domain::validation::ValidationBuilder;
use crate::domain::value_objects::{Identifier, NotificationType};
use crate::domain::{Error, Notification};

/// Data required to notify a user.
#[derive(Debug, Clone)]
pub struct CreateNotificationRequest {
    pub user_id: Identifier,
    pub notification_type: NotificationType,
    pub data: Value,
}

/// Notification service.
#[derive(Clone)]
pub struct NotificationService<N> {
    notifications: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<N> NotificationService<N> {
    /// Create a new service over the notification store.
    pub fn new(notifications: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self {
            notifications,
            clock,
        }
    }
}

impl<N> NotificationService<N>
where
    N: NotificationRepository,
{
    /// Record an unviewed notification.
    ///
    /// # Errors
    /// `invalid_request` for malformed fields.
    pub async fn create(&self, request: CreateNotificationRequest) -> Result<Notification, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("user_id", &request.user_id)
                .value("type", &request.notification_type)
                .build(),
        )?;

        let notification = Notification {
            id: Identifier::random(),
            user_id: request.user_id,
            notification_type: request.notification_type,
            data: request.data,
            viewed: false,
            created_on: self.clock.utc(),
        };
        self.notifications
            .save(&notification)
            .await
            .map_err(map_repository_error)?;
        debug!(
            notification_id = %notification.id,
            kind = %notification.notification_type,
            "notification created"
        );
        Ok(notification)
    }

    /// Notifications of a user, newest first.
    ///
    /// # Errors
    /// `invalid_request` for a malformed id.
    pub async fn list_for_user(
        &self,
        user_id: &Identifier,
        request: PageRequest,
    ) -> Result<Page<Notification>, Error> {
        ensure_valid(ValidationBuilder::new().value("user_id", user_id).build())?;
        self.notifications
            .list_for_user(user_id, request)
            .await
            .map_err(map_repository_error)
    }

    /// Mark one of the user's notifications as viewed.
    ///
    /// # Errors
    /// `not_found` with `notification_not_found`, `forbidden` with
    /// `permissions` when the notification belongs to someone else.
    pub async fn mark_viewed(
        &self,
        user_id: &Identifier,
        notification_id: &Identifier,
    ) -> Result<Notification, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("user_id", user_id)
                .value("notification_id", notification_id)
                .build(),
        )?;

        let mut notification = self
            .notifications
            .find_by_id(notification_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("notification_not_found", "Notification not found"))?;
        if &notification.user_id != user_id {
            return Err(permissions());
        }
        if notification.viewed {
            return Ok(notification);
        }

        notification.viewed = true;
        self.notifications
            .update(&notification)
            .await
            .map_err(map_repository_error)?;
        Ok(notification)
    }

    /// Remove every notification of a user, returning how many were removed.
    ///
    /// # Errors
    /// `invalid_request` when `page_items` is out of range.
    pub async fn remove_all_for_user(
        &self,
        user_id: &Identifier,
        page_items: u32,
    ) -> Result<u64, Error> {
        ensure_valid(ValidationBuilder::new().value("user_id", user_id).build())?;
        let first = first_page(page_items)?;

        let notifications = &self.notifications;
        let ids: Vec<Identifier> =
            collect_all(first, |request| notifications.list_for_user(user_id, request))
                .await
                .map_err(map_repository_error)?
                .into_iter()
                .map(|notification| notification.id)
                .collect();
        if ids.is_empty() {
            return Ok(0);
        }

        let removed = self
            .notifications
            .remove(&ids)
            .await
            .map_err(map_repository_error)?;
        info!(%user_id, removed, "notifications removed");
        Ok(removed)
    }
}
