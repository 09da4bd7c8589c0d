//! User notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::{Identifier, NotificationType};

/// Event reported to a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Identifier,
    pub user_id: Identifier,
    pub notification_type: NotificationType,
    /// Event payload, e.g. the group name.
    pub data: Value,
    pub viewed: bool,
    pub created_on: DateTime<Utc>,
}
