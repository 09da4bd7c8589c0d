//! Public read-only links to shopping lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Identifier;

/// A shared link to a list of orders that stops working at `expire`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub id: Identifier,
    pub list_orders_id: Identifier,
    pub group_id: Identifier,
    pub user_id: Identifier,
    pub expire: DateTime<Utc>,
    pub created_on: DateTime<Utc>,
}

impl Share {
    /// Whether the link is no longer usable at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expire <= now
    }
}
