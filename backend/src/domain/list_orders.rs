//! Shopping lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Description, Identifier, NameWithSpaces};

/// A named list of orders owned by a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListOrders {
    pub id: Identifier,
    pub group_id: Identifier,
    pub user_id: Identifier,
    pub name: NameWithSpaces,
    pub description: Description,
    pub date_to_buy: Option<DateTime<Utc>>,
    pub created_on: DateTime<Utc>,
}
