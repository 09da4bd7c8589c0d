//! Orders placed on a shopping list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Amount, Description, Identifier, IdentifierNullable};

/// A product to buy, optionally at a given shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Identifier,
    pub group_id: Identifier,
    pub list_orders_id: Identifier,
    pub product_id: Identifier,
    pub shop_id: IdentifierNullable,
    pub user_id: Identifier,
    pub description: Description,
    pub amount: Amount,
    pub bought: bool,
    pub created_on: DateTime<Utc>,
}
