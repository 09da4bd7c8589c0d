//! Product catalogue records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    Description, Identifier, Money, NameWithSpaces, Path, UnitMeasure,
};

/// A product a group buys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Identifier,
    pub group_id: Identifier,
    pub name: NameWithSpaces,
    pub description: Description,
    pub image: Path,
    pub created_on: DateTime<Utc>,
}

/// Price of a product in a given shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductShop {
    pub product_id: Identifier,
    pub shop_id: Identifier,
    pub price: Money,
    pub unit: UnitMeasure,
}
