//! Shop records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Address, Description, Identifier, NameWithSpaces, Path};

/// A shop where a group buys products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: Identifier,
    pub group_id: Identifier,
    pub name: NameWithSpaces,
    pub address: Address,
    pub description: Description,
    pub image: Path,
    pub created_on: DateTime<Utc>,
}
