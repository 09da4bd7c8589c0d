//! Group aggregate and membership records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Description, GroupType, Identifier, Name, Path};

/// A set of users sharing lists, products and shops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: Identifier,
    pub name: Name,
    pub description: Description,
    pub image: Path,
    pub group_type: GroupType,
    pub created_on: DateTime<Utc>,
}

/// Role a member holds within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupRole {
    Admin,
    User,
}

/// Membership of a user in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    pub group_id: Identifier,
    pub user_id: Identifier,
    pub role: GroupRole,
    pub created_on: DateTime<Utc>,
}

impl UserGroup {
    pub fn is_admin(&self) -> bool {
        self.role == GroupRole::Admin
    }
}
