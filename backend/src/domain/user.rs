//! User account aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Email, Identifier, Language, NameWithSpaces, Path, Roles};

/// Registered user account.
///
/// `password` holds the encoded hash, never the plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Identifier,
    pub email: Email,
    pub password: String,
    pub name: NameWithSpaces,
    pub roles: Roles,
    pub language: Language,
    pub image: Path,
    pub created_on: DateTime<Utc>,
}

impl User {
    /// Whether the account has been activated.
    pub fn is_active(&self) -> bool {
        !self.roles.has(Roles::NOT_ACTIVE) && !self.roles.has(Roles::DELETED)
    }

    /// Whether the account has been removed.
    pub fn is_deleted(&self) -> bool {
        self.roles.has(Roles::DELETED)
    }

    /// Replace the inactive role with the regular user role.
    pub fn activate(&mut self) {
        let mut roles: Vec<String> = self
            .roles
            .roles()
            .iter()
            .filter(|role| role.as_str() != Roles::NOT_ACTIVE)
            .cloned()
            .collect();
        if !roles.iter().any(|role| role == Roles::USER) {
            roles.push(Roles::USER.to_owned());
        }
        self.roles = Roles::new(roles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn inactive() -> User {
        User {
            id: Identifier::random(),
            email: Email::new("ada@example.com"),
            password: "hash".to_owned(),
            name: NameWithSpaces::new("Ada"),
            roles: Roles::new([Roles::NOT_ACTIVE]),
            language: Language::new("en"),
            image: Path::null(),
            created_on: Utc::now(),
        }
    }

    #[rstest]
    fn activate_swaps_roles(mut inactive: User) {
        assert!(!inactive.is_active());
        inactive.activate();
        assert!(inactive.is_active());
        assert_eq!(inactive.roles.roles(), [Roles::USER]);
    }

    #[rstest]
    fn activate_keeps_other_roles(mut inactive: User) {
        inactive.roles = Roles::new([Roles::NOT_ACTIVE, Roles::ADMIN]);
        inactive.activate();
        assert_eq!(inactive.roles.roles(), [Roles::ADMIN, Roles::USER]);
    }
}
