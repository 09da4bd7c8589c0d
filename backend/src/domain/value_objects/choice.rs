//! Value objects restricted to a fixed set of values.

use serde::{Deserialize, Serialize};

use super::macros::text_value_object;
use crate::domain::validation::{Choice, Constraint, Subject, ValueObject};

/// Units a product amount can be expressed in.
pub const UNIT_MEASURES: &[&str] = &["UNITS", "KG", "G", "CG", "L", "DL", "CL", "ML"];
/// Supported interface languages.
pub const LANGUAGES: &[&str] = &["en", "es"];
/// Kinds of group.
pub const GROUP_TYPES: &[&str] = &[GroupType::USER, GroupType::GROUP];
/// Kinds of notification.
pub const NOTIFICATION_TYPES: &[&str] = &[
    NotificationType::USER_REGISTERED,
    NotificationType::GROUP_USER_ADDED,
    NotificationType::GROUP_USER_REMOVED,
    NotificationType::GROUP_USER_SET_AS_ADMIN,
    NotificationType::ORDER_BOUGHT,
    NotificationType::SHARE_LIST_ORDERS_CREATED,
];
/// Roles a user account can hold.
pub const ROLES: &[&str] = &[
    Roles::USER,
    Roles::NOT_ACTIVE,
    Roles::ADMIN,
    Roles::DELETED,
];

text_value_object! {
    /// Unit a product amount is measured in.
    UnitMeasure => UNIT_MEASURE_CONSTRAINTS
}

static UNIT_MEASURE_CONSTRAINTS: &[Constraint] = &[
    Constraint::NotBlank,
    Constraint::Choice(Choice::one_of(UNIT_MEASURES)),
];

text_value_object! {
    /// Interface language code.
    Language => LANGUAGE_CONSTRAINTS
}

static LANGUAGE_CONSTRAINTS: &[Constraint] = &[
    Constraint::NotBlank,
    Constraint::Choice(Choice::one_of(LANGUAGES)),
];

text_value_object! {
    /// Whether a group is a personal group or a shared one.
    GroupType => GROUP_TYPE_CONSTRAINTS
}

static GROUP_TYPE_CONSTRAINTS: &[Constraint] = &[
    Constraint::NotBlank,
    Constraint::Choice(Choice::one_of(GROUP_TYPES)),
];

impl GroupType {
    /// Personal group created for every user.
    pub const USER: &'static str = "TYPE_USER";
    /// Group shared between several users.
    pub const GROUP: &'static str = "TYPE_GROUP";

    /// Whether this is a shared group.
    pub fn is_group(&self) -> bool {
        self.value() == Self::GROUP
    }
}

text_value_object! {
    /// Event a notification reports.
    NotificationType => NOTIFICATION_TYPE_CONSTRAINTS
}

static NOTIFICATION_TYPE_CONSTRAINTS: &[Constraint] = &[
    Constraint::NotBlank,
    Constraint::Choice(Choice::one_of(NOTIFICATION_TYPES)),
];

impl NotificationType {
    pub const USER_REGISTERED: &'static str = "NOTIFICATION_USER_REGISTERED";
    pub const GROUP_USER_ADDED: &'static str = "NOTIFICATION_GROUP_USER_ADDED";
    pub const GROUP_USER_REMOVED: &'static str = "NOTIFICATION_GROUP_USER_REMOVED";
    pub const GROUP_USER_SET_AS_ADMIN: &'static str = "NOTIFICATION_GROUP_USER_SET_AS_ADMIN";
    pub const ORDER_BOUGHT: &'static str = "NOTIFICATION_ORDER_BOUGHT";
    pub const SHARE_LIST_ORDERS_CREATED: &'static str = "NOTIFICATION_SHARE_LIST_ORDERS_CREATED";
}

static ROLES_CONSTRAINTS: &[Constraint] = &[
    Constraint::NotNull,
    Constraint::Choice(Choice::many_of(ROLES, Some(1), None)),
];

/// Set of account roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roles(Option<Vec<String>>);

impl Roles {
    pub const USER: &'static str = "ROLE_USER";
    pub const NOT_ACTIVE: &'static str = "ROLE_USER_NOT_ACTIVE";
    pub const ADMIN: &'static str = "ROLE_ADMIN";
    pub const DELETED: &'static str = "ROLE_DELETED";

    /// Wrap `roles` without validating them.
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Some(roles.into_iter().map(Into::into).collect()))
    }

    /// The absent role set.
    pub const fn null() -> Self {
        Self(None)
    }

    /// Roles held, empty when absent.
    pub fn roles(&self) -> &[String] {
        self.0.as_deref().unwrap_or_default()
    }

    /// Whether `role` is held.
    pub fn has(&self, role: &str) -> bool {
        self.roles().iter().any(|held| held == role)
    }
}

impl ValueObject for Roles {
    fn subject(&self) -> Subject<'_> {
        Subject::from_texts(self.0.as_deref())
    }

    fn constraints(&self) -> &'static [Constraint] {
        ROLES_CONSTRAINTS
    }
}
