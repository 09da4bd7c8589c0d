//! String-backed value objects: identifiers, names and free text.

use uuid::Uuid;

use super::macros::{nullable_text_value_object, text_value_object};
use crate::domain::validation::Constraint;

/// Maximum length of names.
pub const NAME_MAX_LENGTH: usize = 50;
/// Minimum password length.
pub const PASSWORD_MIN_LENGTH: usize = 6;
/// Maximum password length.
pub const PASSWORD_MAX_LENGTH: usize = 50;
/// Maximum description length.
pub const DESCRIPTION_MAX_LENGTH: usize = 500;
/// Minimum address length.
pub const ADDRESS_MIN_LENGTH: usize = 5;
/// Maximum address length.
pub const ADDRESS_MAX_LENGTH: usize = 100;
/// Maximum stored path length.
pub const PATH_MAX_LENGTH: usize = 255;

text_value_object! {
    /// Identifier of an entity, a UUID string.
    Identifier => &[Constraint::NotBlank, Constraint::Uuid]
}

impl Identifier {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }
}

nullable_text_value_object! {
    /// Optional reference to an entity; when present it must be a UUID.
    IdentifierNullable => &[Constraint::Length { min: Some(1), max: None }, Constraint::Uuid]
}

impl From<Identifier> for IdentifierNullable {
    fn from(value: Identifier) -> Self {
        Self::new(value)
    }
}

text_value_object! {
    /// Single-word name: letters, digits, `_` and `-`.
    Name => &[
        Constraint::NotBlank,
        Constraint::Length { min: Some(1), max: Some(NAME_MAX_LENGTH) },
        Constraint::Alphanumeric,
    ]
}

text_value_object! {
    /// Name that may contain spaces.
    NameWithSpaces => &[
        Constraint::NotBlank,
        Constraint::Length { min: Some(1), max: Some(NAME_MAX_LENGTH) },
        Constraint::AlphanumericWithWhitespace,
    ]
}

text_value_object! {
    /// E-mail address.
    Email => &[Constraint::NotBlank, Constraint::Email]
}

text_value_object! {
    /// Plain-text or hashed password.
    Password => &[
        Constraint::NotBlank,
        Constraint::Length { min: Some(PASSWORD_MIN_LENGTH), max: Some(PASSWORD_MAX_LENGTH) },
    ]
}

nullable_text_value_object! {
    /// Free-text description.
    Description => &[Constraint::Length { min: None, max: Some(DESCRIPTION_MAX_LENGTH) }]
}

nullable_text_value_object! {
    /// Postal address of a shop.
    Address => &[Constraint::Length {
        min: Some(ADDRESS_MIN_LENGTH),
        max: Some(ADDRESS_MAX_LENGTH),
    }]
}

nullable_text_value_object! {
    /// Absolute HTTP(S) URL.
    Url => &[Constraint::Url]
}

nullable_text_value_object! {
    /// Stored file path, e.g. an uploaded image.
    Path => &[Constraint::Length { min: None, max: Some(PATH_MAX_LENGTH) }]
}
