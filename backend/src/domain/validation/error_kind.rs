//! Machine-readable validation violation tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag identifying why a value failed a constraint.
///
/// Serialised in `snake_case`, e.g. `string_too_short`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotBlank,
    NotNull,
    StringTooShort,
    StringTooLong,
    Email,
    Url,
    UuidInvalidCharacters,
    UuidTooShort,
    UuidTooLong,
    UuidInvalidHyphenPlacement,
    UuidInvalidVersion,
    UuidInvalidVariant,
    ChoiceNotSuch,
    ChoiceTooFew,
    ChoiceTooMuch,
    RegexFail,
    Alphanumeric,
    AlphanumericWithWhitespace,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Positive,
    PositiveOrZero,
    DateInvalid,
    DatetimeInvalid,
}

impl ErrorKind {
    /// Stable wire name of the tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotBlank => "not_blank",
            Self::NotNull => "not_null",
            Self::StringTooShort => "string_too_short",
            Self::StringTooLong => "string_too_long",
            Self::Email => "email",
            Self::Url => "url",
            Self::UuidInvalidCharacters => "uuid_invalid_characters",
            Self::UuidTooShort => "uuid_too_short",
            Self::UuidTooLong => "uuid_too_long",
            Self::UuidInvalidHyphenPlacement => "uuid_invalid_hyphen_placement",
            Self::UuidInvalidVersion => "uuid_invalid_version",
            Self::UuidInvalidVariant => "uuid_invalid_variant",
            Self::ChoiceNotSuch => "choice_not_such",
            Self::ChoiceTooFew => "choice_too_few",
            Self::ChoiceTooMuch => "choice_too_much",
            Self::RegexFail => "regex_fail",
            Self::Alphanumeric => "alphanumeric",
            Self::AlphanumericWithWhitespace => "alphanumeric_with_whitespace",
            Self::GreaterThan => "greater_than",
            Self::GreaterThanOrEqual => "greater_than_or_equal",
            Self::LessThan => "less_than",
            Self::LessThanOrEqual => "less_than_or_equal",
            Self::Positive => "positive",
            Self::PositiveOrZero => "positive_or_zero",
            Self::DateInvalid => "date_invalid",
            Self::DatetimeInvalid => "datetime_invalid",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
