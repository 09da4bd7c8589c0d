//! Constraint declarations and their evaluation against a primitive subject.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use tracing::warn;

use super::ErrorKind;

/// The primitive a constraint is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Subject<'a> {
    /// Absent value.
    Null,
    /// A string value.
    Text(&'a str),
    /// A numeric value.
    Number(f64),
    /// A list of strings, e.g. a role set.
    Texts(&'a [String]),
    /// A point in time.
    Timestamp(DateTime<Utc>),
}

impl<'a> Subject<'a> {
    /// Build a text subject from an optional string.
    pub fn from_text(value: Option<&'a str>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }

    /// Build a number subject from an optional float.
    pub fn from_number(value: Option<f64>) -> Self {
        value.map_or(Self::Null, Self::Number)
    }

    /// Build a list subject from an optional list.
    pub fn from_texts(value: Option<&'a [String]>) -> Self {
        value.map_or(Self::Null, Self::Texts)
    }

    /// Text content, treating the empty string as absent.
    fn non_empty_text(self) -> Option<&'a str> {
        match self {
            Self::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// Accepted values for a [`Constraint::Choice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Allowed values.
    pub choices: &'static [&'static str],
    /// Whether the subject is a list of values.
    pub multiple: bool,
    /// Minimum number of selections when `multiple`.
    pub min: Option<usize>,
    /// Maximum number of selections when `multiple`.
    pub max: Option<usize>,
}

impl Choice {
    /// Single-value choice among `choices`.
    pub const fn one_of(choices: &'static [&'static str]) -> Self {
        Self {
            choices,
            multiple: false,
            min: None,
            max: None,
        }
    }

    /// Multi-value choice among `choices` bounded by `min`/`max` selections.
    pub const fn many_of(
        choices: &'static [&'static str],
        min: Option<usize>,
        max: Option<usize>,
    ) -> Self {
        Self {
            choices,
            multiple: true,
            min,
            max,
        }
    }

    fn accepts(&self, value: &str) -> bool {
        self.choices.iter().any(|choice| *choice == value)
    }
}

/// A single rule a value must satisfy.
///
/// Every constraint except [`Constraint::NotBlank`] and
/// [`Constraint::NotNull`] accepts [`Subject::Null`]; format constraints
/// (e-mail, URL, UUID, patterns, dates) also accept the empty string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    NotBlank,
    NotNull,
    /// Length bounds in characters.
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    Email,
    Url,
    Uuid,
    Choice(Choice),
    /// Text must match the given pattern.
    Regex(&'static str),
    /// Letters, digits, `_` and `-`.
    Alphanumeric,
    /// Letters, digits, `_`, `-` and whitespace.
    AlphanumericWithWhitespace,
    GreaterThan(f64),
    GreaterThanOrEqual(f64),
    LessThan(f64),
    LessThanOrEqual(f64),
    Positive,
    PositiveOrZero,
    /// Text in `YYYY-MM-DD` form.
    Date,
    /// Text in `YYYY-MM-DD HH:MM:SS` or RFC 3339 form.
    DateTime,
}

impl Constraint {
    /// Evaluate the constraint, returning the violation if any.
    pub fn check(&self, subject: Subject<'_>) -> Option<ErrorKind> {
        match *self {
            Self::NotBlank => check_not_blank(subject),
            Self::NotNull => matches!(subject, Subject::Null).then_some(ErrorKind::NotNull),
            Self::Length { min, max } => check_length(subject, min, max),
            Self::Email => check_pattern(subject, email_regex(), ErrorKind::Email),
            Self::Url => check_pattern(subject, url_regex(), ErrorKind::Url),
            Self::Uuid => subject.non_empty_text().and_then(check_uuid),
            Self::Choice(choice) => check_choice(subject, choice),
            Self::Regex(pattern) => check_custom_pattern(subject, pattern),
            Self::Alphanumeric => {
                check_pattern(subject, alphanumeric_regex(), ErrorKind::Alphanumeric)
            }
            Self::AlphanumericWithWhitespace => check_pattern(
                subject,
                alphanumeric_whitespace_regex(),
                ErrorKind::AlphanumericWithWhitespace,
            ),
            Self::GreaterThan(bound) => {
                check_number(subject, |n| n > bound, ErrorKind::GreaterThan)
            }
            Self::GreaterThanOrEqual(bound) => {
                check_number(subject, |n| n >= bound, ErrorKind::GreaterThanOrEqual)
            }
            Self::LessThan(bound) => check_number(subject, |n| n < bound, ErrorKind::LessThan),
            Self::LessThanOrEqual(bound) => {
                check_number(subject, |n| n <= bound, ErrorKind::LessThanOrEqual)
            }
            Self::Positive => check_number(subject, |n| n > 0.0, ErrorKind::Positive),
            Self::PositiveOrZero => {
                check_number(subject, |n| n >= 0.0, ErrorKind::PositiveOrZero)
            }
            Self::Date => subject.non_empty_text().and_then(|text| {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .is_err()
                    .then_some(ErrorKind::DateInvalid)
            }),
            Self::DateTime => subject.non_empty_text().and_then(check_datetime),
        }
    }
}

fn check_not_blank(subject: Subject<'_>) -> Option<ErrorKind> {
    let blank = match subject {
        Subject::Null => true,
        Subject::Text(text) => text.trim().is_empty(),
        Subject::Texts(values) => values.is_empty(),
        Subject::Number(_) | Subject::Timestamp(_) => false,
    };
    blank.then_some(ErrorKind::NotBlank)
}

fn check_length(
    subject: Subject<'_>,
    min: Option<usize>,
    max: Option<usize>,
) -> Option<ErrorKind> {
    let Subject::Text(text) = subject else {
        return None;
    };
    let length = text.chars().count();
    if min.is_some_and(|min| length < min) {
        return Some(ErrorKind::StringTooShort);
    }
    if max.is_some_and(|max| length > max) {
        return Some(ErrorKind::StringTooLong);
    }
    None
}

fn check_number(
    subject: Subject<'_>,
    accepts: impl Fn(f64) -> bool,
    kind: ErrorKind,
) -> Option<ErrorKind> {
    match subject {
        Subject::Number(number) if !accepts(number) => Some(kind),
        _ => None,
    }
}

fn check_pattern(subject: Subject<'_>, regex: &Regex, kind: ErrorKind) -> Option<ErrorKind> {
    let text = subject.non_empty_text()?;
    (!regex.is_match(text)).then_some(kind)
}

fn check_custom_pattern(subject: Subject<'_>, pattern: &str) -> Option<ErrorKind> {
    let text = subject.non_empty_text()?;
    match Regex::new(pattern) {
        Ok(regex) => (!regex.is_match(text)).then_some(ErrorKind::RegexFail),
        Err(error) => {
            warn!(%pattern, %error, "regex constraint failed to compile");
            Some(ErrorKind::RegexFail)
        }
    }
}

fn check_choice(subject: Subject<'_>, choice: Choice) -> Option<ErrorKind> {
    match subject {
        Subject::Text(value) if !choice.multiple => {
            (!choice.accepts(value)).then_some(ErrorKind::ChoiceNotSuch)
        }
        Subject::Texts(values) if choice.multiple => {
            if values.iter().any(|value| !choice.accepts(value)) {
                return Some(ErrorKind::ChoiceNotSuch);
            }
            if choice.min.is_some_and(|min| values.len() < min) {
                return Some(ErrorKind::ChoiceTooFew);
            }
            if choice.max.is_some_and(|max| values.len() > max) {
                return Some(ErrorKind::ChoiceTooMuch);
            }
            None
        }
        Subject::Null => None,
        _ => Some(ErrorKind::ChoiceNotSuch),
    }
}

/// Canonical 8-4-4-4-12 hexadecimal UUID.
const UUID_LENGTH: usize = 36;
const UUID_HYPHENS: [usize; 4] = [8, 13, 18, 23];
const UUID_VERSION_POSITION: usize = 14;
const UUID_VARIANT_POSITION: usize = 19;

fn check_uuid(text: &str) -> Option<ErrorKind> {
    if !text.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
        return Some(ErrorKind::UuidInvalidCharacters);
    }
    let bytes = text.as_bytes();
    if bytes.len() < UUID_LENGTH {
        return Some(ErrorKind::UuidTooShort);
    }
    if bytes.len() > UUID_LENGTH {
        return Some(ErrorKind::UuidTooLong);
    }
    let hyphens_misplaced = bytes
        .iter()
        .enumerate()
        .any(|(index, byte)| (*byte == b'-') != UUID_HYPHENS.contains(&index));
    if hyphens_misplaced {
        return Some(ErrorKind::UuidInvalidHyphenPlacement);
    }
    if !matches!(bytes.get(UUID_VERSION_POSITION), Some(b'1'..=b'8')) {
        return Some(ErrorKind::UuidInvalidVersion);
    }
    if !matches!(
        bytes.get(UUID_VARIANT_POSITION),
        Some(b'8' | b'9' | b'a' | b'b' | b'A' | b'B')
    ) {
        return Some(ErrorKind::UuidInvalidVariant);
    }
    None
}

fn check_datetime(text: &str) -> Option<ErrorKind> {
    let valid = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").is_ok()
        || DateTime::parse_from_rfc3339(text).is_ok();
    (!valid).then_some(ErrorKind::DatetimeInvalid)
}

fn cached_regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("constraint regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached_regex(&RE, r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached_regex(&RE, r"^https?://[^\s/$.?#][^\s]*$")
}

fn alphanumeric_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached_regex(&RE, r"^[\p{L}\p{N}_-]+$")
}

fn alphanumeric_whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached_regex(&RE, r"^[\p{L}\p{N}_\s-]+$")
}
