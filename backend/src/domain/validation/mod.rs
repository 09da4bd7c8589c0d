//! Constraint-based validation for value objects and request DTOs.
//!
//! A value object declares an ordered list of [`Constraint`]s over the
//! primitive it wraps. [`validate`] walks that list and returns every
//! violated [`ErrorKind`] in declaration order. Request DTOs compose their
//! fields through [`ValidationBuilder`], producing [`ValidationErrors`]
//! keyed by field name.
//!
//! # Examples
//! ```
//! use basket::domain::validation::{Constraint, ErrorKind, Subject, validate};
//!
//! let constraints = [
//!     Constraint::NotBlank,
//!     Constraint::Length { min: Some(3), max: None },
//! ];
//! assert_eq!(
//!     validate(Subject::Text(""), &constraints),
//!     vec![ErrorKind::NotBlank, ErrorKind::StringTooShort],
//! );
//! ```

mod constraint;
mod error_kind;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use self::constraint::{Choice, Constraint, Subject};
pub use self::error_kind::ErrorKind;

/// Evaluate `constraints` in order, collecting every violation.
pub fn validate(subject: Subject<'_>, constraints: &[Constraint]) -> Vec<ErrorKind> {
    constraints
        .iter()
        .filter_map(|constraint| constraint.check(subject))
        .collect()
}

/// A domain value that carries its own validation rules.
pub trait ValueObject {
    /// The wrapped primitive as a validation subject.
    fn subject(&self) -> Subject<'_>;

    /// Rules the wrapped primitive must satisfy, in evaluation order.
    fn constraints(&self) -> &'static [Constraint];

    /// Every violated rule, in evaluation order.
    fn validate(&self) -> Vec<ErrorKind> {
        validate(self.subject(), self.constraints())
    }

    /// Whether every rule holds.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Violations grouped by field name.
///
/// Fields without violations are absent. Serialises as
/// `{ "field": ["kind", ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<ErrorKind>>);

impl ValidationErrors {
    /// Whether no field has violations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Violations recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&[ErrorKind]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Record `kinds` against `field`, ignoring empty lists.
    pub fn insert(&mut self, field: impl Into<String>, kinds: Vec<ErrorKind>) {
        if kinds.is_empty() {
            return;
        }
        self.0.entry(field.into()).or_default().extend(kinds);
    }

    /// Iterate over `(field, violations)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ErrorKind])> {
        self.0
            .iter()
            .map(|(field, kinds)| (field.as_str(), kinds.as_slice()))
    }

    /// Convert into `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Composes field validations into [`ValidationErrors`].
///
/// # Examples
/// ```
/// use basket::domain::validation::{ErrorKind, ValidationBuilder};
/// use basket::domain::value_objects::{Email, Name};
///
/// let errors = ValidationBuilder::new()
///     .value("name", &Name::new("Groceries"))
///     .value("email", &Email::new("not-an-email"))
///     .build();
/// assert_eq!(errors.get("email"), Some(&[ErrorKind::Email][..]));
/// assert!(errors.get("name").is_none());
/// ```
#[derive(Debug, Default)]
#[must_use]
pub struct ValidationBuilder {
    errors: ValidationErrors,
}

impl ValidationBuilder {
    /// Start an empty composition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a required value object under `field`.
    pub fn value(mut self, field: &str, value: &impl ValueObject) -> Self {
        self.errors.insert(field, value.validate());
        self
    }

    /// Validate an optional value object; `None` is accepted.
    pub fn optional<V: ValueObject>(self, field: &str, value: Option<&V>) -> Self {
        match value {
            Some(value) => self.value(field, value),
            None => self,
        }
    }

    /// Validate each element of a list, keying violations as `field.index`.
    pub fn values<V: ValueObject>(mut self, field: &str, values: &[V]) -> Self {
        for (index, value) in values.iter().enumerate() {
            self.errors
                .insert(format!("{field}.{index}"), value.validate());
        }
        self
    }

    /// Validate a raw primitive against ad-hoc constraints.
    pub fn check(mut self, field: &str, subject: Subject<'_>, constraints: &[Constraint]) -> Self {
        self.errors.insert(field, validate(subject, constraints));
        self
    }

    /// Finish the composition.
    pub fn build(self) -> ValidationErrors {
        self.errors
    }
}
