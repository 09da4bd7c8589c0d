//! Domain value objects.
//!
//! Each value object wraps a (possibly absent) primitive and declares the
//! constraints it must satisfy. Construction never fails; callers validate
//! through [`ValueObject`](crate::domain::validation::ValueObject) or a
//! [`ValidationBuilder`](crate::domain::validation::ValidationBuilder).

mod choice;
mod macros;
mod numeric;
mod text;

pub use self::choice::{
    GROUP_TYPES, GroupType, LANGUAGES, Language, NOTIFICATION_TYPES, NotificationType, ROLES,
    Roles, UNIT_MEASURES, UnitMeasure,
};
pub use self::numeric::{Amount, Money};
pub use self::text::{
    ADDRESS_MAX_LENGTH, ADDRESS_MIN_LENGTH, Address, DESCRIPTION_MAX_LENGTH, Description, Email,
    Identifier, IdentifierNullable, NAME_MAX_LENGTH, Name, NameWithSpaces, PASSWORD_MAX_LENGTH,
    PASSWORD_MIN_LENGTH, PATH_MAX_LENGTH, Password, Path, Url,
};
