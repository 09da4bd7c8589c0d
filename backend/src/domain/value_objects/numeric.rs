//! Number-backed value objects.

use super::macros::nullable_number_value_object;
use crate::domain::validation::Constraint;

nullable_number_value_object! {
    /// Price of a product in a shop.
    Money => &[Constraint::PositiveOrZero]
}

nullable_number_value_object! {
    /// Quantity of a product in an order.
    Amount => &[Constraint::PositiveOrZero]
}
