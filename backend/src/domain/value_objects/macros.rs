//! Helper macros generating string-backed value objects.

/// Define a value object wrapping a required string.
macro_rules! text_value_object {
    (
        $(#[$outer:meta])*
        $name:ident => $constraints:expr
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap `value` without validating it.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// The wrapped string.
            pub fn value(&self) -> &str {
                self.0.as_str()
            }
        }

        impl $crate::domain::validation::ValueObject for $name {
            fn subject(&self) -> $crate::domain::validation::Subject<'_> {
                $crate::domain::validation::Subject::Text(self.0.as_str())
            }

            fn constraints(&self) -> &'static [$crate::domain::validation::Constraint] {
                $constraints
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.0.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Define a value object wrapping an optional string.
macro_rules! nullable_text_value_object {
    (
        $(#[$outer:meta])*
        $name:ident => $constraints:expr
    ) => {
        $(#[$outer])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Option<String>);

        impl $name {
            /// Wrap a present `value` without validating it.
            pub fn new(value: impl Into<String>) -> Self {
                Self(Some(value.into()))
            }

            /// The absent value.
            pub const fn null() -> Self {
                Self(None)
            }

            /// Wrap an optional value without validating it.
            pub const fn from_option(value: Option<String>) -> Self {
                Self(value)
            }

            /// The wrapped string, if present.
            pub fn value(&self) -> Option<&str> {
                self.0.as_deref()
            }

            /// Whether the value is absent.
            pub const fn is_null(&self) -> bool {
                self.0.is_none()
            }
        }

        impl $crate::domain::validation::ValueObject for $name {
            fn subject(&self) -> $crate::domain::validation::Subject<'_> {
                $crate::domain::validation::Subject::from_text(self.0.as_deref())
            }

            fn constraints(&self) -> &'static [$crate::domain::validation::Constraint] {
                $constraints
            }
        }
    };
}

/// Define a value object wrapping an optional number.
macro_rules! nullable_number_value_object {
    (
        $(#[$outer:meta])*
        $name:ident => $constraints:expr
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(Option<f64>);

        impl $name {
            /// Wrap a present `value` without validating it.
            pub const fn new(value: f64) -> Self {
                Self(Some(value))
            }

            /// The absent value.
            pub const fn null() -> Self {
                Self(None)
            }

            /// The wrapped number, if present.
            pub const fn value(&self) -> Option<f64> {
                self.0
            }
        }

        impl $crate::domain::validation::ValueObject for $name {
            fn subject(&self) -> $crate::domain::validation::Subject<'_> {
                $crate::domain::validation::Subject::from_number(self.0)
            }

            fn constraints(&self) -> &'static [$crate::domain::validation::Constraint] {
                $constraints
            }
        }
    };
}

pub(crate) use nullable_number_value_object;
pub(crate) use nullable_text_value_object;
pub(crate) use text_value_object;
