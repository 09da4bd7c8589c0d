//! Port for credential hashing.

use crate::domain::value_objects::Password;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Port for hashing and verifying passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Encode `password` into a self-describing hash string.
    fn hash(&self, password: &Password) -> Result<String, PasswordHasherError>;

    /// Whether `password` matches the encoded `hash`.
    fn verify(&self, password: &Password, hash: &str) -> Result<bool, PasswordHasherError>;
}
