//! Argon2id password hashing adapter.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::value_objects::Password;

/// Hashes passwords with Argon2id and default parameters, producing PHC
/// strings such as `$argon2id$v=19$...`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArgonPasswordHasher;

impl PasswordHasher for ArgonPasswordHasher {
    fn hash(&self, password: &Password) -> Result<String, PasswordHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.value().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHasherError::hash(err.to_string()))
    }

    fn verify(&self, password: &Password, hash: &str) -> Result<bool, PasswordHasherError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
        match Argon2::default().verify_password(password.value().as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHasherError::hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn hashes_verify_against_their_password() {
        let hasher = ArgonPasswordHasher;
        let hash = hasher.hash(&Password::new("s3cret-pass")).expect("hash");
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify(&Password::new("s3cret-pass"), &hash).expect("verify"));
        assert!(!hasher.verify(&Password::new("wrong-pass"), &hash).expect("verify"));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let hasher = ArgonPasswordHasher;
        let first = hasher.hash(&Password::new("s3cret-pass")).expect("hash");
        let second = hasher.hash(&Password::new("s3cret-pass")).expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[case::empty("")]
    #[case::plain_text("s3cret-pass")]
    fn malformed_hashes_are_errors(#[case] stored: &str) {
        let error = ArgonPasswordHasher
            .verify(&Password::new("s3cret-pass"), stored)
            .expect_err("malformed");
        assert!(matches!(error, PasswordHasherError::MalformedHash { .. }));
    }
}
