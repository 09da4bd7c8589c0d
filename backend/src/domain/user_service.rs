//! User account services: registration, activation, login and the
//! expired-account sweep.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::paginator::collect_all;
use crate::domain::ports::{PasswordHasher, PasswordHasherError, RepositoryError, UserRepository};
use crate::domain::service_support::{
    ensure_valid, first_page, map_repository_error, not_found, repeated,
};
use crate::domain::validation::ValidationBuilder;
use crate::domain::value_objects::{
    Email, Identifier, Language, NameWithSpaces, Password, Path, Roles,
};
use crate::domain::{Error, User};

/// Data required to register an account.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: Email,
    pub password: Password,
    pub name: NameWithSpaces,
    pub language: Language,
    pub image: Path,
}

/// User account service.
#[derive(Clone)]
pub struct UserService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U, H> UserService<U, H> {
    /// Create a new service over the user store and password hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }
}

impl<U, H> UserService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    fn email_exists() -> Error {
        repeated("email_exists", "The email already exists")
    }

    fn user_not_found() -> Error {
        not_found("user_not_found", "User not found")
    }

    fn map_hasher_error(error: PasswordHasherError) -> Error {
        Error::internal(format!("password hashing failed: {error}"))
    }

    /// Register a new, not yet active, account.
    ///
    /// # Errors
    /// `invalid_request` for malformed fields, `conflict` with
    /// `email_exists` when the e-mail is registered.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<User, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("email", &request.email)
                .value("password", &request.password)
                .value("name", &request.name)
                .value("language", &request.language)
                .value("image", &request.image)
                .build(),
        )?;

        let existing = self
            .users
            .find_by_email(&request.email)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(Self::email_exists());
        }

        let password = self
            .hasher
            .hash(&request.password)
            .map_err(Self::map_hasher_error)?;
        let user = User {
            id: Identifier::random(),
            email: request.email,
            password,
            name: request.name,
            roles: Roles::new([Roles::NOT_ACTIVE]),
            language: request.language,
            image: request.image,
            created_on: self.clock.utc(),
        };

        match self.users.save(&user).await {
            Ok(()) => {}
            Err(RepositoryError::Duplicate { .. }) => return Err(Self::email_exists()),
            Err(error) => return Err(map_repository_error(error)),
        }
        info!(user_id = %user.id, "user signed up");
        Ok(user)
    }

    /// Activate a registered account.
    ///
    /// # Errors
    /// `not_found` with `user_not_found` for unknown or deleted accounts;
    /// `conflict` with `user_already_active` when nothing is left to
    /// activate.
    pub async fn activate(&self, user_id: &Identifier) -> Result<User, Error> {
        ensure_valid(ValidationBuilder::new().value("id", user_id).build())?;

        let mut user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(Self::user_not_found)?;
        if user.is_deleted() {
            warn!(%user_id, "activation requested for a deleted account");
            return Err(Self::user_not_found());
        }
        if user.is_active() {
            return Err(repeated("user_already_active", "User already active"));
        }

        user.activate();
        self.users
            .update(&user)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %user.id, "user activated");
        Ok(user)
    }

    /// Check credentials, returning the matching active account.
    ///
    /// # Errors
    /// `unauthorized` with `credentials` for unknown e-mails or wrong
    /// passwords, and with `user_not_active` for inactive accounts.
    pub async fn login(&self, email: &Email, password: &Password) -> Result<User, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("email", email)
                .value("password", password)
                .build(),
        )?;

        let credentials = || {
            Error::unauthorized("Wrong credentials").with_error("credentials", "Wrong credentials")
        };
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(credentials)?;
        let matches = self
            .hasher
            .verify(password, &user.password)
            .map_err(Self::map_hasher_error)?;
        if !matches {
            return Err(credentials());
        }
        if !user.is_active() {
            return Err(Error::unauthorized("User not active")
                .with_error("user_not_active", "User not active"));
        }
        Ok(user)
    }

    /// Every inactive account registered before `cutoff`.
    ///
    /// # Errors
    /// `invalid_request` when `page_items` is out of range; repository
    /// failures otherwise.
    pub async fn find_expired_inactive(
        &self,
        cutoff: DateTime<Utc>,
        page_items: u32,
    ) -> Result<Vec<User>, Error> {
        let first = first_page(page_items)?;
        let users = &self.users;
        collect_all(first, |request| users.find_inactive_created_before(cutoff, request))
            .await
            .map_err(map_repository_error)
    }

    /// Remove every inactive account registered before `cutoff`, returning
    /// how many were removed.
    ///
    /// All pages are read before anything is removed so that removals do
    /// not shift the pages still to be read.
    ///
    /// # Errors
    /// See [`Self::find_expired_inactive`].
    pub async fn remove_expired_inactive(
        &self,
        cutoff: DateTime<Utc>,
        page_items: u32,
    ) -> Result<u64, Error> {
        let ids: Vec<Identifier> = self
            .find_expired_inactive(cutoff, page_items)
            .await?
            .into_iter()
            .map(|user| user.id)
            .collect();
        if ids.is_empty() {
            debug!(%cutoff, "no expired inactive users");
            return Ok(0);
        }

        let removed = self
            .users
            .remove(&ids)
            .await
            .map_err(map_repository_error)?;
        info!(%cutoff, removed, "removed expired inactive users");
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
