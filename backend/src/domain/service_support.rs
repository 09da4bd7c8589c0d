//! Helpers shared by the domain services.

use pagination::{PageRequest, PaginationError};
use tracing::{error, warn};

use crate::domain::ports::{GroupRepository, RepositoryError};
use crate::domain::validation::ValidationErrors;
use crate::domain::value_objects::Identifier;
use crate::domain::{Error, UserGroup};

/// Message attached to every validation failure.
pub(crate) const WRONG_DATA: &str = "Wrong data";

/// Client-facing message for an unreachable repository.
pub(crate) const SERVICE_UNAVAILABLE: &str = "Service unavailable";
/// Client-facing message for a unique-key clash detected by storage.
pub(crate) const DUPLICATE_RECORD: &str = "Duplicate record";

/// Map a repository failure onto the domain error taxonomy.
///
/// Adapter detail is logged and kept out of client-visible messages.
pub(crate) fn map_repository_error(repository_error: RepositoryError) -> Error {
    match repository_error {
        RepositoryError::Connection { message } => {
            error!(%message, "repository unavailable");
            Error::service_unavailable(SERVICE_UNAVAILABLE)
        }
        RepositoryError::Query { message } => {
            Error::internal(format!("repository error: {message}"))
        }
        RepositoryError::Duplicate { message } => {
            warn!(%message, "duplicate record rejected by repository");
            Error::conflict(DUPLICATE_RECORD)
        }
    }
}

/// Reject the request when `errors` holds any violation.
pub(crate) fn ensure_valid(errors: ValidationErrors) -> Result<(), Error> {
    errors
        .into_result()
        .map_err(|errors| Error::from_validation(WRONG_DATA, &errors))
}

/// First page of a bulk walk with `page_items` rows per page.
pub(crate) fn first_page(page_items: u32) -> Result<PageRequest, Error> {
    PageRequest::first(page_items).map_err(|error: PaginationError| {
        Error::invalid_request(WRONG_DATA).with_error("page_items", error.to_string())
    })
}

/// Error returned when the requester may not touch a resource.
pub(crate) fn permissions() -> Error {
    Error::forbidden("Not permissions").with_error("permissions", "Not permissions")
}

/// Error returned when a lookup finds nothing.
pub(crate) fn not_found(key: &str, message: &str) -> Error {
    Error::not_found(message).with_error(key, message)
}

/// Error returned when a unique name is already taken.
pub(crate) fn repeated(key: &str, message: &str) -> Error {
    Error::conflict(message).with_error(key, message)
}

/// Load the requester's membership in a group, failing with `permissions`
/// when there is none.
pub(crate) async fn require_member<G>(
    groups: &G,
    group_id: &Identifier,
    user_id: &Identifier,
) -> Result<UserGroup, Error>
where
    G: GroupRepository + ?Sized,
{
    let membership = groups
        .find_membership(group_id, user_id)
        .await
        .map_err(map_repository_error)?;
    membership.ok_or_else(|| {
        warn!(%group_id, %user_id, "request from a user outside the group");
        permissions()
    })
}

/// Like [`require_member`] but the membership must carry the admin role.
pub(crate) async fn require_admin<G>(
    groups: &G,
    group_id: &Identifier,
    user_id: &Identifier,
) -> Result<UserGroup, Error>
where
    G: GroupRepository + ?Sized,
{
    let membership = require_member(groups, group_id, user_id).await?;
    if membership.is_admin() {
        Ok(membership)
    } else {
        Err(permissions())
    }
}
