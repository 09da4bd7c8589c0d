//! Shared list link services.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::paginator::collect_all;
use crate::domain::ports::{GroupRepository, ListOrdersRepository, ShareRepository};
use crate::domain::service_support::{
    ensure_valid, first_page, map_repository_error, not_found, require_member,
};
use crate::domain::validation::ValidationBuilder;
use crate::domain::value_objects::Identifier;
use crate::domain::{Error, ListOrders, Share};

/// How long a shared link stays usable unless configured otherwise.
pub const DEFAULT_SHARE_LIFETIME: Duration = Duration::days(2);

/// Shared list link service.
#[derive(Clone)]
pub struct ShareService<Sh, L, G> {
    shares: Arc<Sh>,
    lists: Arc<L>,
    groups: Arc<G>,
    clock: Arc<dyn Clock>,
    lifetime: Duration,
}

impl<Sh, L, G> ShareService<Sh, L, G> {
    /// Create a new service issuing links valid for [`DEFAULT_SHARE_LIFETIME`].
    pub fn new(shares: Arc<Sh>, lists: Arc<L>, groups: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            shares,
            lists,
            groups,
            clock,
            lifetime: DEFAULT_SHARE_LIFETIME,
        }
    }

    /// Issue links valid for `lifetime` instead.
    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }
}

impl<Sh, L, G> ShareService<Sh, L, G>
where
    Sh: ShareRepository,
    L: ListOrdersRepository,
    G: GroupRepository,
{
    fn list_orders_not_found() -> Error {
        not_found("list_orders_not_found", "List orders not found")
    }

    /// Create a public link to a list of orders.
    ///
    /// # Errors
    /// `forbidden` with `permissions`, `not_found` with
    /// `list_orders_not_found`.
    pub async fn share_list_orders(
        &self,
        group_id: &Identifier,
        user_id: &Identifier,
        list_orders_id: &Identifier,
    ) -> Result<Share, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("group_id", group_id)
                .value("user_id", user_id)
                .value("list_orders_id", list_orders_id)
                .build(),
        )?;
        require_member(self.groups.as_ref(), group_id, user_id).await?;
        self.lists
            .find_by_id(group_id, list_orders_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(Self::list_orders_not_found)?;

        let now = self.clock.utc();
        let share = Share {
            id: Identifier::random(),
            list_orders_id: list_orders_id.clone(),
            group_id: group_id.clone(),
            user_id: user_id.clone(),
            expire: now + self.lifetime,
            created_on: now,
        };
        self.shares
            .save(&share)
            .await
            .map_err(map_repository_error)?;
        info!(
            share_id = %share.id,
            %list_orders_id,
            expire = %share.expire,
            "list of orders shared"
        );
        Ok(share)
    }

    /// Resolve a shared link to its list of orders.
    ///
    /// # Errors
    /// `not_found` with `share_not_found` or `list_orders_not_found`,
    /// `forbidden` with `share_expired`.
    pub async fn shared_list_orders(&self, share_id: &Identifier) -> Result<ListOrders, Error> {
        ensure_valid(
            ValidationBuilder::new()
                .value("shared_list_orders_id", share_id)
                .build(),
        )?;

        let share = self
            .shares
            .find_by_id(share_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found("share_not_found", "Share not found"))?;
        if share.is_expired(self.clock.utc()) {
            debug!(%share_id, expire = %share.expire, "expired share requested");
            return Err(
                Error::forbidden("Share expired").with_error("share_expired", "Share expired")
            );
        }
        self.lists
            .find_by_id(&share.group_id, &share.list_orders_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(Self::list_orders_not_found)
    }

    /// Remove every expired link, returning how many were removed.
    ///
    /// # Errors
    /// `invalid_request` when `page_items` is out of range.
    pub async fn remove_expired(&self, page_items: u32) -> Result<u64, Error> {
        let first = first_page(page_items)?;
        let now = self.clock.utc();

        let shares = &self.shares;
        let ids: Vec<Identifier> = collect_all(first, |request| shares.find_expired(now, request))
            .await
            .map_err(map_repository_error)?
            .into_iter()
            .map(|share| share.id)
            .collect();
        if ids.is_empty() {
            return Ok(0);
        }

        let removed = self
            .shares
            .remove(&ids)
            .await
            .map_err(map_repository_error)?;
        info!(removed, "expired shares removed");
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "share_service_tests.rs"]
mod tests;
