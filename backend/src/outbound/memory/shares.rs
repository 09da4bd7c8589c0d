//! In-memory share links.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};
use tokio::sync::RwLock;

use super::paginate;
use crate::domain::Share;
use crate::domain::ports::{RepositoryError, ShareRepository};
use crate::domain::value_objects::Identifier;

#[derive(Debug, Default)]
pub struct MemoryShareRepository {
    shares: RwLock<Vec<Share>>,
}

#[async_trait]
impl ShareRepository for MemoryShareRepository {
    async fn save(&self, share: &Share) -> Result<(), RepositoryError> {
        self.shares.write().await.push(share.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &Identifier) -> Result<Option<Share>, RepositoryError> {
        let shares = self.shares.read().await;
        Ok(shares.iter().find(|share| &share.id == id).cloned())
    }

    async fn find_expired(
        &self,
        now: DateTime<Utc>,
        request: PageRequest,
    ) -> Result<Page<Share>, RepositoryError> {
        let shares = self.shares.read().await;
        let mut rows: Vec<Share> = shares
            .iter()
            .filter(|share| share.is_expired(now))
            .cloned()
            .collect();
        rows.sort_by_key(|share| share.expire);
        Ok(paginate(rows, request))
    }

    async fn remove(&self, ids: &[Identifier]) -> Result<u64, RepositoryError> {
        let mut shares = self.shares.write().await;
        let before = shares.len();
        shares.retain(|share| !ids.contains(&share.id));
        Ok(u64::try_from(before - shares.len()).unwrap_or(u64::MAX))
    }
}
