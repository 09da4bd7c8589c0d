//! Cleanup orchestration over a user snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::cleanup::config::CleanupSettings;
use crate::domain::{Error, UserService};
use crate::outbound::argon::ArgonPasswordHasher;
use crate::outbound::memory::MemoryUserRepository;
use crate::outbound::snapshot::{SnapshotError, UserSnapshotStore};

/// Errors returned while cleaning a snapshot.
#[derive(Debug, Error)]
pub enum CleanupError {
    /// Snapshot paths must be valid UTF-8.
    #[error("snapshot path {} is not valid UTF-8", path.display())]
    NonUtf8Path {
        /// Offending path.
        path: PathBuf,
    },
    /// Reading or writing the snapshot failed.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    /// The expiration reaches past the earliest representable instant.
    #[error("expiration of {days} days is out of range")]
    ExpirationOutOfRange {
        /// Configured expiration.
        days: u32,
    },
    /// The user service rejected the run.
    #[error("cleanup failed: {0}")]
    Domain(#[from] Error),
}

/// What a cleanup run found and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    /// Accounts created before this instant were considered expired.
    pub cutoff: DateTime<Utc>,
    /// Expired inactive accounts found.
    pub expired: u64,
    /// Accounts actually removed; zero on a dry run.
    pub removed: u64,
    /// Whether the snapshot was left untouched.
    pub dry_run: bool,
}

/// Remove inactive accounts older than the configured expiration from the
/// snapshot named by `settings`.
///
/// The snapshot is rewritten only when something was removed.
///
/// # Errors
///
/// Returns [`CleanupError`] when the snapshot cannot be read or written, or
/// when the expiration or page size is out of range.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use basket::cleanup::{CleanupSettings, remove_expired_users};
/// use mockable::DefaultClock;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = CleanupSettings {
///     snapshot: Some("users.json".into()),
///     expiration_days: 1,
///     page_items: 100,
///     dry_run: Some(true),
/// };
/// let report = remove_expired_users(&settings, Arc::new(DefaultClock)).await?;
/// assert_eq!(report.removed, 0);
/// # Ok(())
/// # }
/// ```
pub async fn remove_expired_users(
    settings: &CleanupSettings,
    clock: Arc<dyn Clock>,
) -> Result<CleanupReport, CleanupError> {
    let path = Utf8PathBuf::from_path_buf(settings.snapshot_path())
        .map_err(|path| CleanupError::NonUtf8Path { path })?;
    let store = UserSnapshotStore::open(&path)?;
    let users = Arc::new(MemoryUserRepository::from_users(store.load()?));
    let cutoff = settings
        .cutoff(clock.utc())
        .ok_or(CleanupError::ExpirationOutOfRange {
            days: settings.expiration_days,
        })?;
    let service = UserService::new(Arc::clone(&users), Arc::new(ArgonPasswordHasher), clock);

    let candidates = service
        .find_expired_inactive(cutoff, settings.page_items)
        .await?;
    let expired = u64::try_from(candidates.len()).unwrap_or(u64::MAX);
    if settings.dry_run() {
        info!(snapshot = %path, %cutoff, expired, "dry run; snapshot left unchanged");
        return Ok(CleanupReport {
            cutoff,
            expired,
            removed: 0,
            dry_run: true,
        });
    }

    let removed = service
        .remove_expired_inactive(cutoff, settings.page_items)
        .await?;
    if removed > 0 {
        store.save(&users.snapshot().await)?;
    }
    info!(snapshot = %path, %cutoff, expired, removed, "expired users cleanup finished");
    Ok(CleanupReport {
        cutoff,
        expired,
        removed,
        dry_run: false,
    })
}
