//! Maintenance settings loaded via OrthoConfig.
//!
//! Values come from `BASKET_CLEANUP_*` environment variables, configuration
//! files and command-line flags, in increasing precedence.

use std::path::PathBuf;

use chrono::{DateTime, TimeDelta, Utc};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SNAPSHOT: &str = "users.json";

/// Settings for the `remove-expired-users` maintenance run.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BASKET_CLEANUP")]
pub struct CleanupSettings {
    /// User snapshot to clean; defaults to `users.json` in the working
    /// directory.
    pub snapshot: Option<PathBuf>,
    /// Days an account may stay inactive before it is removed.
    #[ortho_config(default = 1)]
    pub expiration_days: u32,
    /// Page size used while walking expired accounts.
    #[ortho_config(default = 100)]
    pub page_items: u32,
    /// Report what would be removed without changing the snapshot.
    pub dry_run: Option<bool>,
}

impl CleanupSettings {
    /// Return the configured snapshot path, falling back to the default.
    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT))
    }

    /// Whether the run only reports; off unless enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }

    /// Accounts created before this instant have expired.
    ///
    /// Returns `None` when the expiration reaches past the earliest
    /// representable instant.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        TimeDelta::try_days(i64::from(self.expiration_days))
            .and_then(|expiration| now.checked_sub_signed(expiration))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for cleanup configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use chrono::TimeZone;
    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "BASKET_CLEANUP_SNAPSHOT",
        "BASKET_CLEANUP_EXPIRATION_DAYS",
        "BASKET_CLEANUP_PAGE_ITEMS",
        "BASKET_CLEANUP_DRY_RUN",
    ];

    fn load_from<const N: usize>(args: [&str; N]) -> CleanupSettings {
        let argv = std::iter::once(OsString::from("remove-expired-users"))
            .chain(args.into_iter().map(OsString::from));
        CleanupSettings::load_from_iter(argv).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from([]);
        assert_eq!(settings.snapshot_path(), PathBuf::from(DEFAULT_SNAPSHOT));
        assert_eq!(settings.expiration_days, 1);
        assert_eq!(settings.page_items, 100);
        assert!(!settings.dry_run());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BASKET_CLEANUP_SNAPSHOT", Some("/tmp/basket/users.json".to_owned())),
            ("BASKET_CLEANUP_EXPIRATION_DAYS", Some("7".to_owned())),
            ("BASKET_CLEANUP_PAGE_ITEMS", Some("25".to_owned())),
            ("BASKET_CLEANUP_DRY_RUN", Some("true".to_owned())),
        ]);

        let settings = load_from([]);
        assert_eq!(
            settings.snapshot_path(),
            PathBuf::from("/tmp/basket/users.json")
        );
        assert_eq!(settings.expiration_days, 7);
        assert_eq!(settings.page_items, 25);
        assert!(settings.dry_run());
    }

    #[rstest]
    fn cli_flags_override_environment() {
        let _guard = lock_env([
            ("BASKET_CLEANUP_SNAPSHOT", None::<String>),
            ("BASKET_CLEANUP_EXPIRATION_DAYS", Some("7".to_owned())),
            ("BASKET_CLEANUP_PAGE_ITEMS", None::<String>),
            ("BASKET_CLEANUP_DRY_RUN", None::<String>),
        ]);

        let settings = load_from(["--expiration-days", "3"]);
        assert_eq!(settings.expiration_days, 3);
    }

    #[rstest]
    #[case::enabled(Some("true"), true)]
    #[case::disabled(Some("false"), false)]
    #[case::unset(None, false)]
    fn dry_run_follows_environment(#[case] value: Option<&str>, #[case] expected: bool) {
        let _guard = lock_env([
            ("BASKET_CLEANUP_SNAPSHOT", None::<String>),
            ("BASKET_CLEANUP_EXPIRATION_DAYS", None::<String>),
            ("BASKET_CLEANUP_PAGE_ITEMS", None::<String>),
            ("BASKET_CLEANUP_DRY_RUN", value.map(str::to_owned)),
        ]);

        assert_eq!(load_from([]).dry_run(), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(30, 30)]
    fn cutoff_subtracts_whole_days(#[case] expiration_days: u32, #[case] days_back: i64) {
        let now = fixed_now();
        let settings = settings_with_expiration(expiration_days);
        assert_eq!(settings.cutoff(now), Some(now - TimeDelta::days(days_back)));
    }

    #[rstest]
    #[case::past_calendar(100_000_000)]
    #[case::largest(u32::MAX)]
    fn cutoff_is_none_beyond_the_calendar(#[case] expiration_days: u32) {
        let settings = settings_with_expiration(expiration_days);
        assert_eq!(settings.cutoff(fixed_now()), None);
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn settings_with_expiration(expiration_days: u32) -> CleanupSettings {
        CleanupSettings {
            snapshot: None,
            expiration_days,
            page_items: 100,
            dry_run: None,
        }
    }
}
