//! Wiring for the expired-account cleanup run.

mod config;
mod run;

pub use config::CleanupSettings;
pub use run::{CleanupError, CleanupReport, remove_expired_users};
