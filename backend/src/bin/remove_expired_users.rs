//! Remove inactive accounts that never completed activation.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::sync::Arc;

use basket::cleanup::{CleanupSettings, remove_expired_users};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let settings = CleanupSettings::load()
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    remove_expired_users(&settings, Arc::new(DefaultClock))
        .await
        .map_err(|error| io::Error::other(error.to_string()))?;
    Ok(())
}
