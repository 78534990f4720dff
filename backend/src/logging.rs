//! Tracing subscriber setup for the server binary.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `filter` uses `EnvFilter` directive syntax (`info`,
/// `onboarding_backend=debug,tower_http=info`, ...). Fails if the directives
/// do not parse or a subscriber is already installed.
pub fn init_tracing(filter: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(filter)
        .map_err(|e| anyhow!("invalid log filter `{}`: {}", filter, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}
