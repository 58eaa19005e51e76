//! Optional tracing subscriber setup for hosts and tests.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter, falls back to `RUST_LOG`.
pub const LOG_ENV: &str = "PRIMVAR_BRIDGE_LOG";

/// Filter read from [`LOG_ENV`] or `RUST_LOG`, `None` when neither is set.
pub fn env_filter() -> Option<EnvFilter> {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .ok()
}

/// Install a global fmt subscriber writing to stdout, filtered by
/// [`LOG_ENV`] or `RUST_LOG`.
///
/// Returns false when the filter is unset or a subscriber is already installed.
pub fn init_tracing() -> bool {
    let Some(filter) = env_filter() else {
        return false;
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false));
    tracing::subscriber::set_global_default(subscriber).is_ok()
}
