//! Shared helpers for integration tests.

use std::sync::Once;
use tracing_subscriber::prelude::*;
use tracing_subscriber::fmt;

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per test binary (set `RUST_LOG` to see output).
pub fn init_logging() {
    INIT.call_once(|| {
        if let Some(filter) = primvar_bridge::util::env_filter() {
            let subscriber = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_test_writer().with_target(false));
            let _ = tracing::subscriber::set_global_default(subscriber);
        }
    });
}
