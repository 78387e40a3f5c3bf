//! Tracing subscriber setup for the `fieldcrypt` binary.
//!
//! The library only emits events; installing a subscriber is left to the
//! application that embeds it.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter (e.g. `fieldcrypt=debug`).
pub const LOG_ENV: &str = "FIELDCRYPT_LOG";

/// Install a stderr subscriber filtered by `FIELDCRYPT_LOG`, or `default_level`.
///
/// Stdout stays clean for command output. Calling this twice is harmless.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
