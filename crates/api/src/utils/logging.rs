use std::time::Duration;

use reelview_domain::ReelviewError;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Filter comes from `RUST_LOG` (default `info`). `REELVIEW_LOG_FORMAT=json`
/// switches to JSON lines. Calling it twice is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("REELVIEW_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let result = if json { builder.json().try_init() } else { builder.try_init() };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Log the outcome of a CLI command with structured fields.
///
/// `command` must not carry credentials.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&ReelviewError>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => warn!(command, duration_ms, error_type = err.label(), "command_execution_failure"),
    }
}
