// src/logging.rs
//! Application log macro and subscriber setup

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_LOG_PATH: &str = "/tmp/hire3x-console.log";

/// Level-tagged logging: `app_log!(info, "Loaded {} results", n)`.
#[macro_export]
macro_rules! app_log {
    (trace, $($arg:tt)+) => { ::tracing::trace!($($arg)+) };
    (debug, $($arg:tt)+) => { ::tracing::debug!($($arg)+) };
    (info, $($arg:tt)+) => { ::tracing::info!($($arg)+) };
    (warn, $($arg:tt)+) => { ::tracing::warn!($($arg)+) };
    (error, $($arg:tt)+) => { ::tracing::error!($($arg)+) };
}

/// Install the global subscriber: JSON lines into `log_path` (truncated on
/// startup), plus a compact stderr layer when `verbose` is set.
pub fn init(log_path: &Path, verbose: bool) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(Mutex::new(file))
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(stderr_layer)
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
