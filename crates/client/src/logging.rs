//! Logging setup.
//!
//! Logs go to stderr so stdout carries only the ladder report. `RUST_LOG`
//! overrides the default `info` level (`RUST_LOG=tower_core=debug` narrates
//! every attack).

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber.
///
/// With `log_file` set, a second layer writes to `tower.log` in the platform
/// log directory. Keep the returned guard alive until exit so buffered lines
/// are flushed.
pub fn setup_logging(log_file: bool) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = if log_file {
        let log_dir = crate::dirs::log_dir();
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let file_appender = tracing_appender::rolling::never(&log_dir, "tower.log");
        let (writer, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if log_file {
        tracing::info!("Log file: {}/tower.log", crate::dirs::log_dir().display());
    }
    Ok(guard)
}
