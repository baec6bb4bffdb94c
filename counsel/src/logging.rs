use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "counsel.log";

/// Sends tracing output to a daily-rotated file in `logs_dir`.
///
/// Stdout stays reserved for command output. Keep the guard alive until
/// exit; dropping it flushes buffered lines.
pub fn init_logging(logs_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    // RUST_LOG wins; otherwise our crates at info and dependencies at warn
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,counsel=info,counsel_api=info,counsel_auth=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_the_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs_dir = dir.path().join("nested").join("logs");

        let _guard = init_logging(&logs_dir).unwrap();
        tracing::info!("hello");

        assert!(logs_dir.is_dir());
    }
}
