//! File logging for the terminal frontend.
//!
//! Terminal output belongs to the user interface, so logs only go to a
//! per-session file.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE: &str = "client.log";

/// Platform log directory, or `override_dir` when given.
///
/// - macOS: `~/Library/Caches/kami-gallery/logs`
/// - Linux: `~/.cache/kami-gallery/logs` (or `$XDG_CACHE_HOME/kami-gallery/logs`)
/// - Windows: `%LOCALAPPDATA%\kami-gallery\logs`
/// - Fallback: `/tmp/kami-gallery/logs`
pub fn log_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    directories::ProjectDirs::from("", "", "kami-gallery")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/kami-gallery"))
        .join("logs")
}

/// Given session ID, or one derived from the current time.
pub fn session_id(session_id: Option<&str>) -> String {
    match session_id {
        Some(id) if !id.trim().is_empty() => id.trim().to_owned(),
        _ => {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default();
            format!("session_{timestamp}")
        }
    }
}

/// Installs the global subscriber writing to `<log dir>/<session>/client.log`.
///
/// The filter comes from `RUST_LOG` with `info` as the floor. Keep the
/// returned guard alive for as long as logs should be flushed.
pub fn setup_logging(session: Option<&str>, override_dir: Option<&Path>) -> Result<WorkerGuard> {
    let session = session_id(session);
    let session_log_dir = log_dir(override_dir).join(&session);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!(
            "Failed to create log directory {}",
            session_log_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(session = %session, "logging initialized");
    tracing::info!("Log file: {}/{LOG_FILE}", session_log_dir.display());

    Ok(guard)
}
