//! File-only tracing setup.
//!
//! Stdout belongs to the map and prompt, so log output goes to
//! `<cache dir>/logs/<session id>/client.log`.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Platform cache directory for logs, falling back to the temp dir.
pub fn log_root() -> PathBuf {
    ProjectDirs::from("", "", "realm")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("realm").join("logs"))
}

/// Configured id, or `session_<unix seconds>`.
pub fn resolve_session_id(configured: Option<&str>) -> String {
    match configured {
        Some(id) => id.to_string(),
        None => {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs();
            format!("session_{timestamp}")
        }
    }
}

/// Creates the per-session log directory under `root`.
pub fn session_log_dir(root: &Path, session_id: &str) -> Result<PathBuf> {
    let dir = root.join(session_id);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    Ok(dir)
}

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process or buffered lines are lost.
pub fn setup_logging(session_id: &str) -> Result<WorkerGuard> {
    let dir = session_log_dir(&log_root(), session_id)?;

    let file_appender = tracing_appender::rolling::never(&dir, "client.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("tracing subscriber already installed")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_session_id_wins() {
        assert_eq!(resolve_session_id(Some("duel")), "duel");
        assert!(resolve_session_id(None).starts_with("session_"));
    }

    #[test]
    fn session_dir_is_created() {
        let root = tempfile::tempdir().unwrap();
        let dir = session_log_dir(root.path(), "duel").unwrap();
        assert!(dir.is_dir());
        assert!(dir.ends_with("duel"));
    }
}
