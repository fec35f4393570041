use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

/// Environment variable naming the log file; overrides `logging.file`.
pub const LOG_ENV_VAR: &str = "FEEDVIEW_LOG";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("failed to create log file {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Initialize file logging from the `[logging]` settings.
///
/// `FEEDVIEW_LOG` replaces `settings.file` and `RUST_LOG` replaces
/// `settings.filter`. Returns the path of the created log file, or `None`
/// when no file is configured.
///
/// Log files get a `{path}.{timestamp}.{pid}` suffix so that concurrent runs
/// do not clobber each other.
pub fn init_tracing(settings: &LoggingSettings) -> Result<Option<PathBuf>, LoggingError> {
    let Some(base) = log_base_path(settings, std::env::var(LOG_ENV_VAR).ok()) else {
        return Ok(None);
    };

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&settings.filter)?,
    };

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let path = unique_log_path(&base, timestamp, std::process::id());
    let file = create_log_file(&path)?;

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    // A subscriber may already be installed (e.g. in tests).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    tracing::info!(path = %path.display(), "Logging initialized");
    Ok(Some(path))
}

fn log_base_path(settings: &LoggingSettings, env_override: Option<String>) -> Option<PathBuf> {
    env_override
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| settings.file.clone())
}

fn build_filter(directives: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directives).map_err(|e| LoggingError::InvalidFilter {
        filter: directives.to_string(),
        message: e.to_string(),
    })
}

fn unique_log_path(base: &Path, timestamp: u64, pid: u32) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".{timestamp}.{pid}"));
    PathBuf::from(name)
}

fn create_log_file(path: &Path) -> Result<File, LoggingError> {
    File::create(path).map_err(|source| LoggingError::CreateFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(file: Option<&str>) -> LoggingSettings {
        LoggingSettings {
            file: file.map(PathBuf::from),
            ..LoggingSettings::default()
        }
    }

    #[test]
    fn test_env_override_wins_over_config() {
        let base = log_base_path(&settings(Some("/var/log/feed.log")), Some("/tmp/env.log".to_string()));
        assert_eq!(base, Some(PathBuf::from("/tmp/env.log")));
    }

    #[test]
    fn test_config_file_used_without_override() {
        let base = log_base_path(&settings(Some("/var/log/feed.log")), None);
        assert_eq!(base, Some(PathBuf::from("/var/log/feed.log")));
        assert_eq!(log_base_path(&settings(None), Some(" ".to_string())), None);
    }

    #[test]
    fn test_unique_log_path_suffix() {
        let path = unique_log_path(Path::new("/tmp/feedview.log"), 1714566600, 42);
        assert_eq!(path, PathBuf::from("/tmp/feedview.log.1714566600.42"));
    }

    #[test]
    fn test_invalid_filter_is_reported() {
        assert!(build_filter("feedview=debug").is_ok());
        assert!(matches!(
            build_filter("feedview=loudest"),
            Err(LoggingError::InvalidFilter { .. })
        ));
    }

    #[test]
    fn test_unwritable_log_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("feedview.log");
        let err = create_log_file(&path).unwrap_err();
        assert!(matches!(err, LoggingError::CreateFile { .. }));
        assert!(err.to_string().contains("missing"));
    }
}
