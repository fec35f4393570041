use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::feed::DEFAULT_PAGE_SIZE;
use crate::model::Author;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub viewer: ViewerSettings,
    #[serde(default)]
    pub mock: MockSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Pagination settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedSettings {
    /// Items per page (default: 10). Must be positive.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Identity used as the author of items created by this viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    #[serde(default = "default_viewer_id")]
    pub id: String,
    #[serde(default = "default_viewer_name")]
    pub name: String,
    #[serde(default = "default_viewer_handle")]
    pub handle: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Sample data for the in-memory repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockSettings {
    /// Number of generated items (default: 20).
    #[serde(default = "default_mock_items")]
    pub items: usize,
    /// Fixed RNG seed; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Diagnostic log output. Stdout carries the rendered feed, so logs only go
/// to a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Base path of the log file; logging is off when absent.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// `EnvFilter` directives used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_viewer_id() -> String {
    "current_user".to_string()
}

fn default_viewer_name() -> String {
    "Current User".to_string()
}

fn default_viewer_handle() -> String {
    "currentuser".to_string()
}

fn default_mock_items() -> usize {
    20
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl ViewerSettings {
    pub fn to_author(&self) -> Author {
        Author {
            id: self.id.clone(),
            name: self.name.clone(),
            handle: self.handle.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            id: default_viewer_id(),
            name: default_viewer_name(),
            handle: default_viewer_handle(),
            avatar: None,
        }
    }
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            items: default_mock_items(),
            seed: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            filter: default_log_filter(),
        }
    }
}
