//! Configuration loading.
//!
//! Settings live in `<config_dir>/feedview/config.toml`; a missing file
//! yields the defaults.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, FeedSettings, LoggingSettings, MockSettings, ViewerSettings};
