mod common;

use std::fs;

use feedview::config::{Config, ConfigError};
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

#[test]
fn load_full_config() {
    let (_dir, path) = write_config(
        r#"[feed]
page_size = 25

[viewer]
id = "u42"
name = "Ada"
handle = "ada"
avatar = "https://example.com/ada.png"

[mock]
items = 100
seed = 7
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.feed.page_size, 25);
    assert_eq!(config.viewer.id, "u42");
    assert_eq!(config.viewer.to_author().avatar.as_deref(), Some("https://example.com/ada.png"));
    assert_eq!(config.mock.items, 100);
    assert_eq!(config.mock.seed, Some(7));
}

#[test]
fn empty_file_gives_defaults() {
    let (_dir, path) = write_config("");
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn zero_page_size_fails_validation() {
    let (_dir, path) = write_config("[feed]\npage_size = 0\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn malformed_toml_is_parse_error() {
    let (_dir, path) = write_config("[feed\npage_size = ");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let result = Config::load_from(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}
