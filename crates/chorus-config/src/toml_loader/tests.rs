//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::OverflowPolicy;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_chorus_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, chorus_common::ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[cache]
capacity = 3
overflow = "reject"

[[webapps]]
id = "jupyter"
name = "JupyterLab"
url = "https://jupyter.example.org/lab"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.cache.capacity, 3);
    assert_eq!(config.cache.overflow, OverflowPolicy::Reject);
    assert_eq!(config.webapps.len(), 1);
    // Defaults preserved
    assert_eq!(config.readiness.timeout_secs, 120);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, chorus_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_returns_parsed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[cache]
capacity = 500
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.cache.capacity, 500);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chorus").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config, crate::schema::ChorusConfig::default());
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::ChorusConfig;

    let config: ChorusConfig = toml::from_str(default_config_toml()).unwrap();
    assert_eq!(config.cache.capacity, 5);
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("chorus"));
        assert!(path_str.ends_with("config.toml"));
    }
}
