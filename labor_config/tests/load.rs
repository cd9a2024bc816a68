//! Config loading against real files.

use labor_config::{Config, ConfigError};

#[test]
fn test_missing_file_degrades_to_empty_registry() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("missing.json");

    let config = Config::load(Some(path.as_path())).expect("missing config should not fail");

    assert!(config.registry.trainers.is_empty());
    assert!(config.registry.company.domains.is_empty());
}

#[test]
fn test_malformed_file_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").expect("file should be written");

    let err = Config::load(Some(path.as_path())).expect_err("malformed config should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_create_config_writes_template_once() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("nested").join("config.json");

    let written = Config::create_config(Some(path.as_path())).expect("template should be written");
    assert_eq!(written, path);

    let config = Config::load(Some(path.as_path())).expect("template should load");
    assert_eq!(config.registry.internal_people.len(), 1);

    let err = Config::create_config(Some(path.as_path())).expect_err("existing config must not be overwritten");
    assert!(matches!(err, ConfigError::AlreadyExists(_)));
}
