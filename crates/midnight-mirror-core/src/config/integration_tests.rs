//! Integration tests for configuration module

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::discovery::PROJECT_CONFIG_NAME;
use super::{ConfigDiscovery, ConfigManager};

#[test]
fn test_full_config_workflow() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.toml");

    fs::write(
        &config_file,
        r#"
resize = 42
image_extensions = ["png", "jpg", "jpeg"]
"#,
    )
    .unwrap();

    let config = ConfigManager::load(Some(&config_file)).unwrap();

    assert_eq!(config.resize_or_default(), 42);
    let images = config.image_extensions();
    assert!(images.is_image(Path::new("scan.jpeg")));
    assert!(!images.is_image(Path::new("anim.gif")));
}

#[test]
fn test_invalid_config_validation() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.toml");

    fs::write(&config_file, "resize = 0").unwrap();

    let result = ConfigManager::load(Some(&config_file));
    assert!(result.is_err());
}

#[test]
fn test_cli_config_overrides_project_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(PROJECT_CONFIG_NAME), "resize = 64").unwrap();
    let cli = tmp.path().join("cli.toml");
    fs::write(&cli, "resize = 8").unwrap();

    let files = ConfigDiscovery::discover_in(tmp.path(), Some(&cli));
    let config = ConfigManager::load_from(&files).unwrap();

    assert_eq!(config.resize, Some(8));
}

#[test]
fn test_config_rejects_extension_without_codec() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.toml");

    fs::write(&config_file, r#"image_extensions = ["png", "tiff"]"#).unwrap();

    let err = ConfigManager::load(Some(&config_file)).unwrap_err();
    assert!(err.to_string().contains("tiff"));
}
