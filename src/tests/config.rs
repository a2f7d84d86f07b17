use crate::config::Config;
use crate::errors::AppError;
use crate::keywords::SortBy;
use crate::storage::{BackendLocal, StorageManager};

fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Fresh start: defaults written to config.yaml
#[test]
fn test_creates_default_config() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();

    let config = Config::load_with(base_path).unwrap();

    assert!(store.exists("config.yaml"));
    assert_eq!(config.provider.base_url, "https://api.dataforseo.com/v3");
    assert_eq!(config.provider.location, "United States");
    assert_eq!(config.provider.default_limit, 50);
    assert_eq!(config.relevance.default_threshold.value(), 60.0);
    assert_eq!(config.relevance.default_sort, SortBy::Relevance);
    assert_eq!(config.web.listen, "0.0.0.0:5001");
}

/// Partial file: missing fields filled in and written back
#[test]
fn test_resaves_missing_fields() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();

    let config_content = r#"
relevance:
  default_threshold: 75
  default_sort: volume
"#;
    store.write("config.yaml", config_content.as_bytes()).unwrap();

    let config = Config::load_with(base_path).unwrap();
    assert_eq!(config.relevance.default_threshold.value(), 75.0);
    assert_eq!(config.relevance.default_sort, SortBy::Volume);

    let saved = String::from_utf8(store.read("config.yaml").unwrap()).unwrap();
    let saved: serde_yml::Value = serde_yml::from_str(&saved).unwrap();
    assert_eq!(saved["web"]["listen"].as_str(), Some("0.0.0.0:5001"));
    assert_eq!(saved["relevance"]["default_threshold"].as_u64(), Some(75));
}

/// Save → reload keeps edits
#[test]
fn test_save_roundtrip() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();

    let mut config = Config::load_with(base_path).unwrap();
    config.provider.location = "United Kingdom".to_string();
    config.web.listen = "127.0.0.1:8080".to_string();
    config.save().unwrap();

    let reloaded = Config::load_with(base_path).unwrap();
    assert_eq!(reloaded.provider.location, "United Kingdom");
    assert_eq!(reloaded.web.listen, "127.0.0.1:8080");
}

#[test]
fn test_rejects_invalid_threshold() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();

    store
        .write("config.yaml", b"relevance:\n  default_threshold: 50\n")
        .unwrap();

    assert!(matches!(Config::load_with(base_path), Err(AppError::Yaml(_))));
}

#[test]
fn test_validate() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.provider.base_url = "ftp://api.dataforseo.com".to_string();
    assert!(matches!(config.validate(), Err(AppError::Configuration(_))));

    let mut config = Config::default();
    config.provider.default_limit = 0;
    assert!(matches!(config.validate(), Err(AppError::Configuration(_))));

    let mut config = Config::default();
    config.provider.language = " ".to_string();
    assert!(matches!(config.validate(), Err(AppError::Configuration(_))));

    let mut config = Config::default();
    config.web.listen = "localhost".to_string();
    assert!(matches!(config.validate(), Err(AppError::Configuration(_))));
}
