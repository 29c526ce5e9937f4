use financial_entities::{Config, ConfigManager, RemovalStamp};
use tempfile::tempdir;

#[test]
fn default_config_has_sane_values() {
    let cfg = Config::default();

    assert_eq!(cfg.log_filter, "financial_entities=info");
    assert_eq!(cfg.removal_stamp, RemovalStamp::Always);
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    assert_eq!(manager.load().expect("load config"), Config::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("nested").join("config.json"));
    let cfg = Config {
        log_filter: "financial_entities=debug".to_string(),
        removal_stamp: RemovalStamp::OnChange,
    };

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!dir.path().join("nested").join("config.json.tmp").exists());
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "removal_stamp": "on_change" }"#).expect("write config");

    let loaded = ConfigManager::new(path).load().expect("load config");

    assert_eq!(loaded.removal_stamp, RemovalStamp::OnChange);
    assert_eq!(loaded.log_filter, Config::default_log_filter());
}

#[test]
fn malformed_file_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json").expect("write config");

    let err = ConfigManager::new(path).load().unwrap_err();

    assert!(matches!(err, financial_entities::ConfigError::Serde(_)));
}

#[test]
fn default_location_points_at_json_file() {
    if let Some(manager) = ConfigManager::default_location() {
        let path = manager.config_path();
        assert!(path.ends_with("financial-entities/config.json"));
    }
}
