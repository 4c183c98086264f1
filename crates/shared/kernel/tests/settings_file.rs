use keel_kernel::config::{ConfigError, load_settings_from, validate};
use keel_kernel::domain::config::Environment;
use std::collections::HashMap;

fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("keel.toml");
    std::fs::write(&path, contents).expect("write config");
    (dir, path)
}

#[test]
fn file_values_are_loaded() {
    let (_dir, path) = write_config(
        r#"
app_name = "Inventory"
environment = "production"
enable_storage = true
storage_type = "s3"
aws_s3_bucket = "inventory-files"
cors_origins = "https://inventory.example"
"#,
    );

    let settings = load_settings_from(HashMap::new(), Some(&path)).expect("settings");
    assert_eq!(settings.app_name, "Inventory");
    assert_eq!(settings.environment, Environment::Production);
    assert_eq!(settings.aws_s3_bucket.as_deref(), Some("inventory-files"));
    assert_eq!(settings.cors_origins, vec!["https://inventory.example"]);
    assert!(validate(&settings).is_ok());
}

#[test]
fn debug_in_production_file_fails_validation() {
    let (_dir, path) = write_config("environment = \"production\"\ndebug = true\n");

    let settings = load_settings_from(HashMap::new(), Some(&path)).expect("settings parse");
    let err = validate(&settings).unwrap_err();
    assert!(matches!(err, ConfigError::UnsafeConfiguration { .. }));
}

#[test]
fn environment_can_switch_off_debug() {
    let (_dir, path) = write_config("environment = \"production\"\ndebug = true\n");
    let vars = HashMap::from([("DEBUG".to_owned(), "false".to_owned())]);

    let settings = load_settings_from(vars, Some(&path)).expect("settings parse");
    assert!(validate(&settings).is_ok());
}

#[test]
fn invalid_environment_name_fails_to_parse() {
    let vars = HashMap::from([("ENVIRONMENT".to_owned(), "qa".to_owned())]);
    assert!(load_settings_from(vars, None::<&str>).is_err());
}
