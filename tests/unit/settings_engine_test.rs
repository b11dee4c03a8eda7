//! Unit tests for the Settings Engine: load, save, dot-notation updates and validation.

use rstest::rstest;
use serde_json::json;
use tempfile::TempDir;

use qr_history::services::qr_encoder::MAX_QR_SIZE;
use qr_history::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use qr_history::types::errors::SettingsError;
use qr_history::types::qr::ErrorCorrection;
use qr_history::types::settings::AppSettings;

fn setup() -> (SettingsEngine, TempDir, String) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let path = tmp.path().join("settings.json").to_string_lossy().to_string();
    let mut engine = SettingsEngine::new(Some(path.clone()));
    engine.load().expect("defaults load");
    (engine, tmp, path)
}

#[test]
fn test_load_defaults_when_no_file() {
    let (engine, _tmp, _path) = setup();
    assert_eq!(*engine.get_settings(), AppSettings::default());
}

#[test]
fn test_default_config_path_uses_platform() {
    let engine = SettingsEngine::new(None);
    let path = engine.get_config_path();
    assert!(path.ends_with("settings.json"));
    assert!(path.contains("qr-history"));
}

#[test]
fn test_set_value_persists_across_engines() {
    let (mut engine, _tmp, path) = setup();
    engine.set_value("qr.foreground", json!("#336699")).unwrap();

    let mut reread = SettingsEngine::new(Some(path));
    assert_eq!(reread.load().unwrap().qr.foreground, "#336699");
}

#[test]
fn test_set_value_dot_notation() {
    let (mut engine, _tmp, _path) = setup();

    engine.set_value("qr.error_correction", json!("M")).unwrap();
    assert_eq!(engine.get_settings().qr.error_correction, ErrorCorrection::M);

    engine.set_value("storage.quota_bytes", serde_json::Value::Null).unwrap();
    assert!(engine.get_settings().storage.quota_bytes.is_none());

    engine.set_value("notifications.display_seconds", json!(10)).unwrap();
    assert_eq!(engine.get_settings().notifications.display_seconds, 10);

    engine.set_value("output.download_dir", json!("/tmp/qr")).unwrap();
    assert_eq!(engine.get_settings().output.download_dir.as_deref(), Some("/tmp/qr"));
}

#[rstest]
#[case("nonexistent.key")]
#[case("qr.nope")]
#[case("qr.size.inner")]
#[case("")]
fn test_unknown_keys_are_rejected(#[case] key: &str) {
    let (mut engine, _tmp, _path) = setup();
    assert!(matches!(
        engine.set_value(key, json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
}

#[rstest]
#[case("qr.foreground", json!("not-a-color"))]
#[case("qr.background", json!("#12"))]
#[case("qr.size", json!(0))]
#[case("qr.size", json!(MAX_QR_SIZE + 1))]
#[case("qr.size", json!("big"))]
#[case("qr.error_correction", json!("Z"))]
#[case("notifications.display_seconds", json!(0))]
#[case("storage.quota_bytes", json!(0))]
fn test_invalid_values_are_rejected_and_not_saved(#[case] key: &str, #[case] value: serde_json::Value) {
    let (mut engine, _tmp, path) = setup();

    let result = engine.set_value(key, value);
    assert!(matches!(result, Err(SettingsError::InvalidValue(_))), "{:?}", result);
    assert_eq!(*engine.get_settings(), AppSettings::default());
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_reset_restores_defaults() {
    let (mut engine, _tmp, _path) = setup();
    engine.set_value("qr.size", json!(512)).unwrap();
    assert_eq!(engine.get_settings().qr.size, 512);

    engine.reset().unwrap();
    assert_eq!(*engine.get_settings(), AppSettings::default());
}

#[test]
fn test_load_malformed_json() {
    let (_engine, _tmp, path) = setup();
    std::fs::write(&path, "{ invalid json }").unwrap();

    let mut engine = SettingsEngine::new(Some(path));
    assert!(matches!(engine.load(), Err(SettingsError::SerializationError(_))));
}

#[test]
fn test_load_rejects_file_with_invalid_values() {
    let (_engine, _tmp, path) = setup();
    let mut settings = AppSettings::default();
    settings.qr.foreground = "blue".to_string();
    std::fs::write(&path, serde_json::to_string(&settings).unwrap()).unwrap();

    let mut engine = SettingsEngine::new(Some(path));
    assert!(matches!(engine.load(), Err(SettingsError::InvalidValue(_))));
}

#[test]
fn test_default_settings_values() {
    let defaults = AppSettings::default();
    assert_eq!(defaults.qr.foreground, "#000000");
    assert_eq!(defaults.qr.background, "#ffffff");
    assert_eq!(defaults.qr.size, 256);
    assert_eq!(defaults.qr.error_correction, ErrorCorrection::H);
    assert!(defaults.storage.data_dir.is_none());
    assert_eq!(defaults.storage.quota_bytes, Some(5 * 1024 * 1024));
    assert!(defaults.output.download_dir.is_none());
    assert_eq!(defaults.notifications.display_seconds, 3);
}
