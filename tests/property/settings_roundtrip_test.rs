//! Property-based tests for AppSettings persistence round-trip.
//!
//! Arbitrary valid settings are written through the settings engine and read
//! back by a fresh engine without data loss.

use proptest::prelude::*;
use tempfile::TempDir;

use qr_history::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use qr_history::types::qr::{ErrorCorrection, QrStyle};
use qr_history::types::settings::{
    AppSettings, NotificationSettings, OutputSettings, StorageSettings,
};

fn arb_error_correction() -> impl Strategy<Value = ErrorCorrection> {
    prop_oneof![
        Just(ErrorCorrection::L),
        Just(ErrorCorrection::M),
        Just(ErrorCorrection::Q),
        Just(ErrorCorrection::H),
    ]
}

fn arb_style() -> impl Strategy<Value = QrStyle> {
    ("#[0-9a-f]{6}", "#[0-9a-f]{6}", 64u32..2048, arb_error_correction()).prop_map(
        |(foreground, background, size, error_correction)| QrStyle {
            foreground,
            background,
            size,
            error_correction,
        },
    )
}

fn arb_settings() -> impl Strategy<Value = AppSettings> {
    (
        arb_style(),
        proptest::option::of("/[a-z]{1,10}/[a-z]{1,10}"),
        proptest::option::of(1024u64..100_000_000),
        proptest::option::of("/[a-z]{1,12}"),
        1u64..60,
    )
        .prop_map(|(qr, data_dir, quota_bytes, download_dir, display_seconds)| AppSettings {
            qr,
            storage: StorageSettings { data_dir, quota_bytes },
            output: OutputSettings { download_dir },
            notifications: NotificationSettings { display_seconds },
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn settings_survive_save_and_load(settings in arb_settings()) {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("settings.json").to_string_lossy().to_string();

        let json = serde_json::to_string_pretty(&settings).expect("settings serialize");
        std::fs::write(&path, json).expect("write settings file");

        let mut engine = SettingsEngine::new(Some(path));
        let loaded = engine.load().expect("load should succeed");
        prop_assert_eq!(loaded, settings);
    }

    #[test]
    fn set_value_persists_style(style in arb_style()) {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("settings.json").to_string_lossy().to_string();

        let mut engine = SettingsEngine::new(Some(path.clone()));
        engine.load().expect("defaults load");
        let value = serde_json::to_value(&style).expect("style serializes");
        engine.set_value("qr", value).expect("qr is a known key");

        let mut reread = SettingsEngine::new(Some(path));
        prop_assert_eq!(reread.load().expect("load should succeed").qr, style);
    }
}
