use serde::{Deserialize, Serialize};

use super::qr::QrStyle;

/// Default storage quota, matching the common 5 MiB browser local storage limit.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Top-level application settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppSettings {
    pub qr: QrStyle,
    pub storage: StorageSettings,
    pub output: OutputSettings,
    pub notifications: NotificationSettings,
}

/// Where and how the history blob is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    /// Overrides the platform data directory when set.
    pub data_dir: Option<String>,
    /// Maximum size of a single stored blob; `None` disables the limit.
    pub quota_bytes: Option<u64>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
        }
    }
}

/// Destination for downloaded images and exported history files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OutputSettings {
    /// Falls back to the current directory when unset.
    pub download_dir: Option<String>,
}

/// Notification display behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationSettings {
    pub display_seconds: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { display_seconds: 3 }
    }
}
