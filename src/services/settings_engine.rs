//! Settings Engine for qr-history.
//!
//! Persists [`AppSettings`] as pretty JSON at the platform config path.
//! Every write goes through [`validate_settings`], so a stored file always
//! holds a style the encoder can render and a usable notification timeout.

use std::fs;
use std::io::ErrorKind;

use serde_json::Value;
use tracing::{info, warn};

use crate::platform;
use crate::services::qr_encoder::validate_style;
use crate::types::errors::SettingsError;
use crate::types::settings::AppSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<AppSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &AppSettings;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Rejects settings the rest of the app cannot act on.
pub fn validate_settings(settings: &AppSettings) -> Result<(), SettingsError> {
    validate_style(&settings.qr).map_err(|e| SettingsError::InvalidValue(format!("qr: {}", e)))?;

    if settings.notifications.display_seconds == 0 {
        return Err(SettingsError::InvalidValue(
            "notifications.display_seconds must be at least 1".to_string(),
        ));
    }
    if settings.storage.quota_bytes == Some(0) {
        return Err(SettingsError::InvalidValue(
            "storage.quota_bytes must be positive or null".to_string(),
        ));
    }
    Ok(())
}

/// Splits `qr.size` into the JSON pointer of its parent object (`/qr`) and
/// the field name (`size`).
fn split_key(key: &str) -> Result<(String, &str), SettingsError> {
    let well_formed = !key.is_empty()
        && key
            .split('.')
            .all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    if !well_formed {
        return Err(SettingsError::InvalidKey(format!("Malformed key '{}'", key)));
    }

    Ok(match key.rsplit_once('.') {
        Some((parent, field)) => (format!("/{}", parent.replace('.', "/")), field),
        None => (String::new(), key),
    })
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: AppSettings,
}

impl SettingsEngine {
    /// Uses `path_override` when given, else `<config_dir>/settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: AppSettings::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads the config file, falling back to defaults when it does not exist.
    ///
    /// A file that does not parse is a `SerializationError`; one that parses
    /// but fails validation is an `InvalidValue`.
    fn load(&mut self) -> Result<AppSettings, SettingsError> {
        let content = match fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.settings = AppSettings::default();
                return Ok(self.settings.clone());
            }
            Err(e) => {
                return Err(SettingsError::IoError(format!(
                    "Failed to read {}: {}",
                    self.config_path, e
                )))
            }
        };

        let settings: AppSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse {}: {}", self.config_path, e))
        })?;
        if let Err(e) = validate_settings(&settings) {
            warn!(path = %self.config_path, error = %e, "settings file rejected");
            return Err(e);
        }

        info!(path = %self.config_path, "settings loaded");
        self.settings = settings;
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        let path = std::path::Path::new(&self.config_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write {}: {}", self.config_path, e)))
    }

    fn get_settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Replaces one field addressed in dot notation (`qr.foreground`,
    /// `notifications.display_seconds`) and saves.
    ///
    /// The key must already exist. The result must deserialize and pass
    /// [`validate_settings`]; otherwise the current settings are kept.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let (parent, field) = split_key(key)?;

        let mut tree = serde_json::to_value(&self.settings)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        let slot = tree
            .pointer_mut(&parent)
            .and_then(Value::as_object_mut)
            .filter(|map| map.contains_key(field))
            .ok_or_else(|| SettingsError::InvalidKey(format!("Key '{}' not found in settings", key)))?;
        slot.insert(field.to_string(), value);

        let next: AppSettings = serde_json::from_value(tree).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        validate_settings(&next)?;

        self.settings = next;
        self.save()?;
        info!(key, "setting updated");
        Ok(())
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = AppSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
