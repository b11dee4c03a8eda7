//! App Core for qr-history.
//!
//! Owns the history store, the QR currently on display, the encoder, the
//! notifier and the settings. Every user action is a method here, and each
//! one reports its outcome through the notifier.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use tracing::info;

use crate::managers::download_manager::{DownloadManager, DownloadManagerTrait};
use crate::managers::history_store::{HistoryStore, HistoryStoreTrait};
use crate::platform;
use crate::services::history_presenter::{self, Confirmation, HistoryView, CLEAR_PROMPT};
use crate::services::notifier::Notifier;
use crate::services::qr_encoder::{PngQrEncoder, QrEncoderTrait};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::url_validator::parse_link;
use crate::storage::{FileStorage, Storage};
use crate::types::errors::{AppError, DownloadError, HistoryError};
use crate::types::history::HistoryEntry;
use crate::types::qr::{GeneratedQr, QrStyle};

pub const MSG_GENERATED: &str = "QR generated successfully!";
pub const MSG_DOWNLOADED: &str = "QR downloaded successfully!";
pub const MSG_DOWNLOADED_FROM_HISTORY: &str = "QR downloaded from history!";
pub const MSG_REMOVED: &str = "Entry removed from history";
pub const MSG_CLEARED: &str = "History cleared completely";
pub const MSG_EXPORTED: &str = "History exported as JSON";
pub const MSG_INVALID_URL: &str = "Please enter a valid link (e.g. https://example.com)";
pub const MSG_NO_QR: &str = "There is no QR code to download";
pub const MSG_EMPTY_HISTORY: &str = "There is no history to export";
pub const MSG_STORAGE_FULL: &str = "History storage is full";

/// The message the notifier shows for a failed action.
pub fn user_message(err: &AppError) -> String {
    match err {
        AppError::Url(_) => MSG_INVALID_URL.to_string(),
        AppError::Download(DownloadError::NoCurrentQr) => MSG_NO_QR.to_string(),
        AppError::History(HistoryError::EmptyHistory) => MSG_EMPTY_HISTORY.to_string(),
        AppError::History(HistoryError::StorageFull(_)) => MSG_STORAGE_FULL.to_string(),
        other => other.to_string(),
    }
}

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub history: HistoryStore,
    pub notifier: Notifier,
    encoder: Box<dyn QrEncoderTrait>,
    current_qr: Option<GeneratedQr>,
}

impl App {
    /// Assembles an App from its parts and restores the last generated QR, if any.
    pub fn new(
        settings_engine: SettingsEngine,
        storage: Box<dyn Storage>,
        encoder: Box<dyn QrEncoderTrait>,
    ) -> Self {
        let display = settings_engine.get_settings().notifications.display_seconds;
        let history = HistoryStore::new(storage);
        let current_qr = history.last().map(|entry| GeneratedQr {
            link: entry.link.clone(),
            image_data: entry.image_data.clone(),
        });

        Self {
            settings_engine,
            history,
            notifier: Notifier::new(Duration::from_secs(display)),
            encoder,
            current_qr,
        }
    }

    /// Opens the on-disk App: loads settings from `config_path` (or the platform
    /// default) and stores history under `data_dir`, the configured directory,
    /// or the platform data directory, in that order.
    pub fn open(data_dir: Option<&Path>, config_path: Option<String>) -> Result<Self, AppError> {
        let mut settings_engine = SettingsEngine::new(config_path);
        let settings = settings_engine.load()?;

        let dir = data_dir
            .map(Path::to_path_buf)
            .or_else(|| settings.storage.data_dir.as_ref().map(PathBuf::from))
            .unwrap_or_else(platform::get_data_dir);
        info!(data_dir = %dir.display(), "opening history");

        let storage = FileStorage::new(dir, settings.storage.quota_bytes);
        Ok(Self::new(
            settings_engine,
            Box::new(storage),
            Box::new(PngQrEncoder::new()),
        ))
    }

    /// Updates one setting by dot-notation key and applies it to the running App.
    ///
    /// The notification timeout and the storage quota take effect immediately.
    /// A new `storage.data_dir` is only read by the next [`App::open`].
    pub fn set_setting(&mut self, key: &str, value: Value) -> Result<(), AppError> {
        let before = self.settings_engine.get_settings().clone();
        self.settings_engine.set_value(key, value)?;
        let after = self.settings_engine.get_settings();

        if after.notifications.display_seconds != before.notifications.display_seconds {
            self.notifier
                .set_display_duration(Duration::from_secs(after.notifications.display_seconds));
        }
        if after.storage.quota_bytes != before.storage.quota_bytes {
            self.history.set_quota(after.storage.quota_bytes);
        }
        if after.storage.data_dir != before.storage.data_dir {
            info!("data directory change will apply on next start");
        }
        Ok(())
    }

    /// The QR code currently on display.
    pub fn current_qr(&self) -> Option<&GeneratedQr> {
        self.current_qr.as_ref()
    }

    /// Validates, encodes and records `link` with the configured style.
    pub fn generate(&mut self, link: &str) -> Result<GeneratedQr, AppError> {
        let style = self.settings_engine.get_settings().qr.clone();
        self.generate_with_style(link, &style)
    }

    /// Validates, encodes and records `link` with an explicit style.
    ///
    /// An invalid link leaves both the current QR and the history untouched.
    /// If only the history write fails, the QR still becomes current.
    pub fn generate_with_style(&mut self, link: &str, style: &QrStyle) -> Result<GeneratedQr, AppError> {
        let result = self.try_generate(link.trim(), style);
        self.report(result, MSG_GENERATED)
    }

    fn try_generate(&mut self, link: &str, style: &QrStyle) -> Result<GeneratedQr, AppError> {
        parse_link(link)?;
        let image_data = self.encoder.encode(link, style)?;

        let qr = GeneratedQr {
            link: link.to_string(),
            image_data,
        };
        self.current_qr = Some(qr.clone());
        self.history.append(&qr.link, &qr.image_data)?;
        Ok(qr)
    }

    /// Writes the current QR as a PNG into `dir` (or the configured download directory).
    pub fn download_current(&mut self, dir: Option<&Path>) -> Result<PathBuf, AppError> {
        let result = match self.current_qr.clone() {
            Some(qr) => self
                .downloads(dir)
                .save_qr(&qr.link, &qr.image_data)
                .map_err(AppError::from),
            None => Err(DownloadError::NoCurrentQr.into()),
        };
        self.report(result, MSG_DOWNLOADED)
    }

    /// Writes the QR shown at display position `index` as a PNG.
    pub fn download_from_history(&mut self, index: usize, dir: Option<&Path>) -> Result<PathBuf, AppError> {
        let result = match self.history.list().get(index) {
            Some(entry) => self
                .downloads(dir)
                .save_qr(&entry.link, &entry.image_data)
                .map_err(AppError::from),
            None if self.history.is_empty() => Err(HistoryError::EmptyHistory.into()),
            None => Err(HistoryError::InvalidIndex(index).into()),
        };
        self.report(result, MSG_DOWNLOADED_FROM_HISTORY)
    }

    /// Removes the entry at display position `index`.
    pub fn remove_from_history(&mut self, index: usize) -> Result<HistoryEntry, AppError> {
        let result = self.history.remove_at(index).map_err(AppError::from);
        self.report(result, MSG_REMOVED)
    }

    /// Clears the history once `confirmation` agrees. Returns false when declined.
    pub fn clear_history(&mut self, confirmation: &dyn Confirmation) -> Result<bool, AppError> {
        if !confirmation.confirm(CLEAR_PROMPT) {
            info!("history clear declined");
            return Ok(false);
        }
        let result = self.history.clear().map(|_| true).map_err(AppError::from);
        self.report(result, MSG_CLEARED)
    }

    /// Writes the exported history JSON into `dir` (or the configured download directory).
    pub fn export_history(&mut self, dir: Option<&Path>) -> Result<PathBuf, AppError> {
        let result = self
            .history
            .export()
            .map_err(AppError::from)
            .and_then(|json| self.downloads(dir).save_export(&json).map_err(AppError::from));
        self.report(result, MSG_EXPORTED)
    }

    /// Snapshot of the history for display.
    pub fn history_view(&self) -> HistoryView {
        history_presenter::present(&self.history)
    }

    fn downloads(&self, dir: Option<&Path>) -> DownloadManager {
        let dir = dir
            .map(Path::to_path_buf)
            .or_else(|| {
                self.settings_engine
                    .get_settings()
                    .output
                    .download_dir
                    .as_ref()
                    .map(PathBuf::from)
            })
            .unwrap_or_else(platform::get_download_dir);
        DownloadManager::new(dir)
    }

    /// Posts a success or error notification for `result` and hands it back.
    fn report<T>(&mut self, result: Result<T, AppError>, success: &str) -> Result<T, AppError> {
        match &result {
            Ok(_) => {
                self.notifier.success(success);
            }
            Err(e) => {
                self.notifier.error(&user_message(e));
            }
        }
        result
    }
}
