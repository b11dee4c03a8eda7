//! qr-history platform paths
//! Resolves per-user config and data directories through the `dirs` crate.
//!
//! - Linux:   $XDG_CONFIG_HOME/qr-history, $XDG_DATA_HOME/qr-history
//! - macOS:   ~/Library/Application Support/qr-history
//! - Windows: %APPDATA%\qr-history

use std::path::PathBuf;

/// Directory name appended to every platform base directory.
pub const APP_DIR_NAME: &str = "qr-history";

/// Returns the configuration directory, falling back to `./qr-history`.
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Returns the data directory holding the persisted history.
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Returns the default directory for downloads and exports.
pub fn get_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
