//! Download Manager for qr-history.
//!
//! Writes QR images and exported history files into a download directory,
//! named after the link's domain and the current UTC date.

use std::fs;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::services::url_validator::display_domain;
use crate::types::errors::DownloadError;

/// Trait defining download operations.
pub trait DownloadManagerTrait {
    fn save_qr(&self, link: &str, image_data: &str) -> Result<PathBuf, DownloadError>;
    fn save_export(&self, json: &str) -> Result<PathBuf, DownloadError>;
    fn download_dir(&self) -> &Path;
}

/// `qr_<domain>_<YYYY-MM-DD>.png`. IPv6 hosts lose their brackets and have
/// `:` replaced so the name is valid on every platform.
pub fn qr_filename(link: &str, date: NaiveDate) -> String {
    format!("qr_{}_{}.png", filename_safe(&display_domain(link)), date.format("%Y-%m-%d"))
}

fn filename_safe(domain: &str) -> String {
    domain
        .trim_start_matches('[')
        .trim_end_matches(']')
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-') { c } else { '-' })
        .collect()
}

/// `qr_historial_<YYYY-MM-DD>.json`
pub fn export_filename(date: NaiveDate) -> String {
    format!("qr_historial_{}.json", date.format("%Y-%m-%d"))
}

/// Decodes a `data:<mime>;base64,<payload>` URI into raw bytes.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, DownloadError> {
    let (header, payload) = uri
        .split_once(',')
        .ok_or_else(|| DownloadError::InvalidImageData("missing ',' separator".to_string()))?;

    if !header.starts_with("data:") || !header.ends_with(";base64") {
        return Err(DownloadError::InvalidImageData(format!(
            "unsupported data URI header: {}",
            header
        )));
    }

    BASE64
        .decode(payload)
        .map_err(|e| DownloadError::InvalidImageData(format!("base64 decode error: {}", e)))
}

/// Download manager writing into a single directory.
pub struct DownloadManager {
    dir: PathBuf,
}

impl DownloadManager {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn write(&self, filename: &str, contents: &[u8]) -> Result<PathBuf, DownloadError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            DownloadError::FileSystemError(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        let path = self.dir.join(filename);
        fs::write(&path, contents).map_err(|e| {
            DownloadError::FileSystemError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), bytes = contents.len(), "file written");
        Ok(path)
    }
}

impl DownloadManagerTrait for DownloadManager {
    /// Decodes `image_data` and writes it as a PNG named after `link`.
    fn save_qr(&self, link: &str, image_data: &str) -> Result<PathBuf, DownloadError> {
        let bytes = decode_data_uri(image_data)?;
        self.write(&qr_filename(link, Self::today()), &bytes)
    }

    /// Writes an exported history document.
    fn save_export(&self, json: &str) -> Result<PathBuf, DownloadError> {
        self.write(&export_filename(Self::today()), json.as_bytes())
    }

    fn download_dir(&self) -> &Path {
        &self.dir
    }
}
