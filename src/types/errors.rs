use std::fmt;

// === UrlError ===

/// Errors raised while validating user-supplied links.
#[derive(Debug, Clone, PartialEq)]
pub enum UrlError {
    /// The text is not an absolute URL with a scheme and host.
    InvalidUrl(String),
}

impl fmt::Display for UrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlError::InvalidUrl(text) => write!(f, "Invalid URL: {}", text),
        }
    }
}

impl std::error::Error for UrlError {}

// === StorageError ===

/// Errors related to the key/value persistence backend.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    Io(String),
    /// The blob does not fit within the configured quota.
    QuotaExceeded { limit: u64, attempted: u64 },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "Storage I/O error: {}", msg),
            StorageError::QuotaExceeded { limit, attempted } => write!(
                f,
                "Storage quota exceeded: {} bytes requested, limit is {} bytes",
                attempted, limit
            ),
        }
    }
}

impl std::error::Error for StorageError {}

// === HistoryError ===

/// Errors related to QR history operations.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryError {
    /// Export or download was attempted with no entries.
    EmptyHistory,
    /// The display position does not exist.
    InvalidIndex(usize),
    /// The storage backend refused the write because it is full.
    StorageFull(String),
    /// Any other storage failure.
    Storage(String),
    /// Failed to serialize the history.
    Serialization(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::EmptyHistory => write!(f, "History is empty"),
            HistoryError::InvalidIndex(index) => write!(f, "Invalid history index: {}", index),
            HistoryError::StorageFull(msg) => write!(f, "History storage full: {}", msg),
            HistoryError::Storage(msg) => write!(f, "History storage error: {}", msg),
            HistoryError::Serialization(msg) => {
                write!(f, "History serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for HistoryError {}

impl From<StorageError> for HistoryError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::QuotaExceeded { .. } => HistoryError::StorageFull(err.to_string()),
            StorageError::Io(msg) => HistoryError::Storage(msg),
        }
    }
}

// === EncodeError ===

/// Errors related to rendering a QR symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// The provided color value is not a hex color.
    InvalidColor(String),
    /// The error correction level name is not one of L, M, Q, H.
    InvalidErrorCorrection(String),
    /// The requested image edge is zero or above the renderer limit.
    InvalidSize(u32),
    /// The payload does not fit in any QR version at the chosen level.
    DataTooLong(String),
    /// Rasterizing or PNG encoding failed.
    Image(String),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::InvalidColor(color) => write!(f, "Invalid color: {}", color),
            EncodeError::InvalidErrorCorrection(level) => {
                write!(f, "Invalid error correction level: {}", level)
            }
            EncodeError::InvalidSize(size) => write!(f, "Invalid QR size: {}", size),
            EncodeError::DataTooLong(msg) => write!(f, "QR data too long: {}", msg),
            EncodeError::Image(msg) => write!(f, "QR image error: {}", msg),
        }
    }
}

impl std::error::Error for EncodeError {}

// === DownloadError ===

/// Errors related to writing QR images and exports to disk.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadError {
    /// No QR code has been generated yet.
    NoCurrentQr,
    /// The stored image payload is not a base64 data URI.
    InvalidImageData(String),
    /// A file system error occurred.
    FileSystemError(String),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::NoCurrentQr => write!(f, "No QR code to download"),
            DownloadError::InvalidImageData(msg) => write!(f, "Invalid image data: {}", msg),
            DownloadError::FileSystemError(msg) => {
                write!(f, "Download file system error: {}", msg)
            }
        }
    }
}

impl std::error::Error for DownloadError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === AppError ===

/// Any failure surfaced by an `App` operation.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Url(UrlError),
    History(HistoryError),
    Encode(EncodeError),
    Download(DownloadError),
    Settings(SettingsError),
    Storage(StorageError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Url(e) => write!(f, "{}", e),
            AppError::History(e) => write!(f, "{}", e),
            AppError::Encode(e) => write!(f, "{}", e),
            AppError::Download(e) => write!(f, "{}", e),
            AppError::Settings(e) => write!(f, "{}", e),
            AppError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Url(e) => Some(e),
            AppError::History(e) => Some(e),
            AppError::Encode(e) => Some(e),
            AppError::Download(e) => Some(e),
            AppError::Settings(e) => Some(e),
            AppError::Storage(e) => Some(e),
        }
    }
}

impl From<UrlError> for AppError {
    fn from(err: UrlError) -> Self {
        AppError::Url(err)
    }
}

impl From<HistoryError> for AppError {
    fn from(err: HistoryError) -> Self {
        AppError::History(err)
    }
}

impl From<EncodeError> for AppError {
    fn from(err: EncodeError) -> Self {
        AppError::Encode(err)
    }
}

impl From<DownloadError> for AppError {
    fn from(err: DownloadError) -> Self {
        AppError::Download(err)
    }
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        AppError::Settings(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}
