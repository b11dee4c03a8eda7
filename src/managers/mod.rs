//! qr-history state managers
//! Managers handle stateful operations: the QR history and file downloads.

pub mod download_manager;
pub mod history_store;
