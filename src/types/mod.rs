//! qr-history shared type definitions
//! Each submodule defines types used across the application.

pub mod errors;
pub mod history;
pub mod notification;
pub mod qr;
pub mod settings;
