//! qr-history services
//! Stateless or self-contained components used by the App core.

pub mod history_presenter;
pub mod notifier;
pub mod qr_encoder;
pub mod settings_engine;
pub mod url_validator;
