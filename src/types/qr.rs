use serde::{Deserialize, Serialize};

use super::errors::EncodeError;

/// Rendering options for a QR symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QrStyle {
    /// Dark module color as `#rrggbb` or `#rgb`.
    pub foreground: String,
    /// Light module color as `#rrggbb` or `#rgb`.
    pub background: String,
    /// Minimum edge length of the rendered image in pixels.
    pub size: u32,
    pub error_correction: ErrorCorrection,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            foreground: "#000000".to_string(),
            background: "#ffffff".to_string(),
            size: 256,
            error_correction: ErrorCorrection::H,
        }
    }
}

/// QR error correction level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    H,
}

/// The QR code currently on display: the link it encodes and its image payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedQr {
    pub link: String,
    pub image_data: String,
}

impl std::str::FromStr for ErrorCorrection {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(ErrorCorrection::L),
            "M" => Ok(ErrorCorrection::M),
            "Q" => Ok(ErrorCorrection::Q),
            "H" => Ok(ErrorCorrection::H),
            _ => Err(EncodeError::InvalidErrorCorrection(s.to_string())),
        }
    }
}
