//! QR Encoder: renders a link into a PNG data URI.
//!
//! The history only ever stores the returned string; anything implementing
//! [`QrEncoderTrait`] can stand in for [`PngQrEncoder`].

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{ImageFormat, Rgba};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

use crate::types::errors::EncodeError;
use crate::types::qr::{ErrorCorrection, QrStyle};

/// Largest accepted image edge in pixels. The renderer overflows well beyond it.
pub const MAX_QR_SIZE: u32 = 4096;

/// Converts text into an encoded image payload.
pub trait QrEncoderTrait: Send {
    fn encode(&self, text: &str, style: &QrStyle) -> Result<String, EncodeError>;
}

/// Encoder producing `data:image/png;base64,...` strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngQrEncoder;

impl PngQrEncoder {
    pub fn new() -> Self {
        Self
    }
}

/// Validates a hex color string (e.g. "#2ea44f" or "#fff").
fn is_valid_hex_color(color: &str) -> bool {
    if !color.starts_with('#') {
        return false;
    }
    let hex = &color[1..];
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Parses `#rgb` / `#rrggbb` into an opaque RGBA pixel.
pub fn parse_hex_color(color: &str) -> Result<Rgba<u8>, EncodeError> {
    if !is_valid_hex_color(color) {
        return Err(EncodeError::InvalidColor(color.to_string()));
    }

    let hex = &color[1..];
    let expanded: String = if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };

    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .map_err(|_| EncodeError::InvalidColor(color.to_string()))
    };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, u8::MAX]))
}

/// Checks colors and size before anything is rendered or persisted.
pub fn validate_style(style: &QrStyle) -> Result<(), EncodeError> {
    parse_hex_color(&style.foreground)?;
    parse_hex_color(&style.background)?;
    if style.size == 0 || style.size > MAX_QR_SIZE {
        return Err(EncodeError::InvalidSize(style.size));
    }
    Ok(())
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::L => EcLevel::L,
        ErrorCorrection::M => EcLevel::M,
        ErrorCorrection::Q => EcLevel::Q,
        ErrorCorrection::H => EcLevel::H,
    }
}

impl QrEncoderTrait for PngQrEncoder {
    fn encode(&self, text: &str, style: &QrStyle) -> Result<String, EncodeError> {
        validate_style(style)?;
        let dark = parse_hex_color(&style.foreground)?;
        let light = parse_hex_color(&style.background)?;

        let code = QrCode::with_error_correction_level(text.as_bytes(), ec_level(style.error_correction))
            .map_err(|e| match e {
                QrError::DataTooLong => EncodeError::DataTooLong(format!("{} bytes", text.len())),
                other => EncodeError::Image(other.to_string()),
            })?;

        let image = code
            .render::<Rgba<u8>>()
            .dark_color(dark)
            .light_color(light)
            .min_dimensions(style.size, style.size)
            .build();

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| EncodeError::Image(e.to_string()))?;

        Ok(format!("data:image/png;base64,{}", BASE64.encode(&png)))
    }
}
