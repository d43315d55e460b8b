//! QR encoding of rendered payloads.
//!
//! [`QrEncoder`] turns a payload string into a grayscale raster: dark modules
//! black on white, surrounded by a configurable quiet-zone border and
//! optionally resized to a fixed output size. The smallest symbol version
//! that fits the payload at the chosen error-correction level is used.
//!
//! ```rust,no_run
//! use payqr::qr::{ErrorCorrection, QrEncoder};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), payqr::core::PayqrError> {
//! let encoder = QrEncoder::new()
//!     .with_error_correction(ErrorCorrection::M)
//!     .with_fixed_size(Some((490, 490)));
//! encoder.encode_and_save("K:PR|V:01|C:1", Path::new("payment.png"))?;
//! # Ok(())
//! # }
//! ```

use crate::core::PayqrError;
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use qrcode::{Color, EcLevel, QrCode};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Default pixel size of one module.
pub const DEFAULT_MODULE_SIZE: u32 = 10;

/// Default quiet-zone width in modules.
pub const DEFAULT_BORDER: u32 = 4;

/// Largest image side, in pixels, the encoder will produce.
pub const MAX_IMAGE_SIDE: u32 = 16384;

/// QR error-correction level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ErrorCorrection {
    /// About 7% recovery
    #[default]
    L,
    /// About 15% recovery
    M,
    /// About 25% recovery
    Q,
    /// About 30% recovery
    H,
}

impl ErrorCorrection {
    const fn ec_level(self) -> EcLevel {
        match self {
            Self::L => EcLevel::L,
            Self::M => EcLevel::M,
            Self::Q => EcLevel::Q,
            Self::H => EcLevel::H,
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = PayqrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            _ => Err(PayqrError::ConfigError {
                message: format!("unknown error correction level '{s}' (expected L, M, Q or H)"),
            }),
        }
    }
}

impl TryFrom<String> for ErrorCorrection {
    type Error = PayqrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        };
        f.write_str(letter)
    }
}

/// Parse a `WIDTHxHEIGHT` size such as `490x490`.
///
/// # Errors
///
/// Returns [`PayqrError::InvalidSize`] for malformed input or a zero
/// dimension.
pub fn parse_size(value: &str) -> Result<(u32, u32), PayqrError> {
    let invalid = || PayqrError::InvalidSize {
        value: value.to_string(),
    };
    let (w, h) = value.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: u32 = w.trim().parse().map_err(|_| invalid())?;
    let height: u32 = h.trim().parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

/// Encoder turning payload strings into QR images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrEncoder {
    error_correction: ErrorCorrection,
    module_size: u32,
    border: u32,
    fixed_size: Option<(u32, u32)>,
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::default(),
            module_size: DEFAULT_MODULE_SIZE,
            border: DEFAULT_BORDER,
            fixed_size: None,
        }
    }
}

impl QrEncoder {
    /// Encoder with level L, 10 px modules, a 4 module border and no resize.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error-correction level.
    #[must_use]
    pub const fn with_error_correction(mut self, level: ErrorCorrection) -> Self {
        self.error_correction = level;
        self
    }

    /// Set the pixel size of one module (minimum 1).
    #[must_use]
    pub fn with_module_size(mut self, module_size: u32) -> Self {
        self.module_size = module_size.max(1);
        self
    }

    /// Set the quiet-zone width in modules.
    #[must_use]
    pub const fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    /// Resize the final image to a fixed `(width, height)`.
    #[must_use]
    pub const fn with_fixed_size(mut self, size: Option<(u32, u32)>) -> Self {
        self.fixed_size = size;
        self
    }

    /// The configured error-correction level.
    #[must_use]
    pub const fn error_correction(&self) -> ErrorCorrection {
        self.error_correction
    }

    /// Encode a payload into a grayscale image.
    ///
    /// # Errors
    ///
    /// Returns [`PayqrError::EncoderError`] if the payload does not fit in
    /// any QR version at the chosen level, or if the image would be larger
    /// than [`MAX_IMAGE_SIDE`] on either side.
    pub fn encode(&self, payload: &str) -> Result<GrayImage, PayqrError> {
        let level = self.error_correction.ec_level();
        let code = QrCode::with_error_correction_level(payload.as_bytes(), level).map_err(|e| {
            PayqrError::EncoderError {
                operation: "encode payload".to_string(),
                reason: e.to_string(),
            }
        })?;

        let modules = u32::try_from(code.width()).map_err(|e| PayqrError::EncoderError {
            operation: "encode payload".to_string(),
            reason: e.to_string(),
        })?;
        let colors = code.to_colors();
        let border_px = self.border.checked_mul(self.module_size);
        let side = border_px
            .and_then(|b| b.checked_mul(2))
            .zip(modules.checked_mul(self.module_size))
            .and_then(|(borders, body)| borders.checked_add(body))
            .filter(|side| *side <= MAX_IMAGE_SIDE);
        let (Some(border_px), Some(side)) = (border_px, side) else {
            return Err(PayqrError::EncoderError {
                operation: "encode payload".to_string(),
                reason: format!(
                    "image would exceed {MAX_IMAGE_SIDE}px per side ({modules} modules, module size {}, border {})",
                    self.module_size, self.border
                ),
            });
        };

        let image = GrayImage::from_fn(side, side, |x, y| {
            if x < border_px || y < border_px {
                return LIGHT;
            }
            let col = (x - border_px) / self.module_size;
            let row = (y - border_px) / self.module_size;
            if col >= modules || row >= modules {
                return LIGHT;
            }
            match colors[(row * modules + col) as usize] {
                Color::Dark => DARK,
                Color::Light => LIGHT,
            }
        });

        debug!(
            modules,
            side,
            level = %self.error_correction,
            payload_len = payload.len(),
            "Encoded QR symbol"
        );

        if let Some((width, height)) = self.fixed_size {
            if width > MAX_IMAGE_SIDE || height > MAX_IMAGE_SIDE {
                return Err(PayqrError::EncoderError {
                    operation: "resize image".to_string(),
                    reason: format!("{width}x{height} exceeds {MAX_IMAGE_SIDE}px per side"),
                });
            }
        }

        Ok(match self.fixed_size {
            Some((width, height)) => imageops::resize(&image, width, height, FilterType::Lanczos3),
            None => image,
        })
    }

    /// Save an image; the format follows the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`PayqrError::EncoderError`] if the image cannot be written.
    pub fn save(&self, image: &GrayImage, path: &Path) -> Result<(), PayqrError> {
        image.save(path).map_err(|e| PayqrError::EncoderError {
            operation: format!("save image to {}", path.display()),
            reason: e.to_string(),
        })
    }

    /// Encode a payload and save the image, returning the output path.
    ///
    /// # Errors
    ///
    /// Returns [`PayqrError::EncoderError`] if encoding or saving fails.
    pub fn encode_and_save(&self, payload: &str, path: &Path) -> Result<PathBuf, PayqrError> {
        let image = self.encode(payload)?;
        self.save(&image, path)?;
        Ok(path.to_path_buf())
    }
}
