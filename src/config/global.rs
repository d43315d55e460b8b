//! Global configuration management for PayQR.
//!
//! The global configuration file (`~/.payqr/payqr.toml`) holds user-wide
//! preferences: where edited templates live and how QR images are produced.
//! It is optional; a missing file means defaults everywhere.
//!
//! # File Format
//!
//! ```toml
//! # Directory holding the user's editable templates
//! templates_dir = "/home/user/payments"
//!
//! [qr]
//! error_correction = "M"
//! module_size = 8
//! border = 4
//! size = [490, 490]
//! ```
//!
//! Command-line flags take precedence over values from this file.
//!
//! # Examples
//!
//! ```rust,no_run
//! use payqr::config::GlobalConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = GlobalConfig::load_with_optional(None)?;
//! let encoder = config.qr.encoder();
//! # Ok(())
//! # }
//! ```

use crate::constants::{GLOBAL_CONFIG_FILE_NAME, TEMPLATES_DIR_NAME, USER_DIR_NAME};
use crate::qr::{ErrorCorrection, QrEncoder, DEFAULT_BORDER, DEFAULT_MODULE_SIZE};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// QR output preferences.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QrSettings {
    /// Error-correction level (`L`, `M`, `Q` or `H`).
    pub error_correction: ErrorCorrection,
    /// Pixel size of one module.
    pub module_size: u32,
    /// Quiet-zone width in modules.
    pub border: u32,
    /// Fixed output size as `[width, height]`.
    pub size: Option<(u32, u32)>,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::default(),
            module_size: DEFAULT_MODULE_SIZE,
            border: DEFAULT_BORDER,
            size: None,
        }
    }
}

impl QrSettings {
    /// Build an encoder from these settings.
    #[must_use]
    pub fn encoder(&self) -> QrEncoder {
        QrEncoder::new()
            .with_error_correction(self.error_correction)
            .with_module_size(self.module_size)
            .with_border(self.border)
            .with_fixed_size(self.size)
    }
}

/// User-wide PayQR configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Override for the user template directory.
    pub templates_dir: Option<PathBuf>,
    /// QR output preferences.
    pub qr: QrSettings,
}

impl GlobalConfig {
    /// Load from an explicit path, or from the default location.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => match Self::default_path() {
                Ok(path) => path,
                Err(e) => {
                    debug!("No default global config location: {e}");
                    return Ok(Self::default());
                }
            },
        };

        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!(path = %path.display(), "Global config not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// configuration.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read global config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse global config from {}", path.display()))
    }

    /// The per-user PayQR directory (`~/.payqr`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn user_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
            .join(USER_DIR_NAME))
    }

    /// Default path of the global configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::user_dir()?.join(GLOBAL_CONFIG_FILE_NAME))
    }

    /// Directory holding the user's editable templates.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is configured and the home directory
    /// cannot be determined.
    pub fn templates_dir(&self) -> Result<PathBuf> {
        match &self.templates_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::user_dir()?.join(TEMPLATES_DIR_NAME)),
        }
    }
}
