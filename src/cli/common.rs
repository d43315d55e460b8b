//! Arguments and helpers shared by the PayQR commands.

use crate::catalog::InstallRoot;
use crate::config::{GlobalConfig, QrSettings};
use crate::qr::{parse_size, ErrorCorrection, QrEncoder};
use crate::template::{Overrides, TemplateManager};
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Where the bundled configuration and templates live.
    pub install_root: InstallRoot,
    /// User-wide settings.
    pub global: GlobalConfig,
}

impl CommandContext {
    /// Bundle an install root with global settings.
    #[must_use]
    pub const fn new(install_root: InstallRoot, global: GlobalConfig) -> Self {
        Self {
            install_root,
            global,
        }
    }

    /// Template to use when none was given on the command line.
    #[must_use]
    pub fn template_or_default(&self, template: Option<&Path>) -> PathBuf {
        template.map_or_else(|| self.install_root.default_template_path(), Path::to_path_buf)
    }

    /// Load the base configuration merged with a template.
    ///
    /// # Errors
    ///
    /// Returns an error if either document cannot be loaded.
    pub fn load_manager(&self, template: Option<&Path>) -> Result<TemplateManager> {
        let config_path = self.install_root.config_path();
        let template_path = self.template_or_default(template);
        debug!(
            config = %config_path.display(),
            template = %template_path.display(),
            "Loading template"
        );

        TemplateManager::load(&config_path, &template_path)
            .with_context(|| format!("Failed to load template {}", template_path.display()))
    }

    /// User template directory, preferring an explicit override.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the home directory
    /// cannot be determined.
    pub fn templates_dir(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(dir) => Ok(dir.to_path_buf()),
            None => self.global.templates_dir(),
        }
    }
}

/// Template selection and value overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct TemplateArgs {
    /// Template document to render (defaults to the bundled default template)
    #[arg(short, long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Override a field value by key; repeatable
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

impl TemplateArgs {
    /// Parse the `--set` assignments.
    ///
    /// # Errors
    ///
    /// Returns an error for an assignment without `=`.
    pub fn overrides(&self) -> Result<Overrides> {
        Ok(Overrides::from_assignments(&self.set)?)
    }
}

/// QR output options; unset options fall back to the global settings.
#[derive(Args, Debug, Clone, Default)]
pub struct QrArgs {
    /// Error-correction level
    #[arg(long = "ec", value_name = "L|M|Q|H")]
    pub error_correction: Option<ErrorCorrection>,

    /// Pixel size of one QR module
    #[arg(long, value_name = "N")]
    pub module_size: Option<u32>,

    /// Quiet-zone width in modules
    #[arg(long, value_name = "N")]
    pub border: Option<u32>,

    /// Resize the image to WIDTHxHEIGHT pixels
    #[arg(long, value_name = "WxH")]
    pub size: Option<String>,
}

impl QrArgs {
    /// Settings with command-line values layered over `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if `--size` is malformed.
    pub fn apply(&self, base: &QrSettings) -> Result<QrSettings> {
        let size = match &self.size {
            Some(value) => Some(parse_size(value)?),
            None => base.size,
        };

        Ok(QrSettings {
            error_correction: self.error_correction.unwrap_or(base.error_correction),
            module_size: self.module_size.unwrap_or(base.module_size),
            border: self.border.unwrap_or(base.border),
            size,
        })
    }

    /// Encoder for these options over `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if `--size` is malformed.
    pub fn encoder(&self, base: &QrSettings) -> Result<QrEncoder> {
        Ok(self.apply(base)?.encoder())
    }
}
