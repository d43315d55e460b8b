//! Test utilities for PayQR
//!
//! Helpers shared by unit and integration tests: one-time logging setup and
//! a temporary install root populated with configuration and template
//! documents.
//!
//! # Example
//!
//! ```rust,no_run
//! use payqr::test_utils::TemplateFixture;
//!
//! let fixture = TemplateFixture::standard().unwrap();
//! fixture.write_template("rent", "[PayeeName]\nkey = \"N\"\nvalue = \"Landlord\"\n").unwrap();
//! assert!(fixture.template_path("rent").exists());
//! ```

use crate::catalog::InstallRoot;
use crate::constants::{CONFIG_FILE_NAME, TEMPLATES_DIR_NAME};
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Configuration with the three protocol-constant fields.
pub const STANDARD_CONFIG: &str = r#"separator = "|"
kv_sep = ":"
trim_empty = true

[IdentificationCode]
key = "K"
value = "PR"

[Version]
key = "V"
value = "01"

[CodeSet]
key = "C"
value = "1"
"#;

/// A flat variable template.
pub const STANDARD_TEMPLATE: &str = r#"[PayeeAccount]
key = "R"
value = "845000000040484987"
required = true

[PayeeName]
key = "N"
value = "JKP Beograd"

[Amount]
key = "I"
value = "RSD3596,13"

[PayerName]
key = "P"
value = ""

[PaymentCode]
key = "SF"
value = "189"
"#;

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses the given level, else
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// A temporary install root: `<root>/templates/config.toml` plus templates.
pub struct TemplateFixture {
    temp_dir: TempDir,
}

impl TemplateFixture {
    /// Fixture with the given configuration document and no templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be prepared.
    pub fn with_config(config: &str) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let fixture = Self {
            temp_dir,
        };
        fs::create_dir_all(fixture.templates_dir())?;
        fs::write(fixture.config_path(), config)?;
        Ok(fixture)
    }

    /// Fixture with [`STANDARD_CONFIG`] and [`STANDARD_TEMPLATE`] as
    /// `default`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be prepared.
    pub fn standard() -> Result<Self> {
        let fixture = Self::with_config(STANDARD_CONFIG)?;
        fixture.write_template("default", STANDARD_TEMPLATE)?;
        Ok(fixture)
    }

    /// Write `<name>.toml` into the templates directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_template(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.template_path(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Root of the fixture, usable as an install root.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The fixture as an [`InstallRoot`].
    #[must_use]
    pub fn install_root(&self) -> InstallRoot {
        InstallRoot::new(self.root())
    }

    /// The bundled templates directory.
    #[must_use]
    pub fn templates_dir(&self) -> PathBuf {
        self.root().join(TEMPLATES_DIR_NAME)
    }

    /// Path of the configuration document.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.templates_dir().join(CONFIG_FILE_NAME)
    }

    /// Path of a template by name.
    #[must_use]
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.templates_dir().join(format!("{name}.toml"))
    }

    /// A fresh directory inside the fixture, e.g. for user templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn subdir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.root().join(name);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
