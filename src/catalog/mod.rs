//! Template discovery and installation layout.
//!
//! A template catalog is a directory of `*.toml` template documents. The
//! bundled catalog ships next to the binary under `<install root>/templates`
//! together with `config.toml`; the user catalog lives in
//! `~/.payqr/templates` and is seeded from the bundled one by
//! [`bootstrap`].
//!
//! ```text
//! <install root>/templates/
//! ├── config.toml      # fixed fields + settings, never listed
//! ├── default.toml
//! └── donation.toml
//! ```

use crate::constants::{
    CONFIG_FILE_NAME, CONFIG_STEM, DEFAULT_TEMPLATE, INSTALL_ROOT_ENV, TEMPLATES_DIR_NAME,
};
use crate::core::PayqrError;
use crate::utils::fs::{copy_if_absent, ensure_dir};
use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Turn user input into a safe template file stem.
///
/// Whitespace is trimmed and every character outside `[A-Za-z0-9_-]` is
/// replaced by `_`.
///
/// # Errors
///
/// Returns [`PayqrError::InvalidTemplateName`] if nothing is left after
/// trimming.
pub fn sanitize_name(raw: &str) -> Result<String, PayqrError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PayqrError::InvalidTemplateName {
            name: raw.to_string(),
        });
    }
    let invalid_chars = Regex::new(r"[^A-Za-z0-9_-]").map_err(|e| PayqrError::Other {
        message: e.to_string(),
    })?;
    Ok(invalid_chars.replace_all(trimmed, "_").into_owned())
}

/// List the `*.toml` files directly inside `dir`.
fn toml_files(dir: &Path) -> Result<Vec<PathBuf>, PayqrError> {
    let pattern = format!("{}/*.toml", glob::Pattern::escape(&dir.to_string_lossy()));
    debug!(%pattern, "Scanning for templates");

    let entries = glob::glob(&pattern).map_err(|e| PayqrError::FileSystemError {
        operation: format!("scan templates ({e})"),
        path: dir.display().to_string(),
    })?;

    Ok(entries.filter_map(std::result::Result::ok).filter(|p| p.is_file()).collect())
}

/// Seed `user_dir` with the bundled templates.
///
/// The directory is created if needed. Templates are copied only when
/// `user_dir` holds no `*.toml` file yet, and existing files are never
/// overwritten. The configuration document is not copied. Returns the names
/// of the copied files.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a copy fails.
pub fn bootstrap(bundled_dir: &Path, user_dir: &Path) -> Result<Vec<String>> {
    ensure_dir(user_dir)?;

    if !toml_files(user_dir)?.is_empty() {
        debug!(dir = %user_dir.display(), "User templates present, skipping bootstrap");
        return Ok(Vec::new());
    }

    let mut copied = Vec::new();
    for src in toml_files(bundled_dir)? {
        let Some(file_name) = src.file_name() else {
            continue;
        };
        if file_name == CONFIG_FILE_NAME {
            continue;
        }
        let dst = user_dir.join(file_name);
        if copy_if_absent(&src, &dst)
            .with_context(|| format!("Failed to bootstrap templates into {}", user_dir.display()))?
        {
            copied.push(file_name.to_string_lossy().into_owned());
        }
    }

    copied.sort();
    if !copied.is_empty() {
        info!(dir = %user_dir.display(), count = copied.len(), "Bootstrapped user templates");
    }
    Ok(copied)
}

/// Sorted template names found in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCatalog {
    dir: PathBuf,
    names: Vec<String>,
}

impl TemplateCatalog {
    /// Scan `dir` for templates.
    ///
    /// Names are file stems of `*.toml` files, sorted, excluding the
    /// configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`PayqrError::NoTemplatesFound`] if the directory holds no
    /// template.
    pub fn discover(dir: &Path) -> Result<Self, PayqrError> {
        let mut names: Vec<String> = toml_files(dir)?
            .iter()
            .filter_map(|p| p.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| stem != CONFIG_STEM)
            .collect();
        names.sort();

        if names.is_empty() {
            return Err(PayqrError::NoTemplatesFound {
                dir: dir.display().to_string(),
            });
        }

        debug!(dir = %dir.display(), ?names, "Discovered templates");
        Ok(Self {
            dir: dir.to_path_buf(),
            names,
        })
    }

    /// Directory the catalog was read from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Template names in sorted order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether a template with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// `default` if present, otherwise the first name.
    #[must_use]
    pub fn default_name(&self) -> &str {
        if self.contains(DEFAULT_TEMPLATE) {
            DEFAULT_TEMPLATE
        } else {
            // discover() guarantees at least one name
            self.names.first().map_or(DEFAULT_TEMPLATE, String::as_str)
        }
    }

    /// Path of a known template.
    ///
    /// # Errors
    ///
    /// Returns [`PayqrError::TemplateNotFound`] for an unknown name.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, PayqrError> {
        if self.contains(name) {
            Ok(self.file_path(name))
        } else {
            Err(PayqrError::TemplateNotFound {
                name: name.to_string(),
            })
        }
    }

    /// Where a template with this name would be stored, known or not.
    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.toml"))
    }

    /// Re-read the directory.
    ///
    /// # Errors
    ///
    /// Same as [`TemplateCatalog::discover`].
    pub fn refresh(&mut self) -> Result<(), PayqrError> {
        *self = Self::discover(&self.dir)?;
        Ok(())
    }
}

/// Location of the bundled templates and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRoot {
    root: PathBuf,
}

impl InstallRoot {
    /// Use an explicit root.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Resolve the install root.
    ///
    /// Order: the explicit argument, `PAYQR_INSTALL_ROOT`, the first ancestor
    /// of the running executable holding `templates/config.toml`, then the
    /// directory the crate was built from.
    #[must_use]
    pub fn resolve(explicit: Option<&Path>) -> Self {
        if let Some(root) = explicit {
            return Self::new(root);
        }

        if let Some(root) = std::env::var_os(INSTALL_ROOT_ENV).filter(|v| !v.is_empty()) {
            debug!(root = ?root, "Install root from environment");
            return Self::new(root);
        }

        if let Some(root) = std::env::current_exe().ok().as_deref().and_then(Self::find_from) {
            return root;
        }

        Self::new(env!("CARGO_MANIFEST_DIR"))
    }

    /// First ancestor of `start` holding `templates/config.toml`.
    #[must_use]
    pub fn find_from(start: &Path) -> Option<Self> {
        start
            .ancestors()
            .find(|dir| dir.join(TEMPLATES_DIR_NAME).join(CONFIG_FILE_NAME).is_file())
            .map(Self::new)
    }

    /// The root directory itself.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Directory of the bundled templates.
    #[must_use]
    pub fn bundled_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_DIR_NAME)
    }

    /// Path of the base configuration document.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.bundled_dir().join(CONFIG_FILE_NAME)
    }

    /// Path of the bundled default template.
    #[must_use]
    pub fn default_template_path(&self) -> PathBuf {
        self.bundled_dir().join(format!("{DEFAULT_TEMPLATE}.toml"))
    }
}
