//! Template field model and payload rendering.
//!
//! This is the core of PayQR. A [`TemplateManager`] loads the base
//! configuration (fixed fields and rendering settings) and a variable
//! template, merges them, normalizes the result into ordered
//! [`FieldRecord`]s and renders those into the payload string.
//!
//! # Pipeline
//!
//! ```text
//! config.toml ──┐
//!               ├─ merge ─> MergedTemplate ─ get_fields ─> [FieldRecord] ─ render ─> "K:PR|V:01|..."
//! template.toml ┘                                                   overrides ─┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use payqr::template::{Overrides, TemplateManager};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let manager = TemplateManager::load(
//!     Path::new("templates/config.toml"),
//!     Path::new("templates/default.toml"),
//! )?;
//!
//! let mut overrides = Overrides::new();
//! overrides.insert("I", "RSD1500,00");
//! println!("{}", manager.render_payload(&overrides));
//! # Ok(())
//! # }
//! ```

pub mod fields;
pub mod loader;
pub mod merge;
pub mod render;
pub mod writer;

pub use fields::{get_fields, shadowed_flat_labels, FieldRecord, FieldShape};
pub use loader::{load_document, parse_document};
pub use merge::MergedTemplate;
pub use render::{render, Overrides, RenderSettings};

use crate::core::PayqrError;
use std::path::{Path, PathBuf};
use toml::Table;

/// A loaded configuration + template pair, ready to render.
///
/// Immutable once built. Selecting another template means building a new
/// manager and replacing this one as a whole.
#[derive(Debug, Clone)]
pub struct TemplateManager {
    template_path: Option<PathBuf>,
    merged: MergedTemplate,
    fields: Vec<FieldRecord>,
    settings: RenderSettings,
    fixed_labels: Vec<String>,
    template_labels: Vec<String>,
}

impl TemplateManager {
    /// Load and merge a configuration document and a template document.
    ///
    /// The configuration path is always passed in explicitly; the manager
    /// never looks up well-known locations by itself.
    ///
    /// # Errors
    ///
    /// Returns [`PayqrError::DocumentParseError`] if either document cannot
    /// be loaded.
    pub fn load(config_path: &Path, template_path: &Path) -> Result<Self, PayqrError> {
        let config = load_document(config_path)?;
        let template = load_document(template_path)?;

        let mut manager = Self::from_documents(&config, &template);
        manager.template_path = Some(template_path.to_path_buf());
        Ok(manager)
    }

    /// Build a manager from already parsed documents.
    #[must_use]
    pub fn from_documents(config: &Table, template: &Table) -> Self {
        let merged = MergedTemplate::merge(config, template);
        let fields = get_fields(&merged);
        let settings = merged.settings();
        let fixed_labels = labels_of(&MergedTemplate::merge(config, &Table::new()));
        let template_labels = labels_of(&MergedTemplate::merge(&Table::new(), template));

        Self {
            template_path: None,
            merged,
            fields,
            settings,
            fixed_labels,
            template_labels,
        }
    }

    /// Path of the template document, when loaded from disk.
    #[must_use]
    pub fn template_path(&self) -> Option<&Path> {
        self.template_path.as_deref()
    }

    /// The merged structure the fields were read from.
    #[must_use]
    pub const fn merged(&self) -> &MergedTemplate {
        &self.merged
    }

    /// Normalized fields in render order.
    #[must_use]
    pub fn fields(&self) -> &[FieldRecord] {
        &self.fields
    }

    /// Rendering settings from the configuration, with defaults applied.
    #[must_use]
    pub const fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Whether a field label is declared by the configuration.
    #[must_use]
    pub fn is_fixed(&self, label: &str) -> bool {
        self.fixed_labels.iter().any(|l| l == label)
    }

    /// Whether a field label is declared by the template document itself,
    /// including labels that replace a configuration field.
    #[must_use]
    pub fn is_template_declared(&self, label: &str) -> bool {
        self.template_labels.iter().any(|l| l == label)
    }

    /// Whether a field belongs in the template when it is written back.
    #[must_use]
    pub fn is_saved_with_template(&self, label: &str) -> bool {
        !self.is_fixed(label) || self.is_template_declared(label)
    }

    /// Fields contributed by the template rather than the configuration.
    ///
    /// A template field that replaces a configuration field is included, so
    /// writing these back keeps the replacement.
    pub fn variable_fields(&self) -> impl Iterator<Item = &FieldRecord> {
        self.fields.iter().filter(|f| self.is_saved_with_template(&f.label))
    }

    /// Render the payload, appending overrides for undeclared keys.
    #[must_use]
    pub fn render_payload(&self, overrides: &Overrides) -> String {
        self.render_payload_with(overrides, true)
    }

    /// Render the payload, choosing whether undeclared override keys are
    /// appended.
    #[must_use]
    pub fn render_payload_with(&self, overrides: &Overrides, include_extras: bool) -> String {
        render(&self.fields, &self.settings, overrides, include_extras)
    }
}

fn labels_of(merged: &MergedTemplate) -> Vec<String> {
    get_fields(merged).into_iter().map(|f| f.label).collect()
}
