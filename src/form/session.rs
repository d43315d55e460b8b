//! Editing session over a template catalog.
//!
//! A [`Session`] owns the active template: its [`TemplateManager`] and the
//! [`FormState`] built from it. Switching templates builds the new pair
//! completely before replacing the old one, so a template that fails to load
//! leaves the session as it was.

use crate::catalog::{sanitize_name, TemplateCatalog};
use crate::constants::DEFAULT_TEMPLATE;
use crate::core::PayqrError;
use crate::form::FormState;
use crate::template::writer::save_template;
use crate::template::{FieldRecord, TemplateManager};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The active template and its edit state.
#[derive(Debug, Clone)]
pub struct Session {
    config_path: PathBuf,
    catalog: TemplateCatalog,
    current: String,
    manager: TemplateManager,
    form: FormState,
}

impl Session {
    /// Open the catalog's default template.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the template cannot be
    /// loaded.
    pub fn open(config_path: &Path, catalog: TemplateCatalog) -> Result<Self> {
        let name = catalog.default_name().to_string();
        Self::open_named(config_path, catalog, &name)
    }

    /// Open a specific template.
    ///
    /// # Errors
    ///
    /// Returns [`PayqrError::TemplateNotFound`] for an unknown name, or an
    /// error if a document cannot be loaded.
    pub fn open_named(config_path: &Path, catalog: TemplateCatalog, name: &str) -> Result<Self> {
        let (manager, form) = Self::build(config_path, &catalog, name)?;
        Ok(Self {
            config_path: config_path.to_path_buf(),
            catalog,
            current: name.to_string(),
            manager,
            form,
        })
    }

    fn build(
        config_path: &Path,
        catalog: &TemplateCatalog,
        name: &str,
    ) -> Result<(TemplateManager, FormState)> {
        let template_path = catalog.path_for(name)?;
        let manager = TemplateManager::load(config_path, &template_path)
            .with_context(|| format!("Failed to open template '{name}'"))?;
        let form = FormState::from_manager(&manager);
        Ok((manager, form))
    }

    /// Make another template active.
    ///
    /// Unsaved edits to the current template are discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be loaded; the previous
    /// template stays active.
    pub fn switch_to(&mut self, name: &str) -> Result<()> {
        let (manager, form) = Self::build(&self.config_path, &self.catalog, name)?;
        debug!(from = %self.current, to = %name, "Switching template");
        self.manager = manager;
        self.form = form;
        self.current = name.to_string();
        Ok(())
    }

    /// Name of the active template.
    #[must_use]
    pub fn current_name(&self) -> &str {
        &self.current
    }

    /// The catalog the session draws templates from.
    #[must_use]
    pub const fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// The active template.
    #[must_use]
    pub const fn manager(&self) -> &TemplateManager {
        &self.manager
    }

    /// Edit state of the active template.
    #[must_use]
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Mutable edit state of the active template.
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// Payload for the current form values.
    #[must_use]
    pub fn render_payload(&self) -> String {
        self.manager.render_payload(&self.form.overrides())
    }

    /// Variable fields with their current values, as they would be saved.
    fn fields_to_save(&self) -> Vec<FieldRecord> {
        self.form
            .current_fields()
            .into_iter()
            .filter(|f| self.manager.is_saved_with_template(&f.label))
            .collect()
    }

    /// Persist the form.
    ///
    /// Does nothing when there are no unsaved edits. Without `save_as` the
    /// active template is overwritten, which is refused for `default`. With
    /// `save_as` a new template is written and becomes active. Returns the
    /// written path, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PayqrError::ReadOnlyTemplate`] when overwriting `default`,
    /// [`PayqrError::InvalidTemplateName`] or [`PayqrError::TemplateExists`]
    /// for a bad save-as name, or an error if writing fails.
    pub fn save(&mut self, save_as: Option<&str>) -> Result<Option<PathBuf>> {
        if !self.form.is_dirty() {
            debug!(template = %self.current, "No unsaved changes");
            return Ok(None);
        }

        let fields = self.fields_to_save();

        let Some(raw_name) = save_as else {
            if self.current == DEFAULT_TEMPLATE {
                return Err(PayqrError::ReadOnlyTemplate {
                    name: self.current.clone(),
                }
                .into());
            }
            let path = self.catalog.path_for(&self.current)?;
            save_template(&path, &fields)?;
            self.form.mark_saved();
            return Ok(Some(path));
        };

        let name = sanitize_name(raw_name)?;
        if self.catalog.contains(&name) {
            return Err(PayqrError::TemplateExists {
                name,
            }
            .into());
        }

        let path = self.catalog.file_path(&name);
        save_template(&path, &fields)?;
        self.catalog.refresh()?;
        self.switch_to(&name)?;
        info!(template = %name, "Saved as new template");
        Ok(Some(path))
    }
}
