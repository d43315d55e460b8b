//! Persisting edited templates.
//!
//! Edited templates are always written in the flat shape, one `[Label]`
//! table per variable field. Configuration fields are left out unless the
//! template replaces them; they keep coming from the configuration document.

use crate::template::fields::FieldRecord;
use crate::utils::fs::atomic_write;
use anyhow::{Context, Result};
use std::path::Path;
use toml_edit::{value, DocumentMut, Item, Table};
use tracing::info;

const HEADER: &str = "# Variable fields\n\n";

/// Serialize variable fields into a flat-shape template document.
#[must_use]
pub fn to_document(fields: &[FieldRecord]) -> String {
    let mut doc = DocumentMut::new();

    for field in fields {
        let mut table = Table::new();
        table.insert("key", value(field.key.as_str()));
        table.insert("value", value(field.value.as_str()));
        if let Some(required) = field.required {
            table.insert("required", value(required));
        }
        if let Some(pattern) = &field.pattern {
            table.insert("pattern", value(pattern.as_str()));
        }
        doc.insert(&field.label, Item::Table(table));
    }

    format!("{HEADER}{doc}")
}

/// Write variable fields to a template file atomically.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written.
pub fn save_template(path: &Path, fields: &[FieldRecord]) -> Result<()> {
    let content = to_document(fields);
    atomic_write(path, content.as_bytes())
        .with_context(|| format!("Failed to save template to {}", path.display()))?;
    info!(path = %path.display(), fields = fields.len(), "Saved template");
    Ok(())
}
