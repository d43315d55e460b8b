//! Loading of configuration and template documents.
//!
//! Both the base configuration and the variable templates are TOML documents
//! made of string-keyed tables. They are parsed into order-preserving
//! [`toml::Table`]s so that field declaration order survives all the way to
//! the rendered payload.

use crate::core::PayqrError;
use std::path::Path;
use toml::Table;
use tracing::debug;

/// Load a configuration or template document from disk.
///
/// # Errors
///
/// Returns [`PayqrError::DocumentParseError`] if the file is absent,
/// unreadable, or not valid TOML.
pub fn load_document(path: &Path) -> Result<Table, PayqrError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| PayqrError::DocumentParseError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let table = parse_document(&content).map_err(|e| PayqrError::DocumentParseError {
        path: path.display().to_string(),
        reason: e.to_string().trim_end().to_string(),
    })?;

    debug!(path = %path.display(), entries = table.len(), "Loaded document");
    Ok(table)
}

/// Parse a document from an in-memory string.
///
/// # Errors
///
/// Returns the TOML parser error for malformed input.
pub fn parse_document(content: &str) -> Result<Table, toml::de::Error> {
    toml::from_str(content)
}
