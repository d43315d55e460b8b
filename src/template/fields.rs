//! Field records and the three supported document shapes.
//!
//! Templates have been written in three conventions over time. All of them
//! normalize to the same ordered sequence of [`FieldRecord`]s:
//!
//! ```toml
//! # Array of tables
//! [[fields]]
//! key = "I"
//! value = "RSD100,00"
//! label = "Amount"
//!
//! # Table of labeled tables
//! [fields.Amount]
//! key = "I"
//! value = "RSD100,00"
//!
//! # Flat top-level tables
//! [Amount]
//! key = "I"
//! value = "RSD100,00"
//! ```
//!
//! The shape is resolved by [`FieldShape::detect`] with a fixed precedence:
//! array, then grouped table, then flat. An array always wins, even when it
//! is empty. A grouped table that yields no records falls through to the flat
//! shape.

use crate::constants::{FIELDS_KEY, SETTING_KEYS};
use crate::template::merge::{is_field_table, MergedTemplate};
use serde::Serialize;
use toml::{Table, Value};
use tracing::warn;

/// One payload element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRecord {
    /// Name component of the rendered `key:value` segment.
    pub key: String,
    /// Stored default value; may be empty.
    pub value: String,
    /// Human-facing name of the field.
    pub label: String,
    /// Advisory flag, not enforced by the renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Advisory validation hint, not used by the renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldRecord {
    /// Create a record without advisory metadata.
    pub fn new(key: impl Into<String>, value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            label: label.into(),
            required: None,
            pattern: None,
        }
    }

    /// Build a record from a field table.
    ///
    /// The label comes from the table's own `label` entry, else from the
    /// name the table was declared under, else from the key.
    #[must_use]
    pub fn from_table(table: &Table, declared_as: Option<&str>) -> Self {
        let key = table.get("key").map(value_to_string).unwrap_or_default();
        let value = table.get("value").map(value_to_string).unwrap_or_default();
        let label = table
            .get("label")
            .map(value_to_string)
            .or_else(|| declared_as.map(str::to_string))
            .unwrap_or_else(|| key.clone());

        Self {
            key,
            value,
            label,
            required: table.get("required").and_then(Value::as_bool),
            pattern: table.get("pattern").and_then(Value::as_str).map(str::to_string),
        }
    }

    /// Whether the field is flagged as required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// The document shape a merged structure is read with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldShape<'a> {
    /// `fields` is an array of field tables.
    Array(&'a [Value]),
    /// `fields` is a table of labeled field tables.
    GroupedTable(&'a Table),
    /// Field tables live directly at the top level.
    FlatTable,
}

impl<'a> FieldShape<'a> {
    /// Pick the highest-precedence shape the structure could be read with.
    #[must_use]
    pub fn detect(merged: &'a MergedTemplate) -> Self {
        match merged.get(FIELDS_KEY) {
            Some(Value::Array(items)) => Self::Array(items),
            Some(Value::Table(groups)) => Self::GroupedTable(groups),
            _ => Self::FlatTable,
        }
    }
}

/// Normalize a merged structure into its ordered field records.
///
/// Never fails; a structure without recognizable fields yields an empty
/// sequence.
#[must_use]
pub fn get_fields(merged: &MergedTemplate) -> Vec<FieldRecord> {
    match FieldShape::detect(merged) {
        FieldShape::Array(items) => {
            warn_shadowed(merged, "array");
            return items
                .iter()
                .filter_map(Value::as_table)
                .map(|table| FieldRecord::from_table(table, None))
                .collect();
        }
        FieldShape::GroupedTable(groups) => {
            let records = collect_tables(groups.iter().map(|(k, v)| (k.as_str(), v)));
            if !records.is_empty() {
                warn_shadowed(merged, "grouped table");
                return records;
            }
        }
        FieldShape::FlatTable => {}
    }

    collect_tables(merged.iter().filter(|(label, _)| !SETTING_KEYS.contains(label)))
}

/// Labels of top-level field tables that are ignored because a `fields`
/// collection takes precedence.
///
/// Empty when the structure is read in the flat shape.
#[must_use]
pub fn shadowed_flat_labels(merged: &MergedTemplate) -> Vec<String> {
    let shadowing = match FieldShape::detect(merged) {
        FieldShape::Array(_) => true,
        FieldShape::GroupedTable(groups) => groups.values().any(is_field_table),
        FieldShape::FlatTable => false,
    };
    if !shadowing {
        return Vec::new();
    }

    merged
        .iter()
        .filter(|(label, item)| *label != FIELDS_KEY && !SETTING_KEYS.contains(label) && is_field_table(item))
        .map(|(label, _)| label.to_string())
        .collect()
}

fn warn_shadowed(merged: &MergedTemplate, shape: &str) {
    let hidden = shadowed_flat_labels(merged);
    if !hidden.is_empty() {
        warn!(
            shape,
            ignored = %hidden.join(", "),
            "Field tables outside the `fields` collection are ignored"
        );
    }
}

fn collect_tables<'a>(entries: impl Iterator<Item = (&'a str, &'a Value)>) -> Vec<FieldRecord> {
    entries
        .filter(|(_, item)| is_field_table(item))
        .filter_map(|(label, item)| {
            item.as_table().map(|table| FieldRecord::from_table(table, Some(label)))
        })
        .collect()
}

/// Render a TOML value as the text it contributes to a payload.
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(d) => d.to_string(),
        other => other.to_string(),
    }
}
