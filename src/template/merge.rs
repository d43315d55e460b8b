//! Merging of the base configuration with a variable template.
//!
//! The merged structure is an ordered map from label to either a field table
//! or a rendering setting. Entries are inserted in this order:
//!
//! 1. the rendering settings (`separator`, `kv_sep`, `trim_empty`) from the
//!    configuration
//! 2. field-shaped configuration entries, in document order
//! 3. field-shaped template entries, in document order
//!
//! A template entry whose label was already declared by the configuration
//! replaces the configuration value but keeps the configuration position.
//! A top-level `fields` collection (array or table) is carried as well; see
//! [`MergedTemplate::merge`] for how two collections combine.

use crate::constants::{FIELDS_KEY, SETTING_KEYS};
use crate::template::render::RenderSettings;
use indexmap::IndexMap;
use toml::{Table, Value};
use tracing::{debug, warn};

/// Configuration and template combined into one ordered structure.
///
/// Built once per template load and never mutated afterwards; switching
/// templates builds a new value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedTemplate {
    entries: IndexMap<String, Value>,
}

impl MergedTemplate {
    /// Merge a configuration document with a template document.
    ///
    /// When both documents declare a `fields` collection:
    /// - two arrays are concatenated, configuration elements first
    /// - two tables are merged by label, template entries replacing
    ///   configuration entries in place
    /// - otherwise the template's collection wins
    #[must_use]
    pub fn merge(config: &Table, template: &Table) -> Self {
        let mut entries = IndexMap::new();

        for key in SETTING_KEYS {
            if let Some(value) = config.get(key) {
                entries.insert(key.to_string(), value.clone());
            }
        }

        for (label, item) in config {
            if SETTING_KEYS.contains(&label.as_str()) {
                continue;
            }
            if label == FIELDS_KEY && is_field_collection(item) {
                entries.insert(label.clone(), item.clone());
            } else if is_field_table(item) {
                entries.insert(label.clone(), item.clone());
            }
        }

        for (label, item) in template {
            if SETTING_KEYS.contains(&label.as_str()) {
                warn!(setting = %label, "Ignoring rendering setting declared in template");
                continue;
            }
            if label == FIELDS_KEY && is_field_collection(item) {
                let combined = match entries.get(FIELDS_KEY) {
                    Some(existing) => combine_collections(existing, item),
                    None => item.clone(),
                };
                entries.insert(label.clone(), combined);
            } else if is_field_table(item) {
                // IndexMap::insert keeps the original slot for an existing key
                entries.insert(label.clone(), item.clone());
            }
        }

        debug!(entries = entries.len(), "Merged configuration and template");
        Self {
            entries,
        }
    }

    /// Look up an entry by label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.entries.get(label)
    }

    /// Iterate over all entries in merge order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Labels of all entries in merge order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries, settings included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was merged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rendering settings, with defaults for anything absent or mistyped.
    #[must_use]
    pub fn settings(&self) -> RenderSettings {
        RenderSettings::from_lookup(|key| self.entries.get(key))
    }
}

/// Returns `true` for a table that declares a `key` or a `value`.
#[must_use]
pub fn is_field_table(value: &Value) -> bool {
    value.as_table().is_some_and(|t| t.contains_key("key") || t.contains_key("value"))
}

fn is_field_collection(value: &Value) -> bool {
    value.is_array() || value.is_table()
}

fn combine_collections(existing: &Value, incoming: &Value) -> Value {
    match (existing, incoming) {
        (Value::Array(base), Value::Array(extra)) => {
            let mut combined = base.clone();
            combined.extend(extra.iter().cloned());
            Value::Array(combined)
        }
        (Value::Table(base), Value::Table(extra)) => {
            let mut combined = base.clone();
            for (label, item) in extra {
                combined.insert(label.clone(), item.clone());
            }
            Value::Table(combined)
        }
        _ => incoming.clone(),
    }
}
