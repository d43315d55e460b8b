//! Payload rendering.
//!
//! A payload is a single delimited string such as `K:PR|V:01|C:1|I:RSD100,00`.
//! Each field contributes one `key` + `kv_sep` + `value` segment, segments are
//! joined with `separator`, and with `trim_empty` set a field whose resolved
//! value is empty contributes nothing at all.

use crate::constants::{DEFAULT_KV_SEP, DEFAULT_SEPARATOR, KV_SEP_KEY, SEPARATOR_KEY, TRIM_EMPTY_KEY};
use crate::core::PayqrError;
use crate::template::fields::FieldRecord;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;
use toml::Value;

/// Settings controlling how segments are joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    /// Inserted between rendered segments.
    pub separator: String,
    /// Inserted between a field's key and its value.
    pub kv_sep: String,
    /// Omit fields whose resolved value is empty.
    pub trim_empty: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            kv_sep: DEFAULT_KV_SEP.to_string(),
            trim_empty: true,
        }
    }
}

impl RenderSettings {
    /// Read settings through a lookup function, keeping the default for any
    /// setting that is absent or has the wrong type.
    pub fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a Value>) -> Self {
        let defaults = Self::default();
        Self {
            separator: lookup(SEPARATOR_KEY)
                .and_then(Value::as_str)
                .map_or(defaults.separator, str::to_string),
            kv_sep: lookup(KV_SEP_KEY).and_then(Value::as_str).map_or(defaults.kv_sep, str::to_string),
            trim_empty: lookup(TRIM_EMPTY_KEY).and_then(Value::as_bool).unwrap_or(defaults.trim_empty),
        }
    }
}

/// Runtime replacement values keyed by field key.
///
/// Iteration follows insertion order, which is also the order in which keys
/// not declared by any field are appended to the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    values: IndexMap<String, String>,
}

impl Overrides {
    /// Create an empty override map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a replacement value, returning the previous one.
    ///
    /// Any displayable value is accepted and stored as its string form.
    pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) -> Option<String> {
        self.values.insert(key.into(), value.to_string())
    }

    /// Replacement value for a key, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns `true` if the key has a replacement value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse `KEY=VALUE` assignments as given on the command line.
    ///
    /// The value may be empty (`KEY=`) and may itself contain `=`.
    ///
    /// # Errors
    ///
    /// Returns [`PayqrError::InvalidOverride`] for an assignment without `=`
    /// or with an empty key.
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self, PayqrError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overrides = Self::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            match assignment.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    overrides.insert(key.trim(), value);
                }
                _ => {
                    return Err(PayqrError::InvalidOverride {
                        assignment: assignment.to_string(),
                    });
                }
            }
        }
        Ok(overrides)
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for Overrides {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut overrides = Self::new();
        overrides.extend(iter);
        overrides
    }
}

impl<K: Into<String>, V: fmt::Display> Extend<(K, V)> for Overrides {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Render fields into the payload string.
///
/// For every field in order the override value is used when present,
/// otherwise the field's own value. With `include_extras`, overrides for keys
/// that produced no segment are appended afterwards in override order. The
/// trim rule applies to both.
#[must_use]
pub fn render(
    fields: &[FieldRecord],
    settings: &RenderSettings,
    overrides: &Overrides,
    include_extras: bool,
) -> String {
    let mut segments: Vec<String> = Vec::with_capacity(fields.len() + overrides.len());
    let mut seen: HashSet<&str> = HashSet::new();

    for field in fields {
        let value = overrides.get(&field.key).unwrap_or(&field.value);
        if settings.trim_empty && value.is_empty() {
            continue;
        }
        segments.push(format!("{}{}{}", field.key, settings.kv_sep, value));
        seen.insert(field.key.as_str());
    }

    if include_extras {
        for (key, value) in overrides.iter() {
            if seen.contains(key) {
                continue;
            }
            if settings.trim_empty && value.is_empty() {
                continue;
            }
            segments.push(format!("{}{}{}", key, settings.kv_sep, value));
        }
    }

    segments.join(&settings.separator)
}
