//! Editable form state over a template's fields.
//!
//! A [`FormState`] holds the current value of every field, keyed by field
//! key, plus a snapshot of the values as last saved. Dirtiness is a pure
//! comparison of the two; nothing is tracked through callbacks.
//!
//! Fixed fields (the protocol constants and anything declared by the
//! configuration document) are read-only and refuse edits.

pub mod session;

pub use session::Session;

use crate::constants::{AMOUNT_LABEL, DEFAULT_CURRENCY, READONLY_LABELS};
use crate::core::PayqrError;
use crate::template::{FieldRecord, Overrides, TemplateManager};
use indexmap::IndexMap;
use regex::Regex;

/// Human-facing caption for a field, e.g. `Identification Code (K):`.
///
/// A space goes before every uppercase letter of the label.
#[must_use]
pub fn format_label(label: &str, key: &str) -> String {
    let mut spaced = String::with_capacity(label.len() + 8);
    for c in label.chars() {
        if c.is_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }
    format!("{} ({key}):", spaced.trim())
}

/// Split an amount value into currency and amount.
///
/// `RSD3596,13` yields `("RSD", "3596,13")`. A value without a three-letter
/// uppercase prefix is taken as the amount in the default currency.
#[must_use]
pub fn split_amount(value: &str) -> (String, String) {
    let captured = Regex::new(r"^([A-Z]{3})(.+)$")
        .ok()
        .and_then(|re| re.captures(value).map(|c| (c[1].to_string(), c[2].to_string())));

    captured.unwrap_or_else(|| (DEFAULT_CURRENCY.to_string(), value.to_string()))
}

/// Current and saved values for one template's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    fields: Vec<FieldRecord>,
    read_only: Vec<String>,
    values: IndexMap<String, String>,
    saved: IndexMap<String, String>,
}

impl FormState {
    /// Seed a form from field defaults.
    ///
    /// The protocol-constant labels are read-only; the saved snapshot
    /// equals the initial values.
    #[must_use]
    pub fn new(fields: Vec<FieldRecord>) -> Self {
        let values: IndexMap<String, String> =
            fields.iter().map(|f| (f.key.clone(), f.value.clone())).collect();

        Self {
            fields,
            read_only: READONLY_LABELS.iter().map(|l| (*l).to_string()).collect(),
            saved: values.clone(),
            values,
        }
    }

    /// Seed a form from a loaded template, making configuration fields
    /// read-only.
    #[must_use]
    pub fn from_manager(manager: &TemplateManager) -> Self {
        let mut form = Self::new(manager.fields().to_vec());
        let fixed: Vec<String> = manager
            .fields()
            .iter()
            .filter(|f| manager.is_fixed(&f.label))
            .map(|f| f.label.clone())
            .collect();
        for label in fixed {
            if !form.read_only.contains(&label) {
                form.read_only.push(label);
            }
        }
        form
    }

    /// The fields the form was built from.
    #[must_use]
    pub fn fields(&self) -> &[FieldRecord] {
        &self.fields
    }

    /// Whether edits to this label are refused.
    #[must_use]
    pub fn is_read_only(&self, label: &str) -> bool {
        self.read_only.iter().any(|l| l == label)
    }

    /// Current value for a key.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Change the value of a field.
    ///
    /// # Errors
    ///
    /// Returns [`PayqrError::ReadOnlyField`] for a fixed field and
    /// [`PayqrError::UnknownField`] if no field has this key.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), PayqrError> {
        let field = self.fields.iter().find(|f| f.key == key).ok_or_else(|| {
            PayqrError::UnknownField {
                key: key.to_string(),
            }
        })?;
        if self.is_read_only(&field.label) {
            return Err(PayqrError::ReadOnlyField {
                label: field.label.clone(),
            });
        }
        self.values.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Key of the amount field, if the template has one.
    fn amount_key(&self) -> Option<&str> {
        self.fields.iter().find(|f| f.label == AMOUNT_LABEL).map(|f| f.key.as_str())
    }

    /// Currency and amount of the amount field.
    #[must_use]
    pub fn amount(&self) -> Option<(String, String)> {
        self.amount_key().and_then(|key| self.value(key)).map(split_amount)
    }

    /// Store currency and amount recombined into the amount field.
    ///
    /// # Errors
    ///
    /// Returns [`PayqrError::UnknownField`] if the template has no amount
    /// field.
    pub fn set_amount(&mut self, currency: &str, amount: &str) -> Result<(), PayqrError> {
        let key = self
            .amount_key()
            .ok_or_else(|| PayqrError::UnknownField {
                key: AMOUNT_LABEL.to_string(),
            })?
            .to_string();
        self.set(&key, format!("{currency}{amount}"))
    }

    /// Whether any value differs from the last saved snapshot.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.values != self.saved
    }

    /// Take the current values as the saved snapshot.
    pub fn mark_saved(&mut self) {
        self.saved = self.values.clone();
    }

    /// Current values as render overrides, in field order.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    /// Field records carrying the current values.
    #[must_use]
    pub fn current_fields(&self) -> Vec<FieldRecord> {
        self.fields
            .iter()
            .map(|f| FieldRecord {
                value: self.value(&f.key).unwrap_or(&f.value).to_string(),
                ..f.clone()
            })
            .collect()
    }
}
