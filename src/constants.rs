//! Global constants used throughout the PayQR codebase.
//!
//! File names, directory names and rendering defaults that more than one
//! module needs to agree on.

/// Name of the base configuration document holding the fixed fields.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Stem of the configuration document; never listed as a template.
pub const CONFIG_STEM: &str = "config";

/// Template selected when no explicit choice is made.
pub const DEFAULT_TEMPLATE: &str = "default";

/// Directory holding the bundled templates below the install root.
pub const TEMPLATES_DIR_NAME: &str = "templates";

/// Per-user data directory below the home directory.
pub const USER_DIR_NAME: &str = ".payqr";

/// Global settings file inside [`USER_DIR_NAME`].
pub const GLOBAL_CONFIG_FILE_NAME: &str = "payqr.toml";

/// Environment variable overriding the install root.
pub const INSTALL_ROOT_ENV: &str = "PAYQR_INSTALL_ROOT";

/// Top-level document key holding the rendering separator between segments.
pub const SEPARATOR_KEY: &str = "separator";

/// Top-level document key holding the separator between key and value.
pub const KV_SEP_KEY: &str = "kv_sep";

/// Top-level document key controlling omission of empty values.
pub const TRIM_EMPTY_KEY: &str = "trim_empty";

/// The three top-level keys that are rendering settings rather than fields.
pub const SETTING_KEYS: [&str; 3] = [SEPARATOR_KEY, KV_SEP_KEY, TRIM_EMPTY_KEY];

/// Top-level key used by the array and grouped-table document shapes.
pub const FIELDS_KEY: &str = "fields";

/// Default separator between rendered `key:value` segments.
pub const DEFAULT_SEPARATOR: &str = "|";

/// Default separator between a field key and its value.
pub const DEFAULT_KV_SEP: &str = ":";

/// Labels of the protocol-constant fields that are never user-editable.
pub const READONLY_LABELS: [&str; 3] = ["IdentificationCode", "Version", "CodeSet"];

/// Currency assumed when an amount value carries no currency prefix.
pub const DEFAULT_CURRENCY: &str = "RSD";

/// Label of the field whose value is split into currency and amount.
pub const AMOUNT_LABEL: &str = "Amount";
