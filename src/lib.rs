//! PayQR - payment payloads from TOML templates, encoded as QR codes
//!
//! PayQR turns a pair of TOML documents into the compact `key:value|...`
//! payload used by instant-payment QR codes and writes that payload as an
//! image.
//!
//! # Architecture Overview
//!
//! - A **configuration document** (`templates/config.toml`) holds the fixed
//!   protocol fields (`K`, `V`, `C`) and the rendering settings.
//! - A **template document** holds the variable fields of one kind of
//!   payment (payee, amount, purpose, ...).
//! - The two are merged, normalized into an ordered list of fields, and
//!   rendered with optional per-key overrides.
//!
//! # Core Modules
//!
//! - [`template`] - document loading, merging, field normalization, rendering
//!   and saving
//! - [`qr`] - QR encoding and image output
//! - [`catalog`] - template discovery, bootstrap and install layout
//! - [`form`] - editable form state and template sessions
//! - [`config`] - global user settings (`~/.payqr/payqr.toml`)
//! - [`cli`] - the `payqr` command line
//! - [`core`] - error types and user-facing error reporting
//! - [`utils`] - file system helpers
//!
//! # Document Shapes
//!
//! Field tables can be laid out three ways; all render identically:
//!
//! ```toml
//! # Flat: one table per field at the top level
//! [Amount]
//! key = "I"
//! value = "RSD3596,13"
//!
//! # Grouped: tables under `fields`
//! [fields.Amount]
//! key = "I"
//! value = "RSD3596,13"
//!
//! # Array: an array of tables under `fields`
//! [[fields]]
//! key = "I"
//! value = "RSD3596,13"
//! label = "Amount"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use payqr::qr::QrEncoder;
//! use payqr::template::{Overrides, TemplateManager};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let manager = TemplateManager::load(
//!     Path::new("templates/config.toml"),
//!     Path::new("templates/default.toml"),
//! )?;
//! let payload = manager.render_payload(&Overrides::new());
//! QrEncoder::new().encode_and_save(&payload, Path::new("payment.png"))?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod form;
pub mod qr;
pub mod template;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
