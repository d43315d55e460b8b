//! Configuration management for PayQR
//!
//! PayQR reads two kinds of configuration:
//!
//! 1. **Base configuration** (`<install root>/templates/config.toml`) - the
//!    fixed payload fields and rendering settings. It is a template document
//!    and is handled by [`crate::template`].
//! 2. **Global configuration** (`~/.payqr/payqr.toml`) - user preferences for
//!    template storage and QR output, handled by [`GlobalConfig`].
//!
//! # Modules
//!
//! - `global` - global configuration loading and default locations

pub mod global;

pub use global::{GlobalConfig, QrSettings};
