//! Utility modules shared across PayQR.
//!
//! - [`fs`] - directory creation, atomic writes and non-clobbering copies

pub mod fs;

pub use fs::{atomic_write, copy_if_absent, ensure_dir};
