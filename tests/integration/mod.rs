//! Integration test suite for PayQR
//!
//! End-to-end tests that run the `payqr` binary against temporary install
//! roots and template directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **errors**: failure reporting and exit codes
//! - **generate**: image generation, the default action
//! - **subcommands**: `render`, `fields`, `templates` and `edit`

mod errors;
mod generate;
mod subcommands;

use assert_cmd::Command;
use payqr::test_utils::TemplateFixture;
use std::path::Path;

/// `payqr` with logging off, the fixture as install root and an isolated
/// global settings path.
pub fn payqr(fixture: &TemplateFixture) -> Command {
    let mut cmd = Command::cargo_bin("payqr").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("PAYQR_INSTALL_ROOT")
        .arg("--install-root")
        .arg(fixture.root())
        .arg("--config")
        .arg(fixture.root().join("payqr.toml"));
    cmd
}

/// Whether a file starts with the PNG signature.
pub fn is_png(path: &Path) -> bool {
    std::fs::read(path).is_ok_and(|bytes| bytes.starts_with(b"\x89PNG\r\n\x1a\n"))
}
