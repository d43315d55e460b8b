//! Unit test suite for PayQR
//!
//! Library-level tests that exercise the public API across modules without
//! running the binary.
//!
//! # Running Unit Tests
//!
//! ```bash
//! cargo test --test unit
//! ```
//!
//! # Test Organization
//!
//! - **properties**: ordering, trimming, override and shape-equivalence
//!   properties of merge/normalize/render
//! - **scenarios**: end-to-end rendering examples
//! - **catalog**: template discovery and bootstrap against real directories
//! - **session**: form sessions, switching and saving
//! - **writer**: saved templates reload to the same fields

mod catalog;
mod properties;
mod scenarios;
mod writer;
