//! Core types for PayQR
//!
//! This module holds the error taxonomy shared by every other module and the
//! user-facing error presentation used by the binary.
//!
//! - [`PayqrError`] - typed failures of the fallible boundaries (document
//!   loading, template catalog, QR encoder, user input)
//! - [`ErrorContext`] - an error plus optional details and suggestion
//! - [`user_friendly_error`] - convert any [`anyhow::Error`] for display
//!
//! # Example
//!
//! ```rust
//! use payqr::core::{PayqrError, ErrorContext};
//!
//! let ctx = ErrorContext::new(PayqrError::TemplateExists { name: "rent".to_string() })
//!     .with_suggestion("Choose a different name");
//! assert!(ctx.to_string().contains("already exists"));
//! ```

pub mod error;

pub use error::{user_friendly_error, ErrorContext, PayqrError};
