//! Error handling for PayQR
//!
//! This module provides the error types used across PayQR together with the
//! user-facing presentation layer that turns any failure into an actionable
//! message for the command line.
//!
//! # Error Categories
//!
//! PayQR has only a handful of fallible boundaries:
//!
//! - **Documents**: loading the base configuration or a template
//!   ([`PayqrError::DocumentParseError`])
//! - **Template catalog**: discovering, naming and saving templates
//!   ([`PayqrError::NoTemplatesFound`], [`PayqrError::TemplateNotFound`],
//!   [`PayqrError::TemplateExists`], [`PayqrError::ReadOnlyTemplate`])
//! - **Form edits**: changing a fixed or undeclared field
//!   ([`PayqrError::ReadOnlyField`], [`PayqrError::UnknownField`])
//! - **Encoder**: QR generation and image output ([`PayqrError::EncoderError`])
//! - **Input**: malformed command-line values ([`PayqrError::InvalidOverride`],
//!   [`PayqrError::InvalidSize`], [`PayqrError::ConfigError`])
//!
//! Merging, normalizing and rendering never fail: missing or malformed field
//! data degrades to an empty payload segment instead.
//!
//! # Error Handling Patterns
//!
//! Library code returns [`PayqrError`] or wraps it in [`anyhow::Error`] with
//! additional context. The binary converts whatever reaches `main` with
//! [`user_friendly_error`] and prints it with [`ErrorContext::display`].
//!
//! ```rust,no_run
//! use payqr::core::{PayqrError, user_friendly_error};
//!
//! let error = anyhow::Error::from(PayqrError::NoTemplatesFound {
//!     dir: "/home/user/.payqr/templates".to_string(),
//! });
//! user_friendly_error(error).display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for PayQR operations.
///
/// Variants carry owned strings rather than paths or source errors so the
/// type stays [`Clone`] and can be rebuilt into an [`ErrorContext`] without
/// consuming the original [`anyhow::Error`].
#[derive(Error, Debug)]
pub enum PayqrError {
    /// A configuration or template document could not be loaded.
    ///
    /// Covers missing files, unreadable files and malformed TOML alike.
    #[error("Failed to load document {path}: {reason}")]
    DocumentParseError {
        /// Path of the document that failed to load
        path: String,
        /// Underlying reason (I/O or TOML parser message)
        reason: String,
    },

    /// The template directory holds no template documents.
    #[error("No .toml templates found in {dir}")]
    NoTemplatesFound {
        /// Directory that was searched
        dir: String,
    },

    /// A template name does not exist in the catalog.
    #[error("Template '{name}' not found")]
    TemplateNotFound {
        /// Requested template name
        name: String,
    },

    /// A save-as target already exists.
    #[error("Template '{name}' already exists")]
    TemplateExists {
        /// Conflicting template name
        name: String,
    },

    /// The template cannot be overwritten in place.
    #[error("Template '{name}' is read-only; save it under a new name")]
    ReadOnlyTemplate {
        /// Name of the protected template
        name: String,
    },

    /// A template name is empty after sanitizing.
    #[error("Invalid template name: '{name}'")]
    InvalidTemplateName {
        /// Name as supplied by the user
        name: String,
    },

    /// A fixed field was edited.
    #[error("Field '{label}' is fixed and cannot be edited")]
    ReadOnlyField {
        /// Label of the fixed field
        label: String,
    },

    /// An edit names a key no field declares.
    #[error("No field with key '{key}'")]
    UnknownField {
        /// The key that was edited
        key: String,
    },

    /// QR generation or image output failed.
    #[error("QR encoder failed to {operation}: {reason}")]
    EncoderError {
        /// The encoder step that failed (e.g. "encode payload", "save image")
        operation: String,
        /// Encoder or image library message
        reason: String,
    },

    /// A `KEY=VALUE` override could not be parsed.
    #[error("Invalid override '{assignment}': expected KEY=VALUE")]
    InvalidOverride {
        /// The offending argument
        assignment: String,
    },

    /// An output size could not be parsed.
    #[error("Invalid image size '{value}': expected WIDTHxHEIGHT")]
    InvalidSize {
        /// The offending argument
        value: String,
    },

    /// Global settings are invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// A file system operation failed.
    #[error("File system error: {operation} ({path})")]
    FileSystemError {
        /// The operation that failed
        operation: String,
        /// Path involved in the operation
        path: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for PayqrError {
    fn clone(&self) -> Self {
        match self {
            Self::DocumentParseError {
                path,
                reason,
            } => Self::DocumentParseError {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::NoTemplatesFound {
                dir,
            } => Self::NoTemplatesFound {
                dir: dir.clone(),
            },
            Self::TemplateNotFound {
                name,
            } => Self::TemplateNotFound {
                name: name.clone(),
            },
            Self::TemplateExists {
                name,
            } => Self::TemplateExists {
                name: name.clone(),
            },
            Self::ReadOnlyTemplate {
                name,
            } => Self::ReadOnlyTemplate {
                name: name.clone(),
            },
            Self::InvalidTemplateName {
                name,
            } => Self::InvalidTemplateName {
                name: name.clone(),
            },
            Self::ReadOnlyField {
                label,
            } => Self::ReadOnlyField {
                label: label.clone(),
            },
            Self::UnknownField {
                key,
            } => Self::UnknownField {
                key: key.clone(),
            },
            Self::EncoderError {
                operation,
                reason,
            } => Self::EncoderError {
                operation: operation.clone(),
                reason: reason.clone(),
            },
            Self::InvalidOverride {
                assignment,
            } => Self::InvalidOverride {
                assignment: assignment.clone(),
            },
            Self::InvalidSize {
                value,
            } => Self::InvalidSize {
                value: value.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::FileSystemError {
                operation,
                path,
            } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            // io::Error is not Clone; rebuild it from kind and message
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Wraps a [`PayqrError`] with an optional suggestion (printed in green) and
/// optional details (printed in yellow).
///
/// ```rust,no_run
/// use payqr::core::{PayqrError, ErrorContext};
///
/// ErrorContext::new(PayqrError::TemplateNotFound { name: "rent".to_string() })
///     .with_suggestion("Run 'payqr templates' to list the available templates")
///     .display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying PayQR error
    pub error: PayqrError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub const fn new(error: PayqrError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions.
///
/// Recognizes, in order:
/// - an [`ErrorContext`] already attached to the error chain
/// - [`PayqrError`] variants anywhere in the chain, with tailored suggestions
/// - [`std::io::Error`] with file-system guidance
/// - anything else, reported with its full cause chain
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(ctx) = error.downcast_ref::<ErrorContext>() {
        return ErrorContext {
            error: ctx.error.clone(),
            suggestion: ctx.suggestion.clone(),
            details: ctx.details.clone(),
        };
    }

    // Commands wrap library errors with context, so look through the chain
    if let Some(payqr_error) = error.chain().find_map(|e| e.downcast_ref::<PayqrError>()) {
        return create_error_context(payqr_error.clone());
    }

    if let Some(io_error) = error.chain().find_map(|e| e.downcast_ref::<std::io::Error>()) {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(PayqrError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_details(error.to_string())
                .with_suggestion("Check file ownership and permissions of the target path");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(PayqrError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_details(error.to_string())
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(PayqrError::Other {
        message,
    })
}

/// Map each [`PayqrError`] variant to an [`ErrorContext`] with suggestions.
fn create_error_context(error: PayqrError) -> ErrorContext {
    match &error {
        PayqrError::DocumentParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Check that the file exists and is valid TOML: quoted strings, \
                 one [Label] table per field, settings before the first table",
            )
            .with_details("Every field table needs a 'key' and a 'value' entry"),
        PayqrError::NoTemplatesFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Add a template such as default.toml to the directory, or pass --template")
            .with_details("Templates are copied from the install location on first run"),
        PayqrError::TemplateNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'payqr templates' to list the available templates"),
        PayqrError::TemplateExists {
            ..
        } => ErrorContext::new(error).with_suggestion("Choose a different name for --save-as"),
        PayqrError::ReadOnlyTemplate {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Pass --save-as <NAME> to store the edited values as a new template"),
        PayqrError::InvalidTemplateName {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Template names may contain letters, digits, '_' and '-'",
        ),
        PayqrError::ReadOnlyField {
            ..
        } => ErrorContext::new(error)
            .with_details("Fixed fields come from the bundled config.toml and are shared by all templates"),
        PayqrError::UnknownField {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'payqr fields' to list the keys the template declares"),
        PayqrError::EncoderError {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Shorten the payload, lower the error correction level (--ec L), \
             or write to a path ending in .png",
        ),
        PayqrError::InvalidOverride {
            ..
        } => ErrorContext::new(error).with_suggestion("Use --set KEY=VALUE, for example --set I=RSD100,00"),
        PayqrError::InvalidSize {
            ..
        } => ErrorContext::new(error).with_suggestion("Use --size WIDTHxHEIGHT, for example --size 490x490"),
        PayqrError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check ~/.payqr/payqr.toml or the file passed with --config"),
        _ => ErrorContext::new(error),
    }
}
