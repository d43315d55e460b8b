//! List the normalized fields of a template.
//!
//! ```bash
//! payqr fields
//! payqr fields --template rent.toml --format json
//! ```

use crate::cli::common::CommandContext;
use crate::form::format_label;
use crate::template::FieldRecord;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// Output format for the field listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One aligned line per field
    #[default]
    Text,
    /// A JSON array of field objects
    Json,
}

/// List fields in render order.
#[derive(Args, Debug, Clone)]
pub struct FieldsCommand {
    /// Template document to inspect (defaults to the bundled default template)
    #[arg(short, long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct FieldView<'a> {
    #[serde(flatten)]
    field: &'a FieldRecord,
    fixed: bool,
}

impl FieldsCommand {
    /// Execute the fields command.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be loaded.
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let manager = ctx.load_manager(self.template.as_deref())?;
        let views: Vec<FieldView<'_>> = manager
            .fields()
            .iter()
            .map(|field| FieldView {
                field,
                fixed: manager.is_fixed(&field.label),
            })
            .collect();

        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&views)
                    .context("Failed to serialize fields")?;
                println!("{json}");
            }
            OutputFormat::Text => {
                if views.is_empty() {
                    println!("{}", "No fields".yellow());
                }
                for view in &views {
                    let caption = format_label(&view.field.label, &view.field.key);
                    let mut line = format!("{caption:<32} {}", view.field.value);
                    if view.fixed {
                        line = format!("{line} {}", "(fixed)".dimmed());
                    }
                    if view.field.is_required() {
                        line = format!("{line} {}", "*".red());
                    }
                    println!("{line}");
                }
            }
        }
        Ok(())
    }
}
