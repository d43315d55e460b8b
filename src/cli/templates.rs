//! List the user's templates, seeding them from the bundled set first.

use crate::catalog::{bootstrap, TemplateCatalog};
use crate::cli::common::CommandContext;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// List user templates, marking the default one.
#[derive(Args, Debug, Clone)]
pub struct TemplatesCommand {
    /// User template directory (defaults to ~/.payqr/templates)
    #[arg(long, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,
}

impl TemplatesCommand {
    /// Execute the templates command.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be prepared or holds no
    /// templates.
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let dir = ctx.templates_dir(self.templates_dir.as_deref())?;
        let copied = bootstrap(&ctx.install_root.bundled_dir(), &dir)?;
        for file in &copied {
            println!("{} {file}", "Installed".green());
        }

        let catalog = TemplateCatalog::discover(&dir)?;
        println!("{}", format!("Templates in {}:", catalog.dir().display()).bold());
        for name in catalog.names() {
            if name == catalog.default_name() {
                println!("  {} {}", name.green(), "(default)".dimmed());
            } else {
                println!("  {name}");
            }
        }
        Ok(())
    }
}
