//! Edit a user template's values and persist them.
//!
//! ```bash
//! payqr edit default --set N="New payee" --save-as rent
//! payqr edit rent --amount 15000,00
//! payqr edit rent --amount 100,00 --currency EUR
//! ```

use crate::catalog::{bootstrap, TemplateCatalog};
use crate::cli::common::CommandContext;
use crate::constants::DEFAULT_CURRENCY;
use crate::form::Session;
use crate::template::Overrides;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// Apply edits to a template through a form session.
#[derive(Args, Debug, Clone)]
pub struct EditCommand {
    /// Name of the template to edit
    #[arg(value_name = "NAME")]
    pub name: String,

    /// New value for a field key; repeatable
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// New amount, without currency
    #[arg(long, value_name = "AMOUNT")]
    pub amount: Option<String>,

    /// Currency for --amount (defaults to the current one)
    #[arg(long, value_name = "CODE", requires = "amount")]
    pub currency: Option<String>,

    /// Save under a new name instead of overwriting
    #[arg(long, value_name = "NEW")]
    pub save_as: Option<String>,

    /// User template directory (defaults to ~/.payqr/templates)
    #[arg(long, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,
}

impl EditCommand {
    /// Execute the edit command.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be opened, an edit targets a
    /// fixed or unknown field, or saving is refused or fails.
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let dir = ctx.templates_dir(self.templates_dir.as_deref())?;
        bootstrap(&ctx.install_root.bundled_dir(), &dir)?;
        let catalog = TemplateCatalog::discover(&dir)?;

        let mut session = Session::open_named(&ctx.install_root.config_path(), catalog, &self.name)?;

        let edits = Overrides::from_assignments(&self.set)?;
        for (key, value) in edits.iter() {
            session
                .form_mut()
                .set(key, value)
                .with_context(|| format!("Cannot edit '{key}' in template '{}'", self.name))?;
        }

        if let Some(amount) = &self.amount {
            let currency = match &self.currency {
                Some(currency) => currency.clone(),
                None => session.form().amount().map_or_else(
                    || DEFAULT_CURRENCY.to_string(),
                    |(currency, _)| currency,
                ),
            };
            session.form_mut().set_amount(&currency, amount)?;
        }

        match session.save(self.save_as.as_deref())? {
            Some(path) => println!(
                "{} template '{}' to {}",
                "Saved".green(),
                session.current_name(),
                path.display()
            ),
            None => println!("No changes to save"),
        }
        Ok(())
    }
}
