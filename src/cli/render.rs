//! Print the rendered payload without encoding it.

use crate::cli::common::{CommandContext, TemplateArgs};
use anyhow::Result;
use clap::Args;

/// Print the payload string for a template.
#[derive(Args, Debug, Clone)]
pub struct RenderCommand {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Drop overrides whose key no field declares
    #[arg(long)]
    pub no_extras: bool,
}

impl RenderCommand {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be loaded or an override is
    /// malformed.
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let overrides = self.template.overrides()?;
        let manager = ctx.load_manager(self.template.template.as_deref())?;
        println!("{}", manager.render_payload_with(&overrides, !self.no_extras));
        Ok(())
    }
}
