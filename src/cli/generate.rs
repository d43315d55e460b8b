//! Render a payload and write it as a QR image.
//!
//! This is what `payqr` does when no subcommand is given:
//!
//! ```bash
//! payqr --out payment.png
//! payqr --template rent.toml --set I=RSD15000,00 --out rent.png --ec M --size 490x490
//! ```

use crate::cli::common::{CommandContext, QrArgs, TemplateArgs};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

/// Arguments of the default image-generating action.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Output image path; the format follows the extension (e.g. .png)
    #[arg(short, long, value_name = "PATH", required = true)]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub qr: QrArgs,
}

impl GenerateCommand {
    /// Render the payload, encode it and save the image.
    ///
    /// # Errors
    ///
    /// Returns an error if no output path was given, the template cannot be
    /// loaded, an override is malformed, or encoding or saving fails.
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let out = self.out.context("An output path is required: pass --out <PATH>")?;
        let overrides = self.template.overrides()?;
        let manager = ctx.load_manager(self.template.template.as_deref())?;

        for field in manager.fields().iter().filter(|f| f.is_required()) {
            let value = overrides.get(&field.key).unwrap_or(&field.value);
            if value.is_empty() {
                warn!(field = %field.label, key = %field.key, "Required field is empty");
            }
        }

        let payload = manager.render_payload(&overrides);
        info!(%payload, "Rendered payload");

        let encoder = self.qr.encoder(&ctx.global.qr)?;
        let saved = encoder.encode_and_save(&payload, &out)?;

        println!("Saved QR to {}", saved.display());
        Ok(())
    }
}
