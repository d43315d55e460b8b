//! Command-line interface for PayQR.
//!
//! Without a subcommand `payqr` renders a template and writes the QR image.
//! The subcommands inspect and edit templates.
//!
//! # Available Commands
//!
//! - *(none)* - render a template and save the QR image (`--out` required)
//! - `render` - print the payload string
//! - `fields` - list the normalized fields of a template
//! - `templates` - list the user's templates, installing the bundled ones first
//! - `edit` - change template values and save them
//!
//! # Examples
//!
//! ```bash
//! # Bundled default template, amount overridden
//! payqr --set I=RSD1500,00 --out payment.png
//!
//! # Inspect a template
//! payqr fields --template ~/.payqr/templates/rent.toml --format json
//!
//! # Keep an edited copy of the default template
//! payqr edit default --set N="Landlord" --save-as rent
//! ```
//!
//! # Configuration
//!
//! | Source | Purpose |
//! |--------|---------|
//! | `<install root>/templates/config.toml` | Fixed fields and separators |
//! | `~/.payqr/payqr.toml` (or `--config`) | Template directory, QR defaults |
//! | command-line flags | Override both of the above |

pub mod common;
pub mod edit;
pub mod fields;
pub mod generate;
pub mod render;
pub mod templates;


use crate::catalog::InstallRoot;
use crate::config::GlobalConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};
use common::CommandContext;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Default log filter when neither `--verbose` nor `RUST_LOG` is given.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Runtime configuration for CLI execution.
///
/// Built from the global flags by [`Cli::build_config`]; tests and
/// programmatic callers can construct one directly and pass it to
/// [`Cli::execute_with_config`].
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive. `None` disables logging entirely.
    pub log_level: Option<String>,

    /// Custom path to the global settings file.
    pub config_path: Option<PathBuf>,

    /// Explicit install root holding the bundled templates.
    pub install_root: Option<PathBuf>,
}

impl CliConfig {
    /// Configuration with logging disabled and default locations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the tracing subscriber.
    ///
    /// Logs go to stderr so payloads printed on stdout stay clean. Calling
    /// this more than once is harmless; only the first subscriber sticks.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(level))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Render Serbian IPS payment payloads from TOML templates and encode them
/// as QR codes.
#[derive(Parser, Debug)]
#[command(
    name = "payqr",
    about = "Render payment payloads from TOML templates and save them as QR images",
    version,
    subcommand_negates_reqs = true
)]
pub struct Cli {
    /// Inspect or edit templates instead of generating an image.
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: generate::GenerateCommand,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Disable logging entirely
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the global settings file (defaults to ~/.payqr/payqr.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding templates/config.toml and the bundled templates
    /// (defaults to $PAYQR_INSTALL_ROOT, then the executable's location)
    #[arg(long, global = true, value_name = "DIR")]
    install_root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the rendered payload
    Render(render::RenderCommand),

    /// List the fields of a template
    Fields(fields::FieldsCommand),

    /// List user templates
    Templates(templates::TemplatesCommand),

    /// Edit and save a user template
    Edit(edit::EditCommand),
}

impl Cli {
    /// Execute the parsed command line.
    ///
    /// # Errors
    ///
    /// Returns whatever error the selected command fails with.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Translate the global flags into a [`CliConfig`].
    ///
    /// - `--verbose` logs at `debug`
    /// - `--quiet` disables logging
    /// - otherwise `RUST_LOG` is honoured, falling back to `warn`
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some(std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()))
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
            install_root: self.install_root.clone(),
        }
    }

    /// Execute with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the global settings cannot be loaded or the
    /// command fails.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let global = GlobalConfig::load_with_optional(config.config_path.clone())?;
        let install_root = InstallRoot::resolve(config.install_root.as_deref());
        debug!(install_root = %install_root.path().display(), "Resolved install root");

        let ctx = CommandContext::new(install_root, global);

        match self.command {
            Some(Commands::Render(cmd)) => cmd.execute(&ctx),
            Some(Commands::Fields(cmd)) => cmd.execute(&ctx),
            Some(Commands::Templates(cmd)) => cmd.execute(&ctx),
            Some(Commands::Edit(cmd)) => cmd.execute(&ctx),
            None => self.generate.execute(&ctx),
        }
    }
}
