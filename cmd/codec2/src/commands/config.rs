//! Configuration management commands.

use clap::{Args, Subcommand};
use giztoy_codec2::Mode;

use crate::Cli;
use crate::config::load_config;

/// Manage CLI configuration.
///
/// Configuration is stored in ~/.giztoy/codec2/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Print the effective configuration
    Show,
    /// Update and save default values (mode, and engine via the global --engine)
    Set {
        /// Default mode
        #[arg(long)]
        mode: Option<Mode>,
    },
    /// Print the config file path
    Path,
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut cfg = load_config(cli.config.as_deref())?;

        match &self.command {
            ConfigSubcommand::Show => {
                if let Some(engine) = cli.engine {
                    cfg.engine = engine;
                }
                print!("{}", serde_yaml::to_string(&cfg)?);
            }
            ConfigSubcommand::Set { mode } => {
                if mode.is_none() && cli.engine.is_none() {
                    anyhow::bail!("nothing to set; pass --mode and/or --engine");
                }
                if let Some(mode) = mode {
                    cfg.mode = *mode;
                }
                if let Some(engine) = cli.engine {
                    cfg.engine = engine;
                }
                cfg.save()?;
                eprintln!("Saved {}", cfg.path().display());
            }
            ConfigSubcommand::Path => {
                println!("{}", cfg.path().display());
            }
        }
        Ok(())
    }
}
