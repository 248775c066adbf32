//! Codec2 CLI - transcode raw PCM to and from Codec2 frames.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{ConfigCommand, DecodeCommand, EncodeCommand, ModesCommand};
use config::EngineKind;

/// Codec2 CLI - transcode raw PCM to and from Codec2 frames.
///
/// PCM is headerless 16-bit little-endian mono at 8 kHz. Compressed
/// output is a plain concatenation of fixed-size frames with no container.
///
/// Defaults are read from ~/.giztoy/codec2/config.yaml.
#[derive(Parser)]
#[command(name = "codec2")]
#[command(about = "Codec2 frame transcoder")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.giztoy/codec2/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Codec engine (overrides config)
    #[arg(long, global = true, value_enum)]
    pub engine: Option<EngineKind>,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List supported modes
    Modes(ModesCommand),
    /// Encode raw PCM into frames
    Encode(EncodeCommand),
    /// Decode frames into raw PCM
    Decode(DecodeCommand),
    /// Manage CLI configuration
    Config(ConfigCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Modes(cmd) => cmd.run(&cli),
        Commands::Encode(cmd) => cmd.run(&cli),
        Commands::Decode(cmd) => cmd.run(&cli),
        Commands::Config(cmd) => cmd.run(&cli),
    }
}
