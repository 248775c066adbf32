//! CLI commands module.

mod config;
mod modes;
mod transcode;

pub use config::ConfigCommand;
pub use modes::ModesCommand;
pub use transcode::{DecodeCommand, EncodeCommand};
