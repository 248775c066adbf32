//! Mode listing.

use clap::Args;
use giztoy_codec2::Mode;

use crate::Cli;

/// List supported modes with their nominal frame geometry.
#[derive(Args)]
pub struct ModesCommand {}

impl ModesCommand {
    pub fn run(&self, _cli: &Cli) -> anyhow::Result<()> {
        println!(
            "{:<8} {:<6} {:>8} {:>9} {:>8} {:>7}",
            "ORDINAL", "MODE", "BITRATE", "SAMPLES", "BYTES", "FRAME"
        );
        for mode in Mode::ALL {
            let g = mode.nominal_geometry();
            println!(
                "{:<8} {:<6} {:>8} {:>9} {:>8} {:>5}ms",
                mode.ordinal(),
                mode,
                mode.bitrate(),
                g.samples_per_frame(),
                g.bytes_per_frame(),
                g.frame_duration().as_millis()
            );
        }
        Ok(())
    }
}
