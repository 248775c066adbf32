//! Encode and decode commands.

use std::io::{Read, Write};

use anyhow::Context as _;
use clap::Args;
use giztoy_codec2::testing::DcEngine;
use giztoy_codec2::{Engine, Mode, PcmSource, Session};
use tracing::info;

use crate::Cli;
use crate::config::{EngineKind, load_config};

/// Arguments shared by encode and decode.
#[derive(Args)]
pub struct TranscodeArgs {
    /// Input file ('-' for stdin)
    input: String,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Codec2 mode, e.g. 3200, 1300, 700C (overrides config)
    #[arg(short = 'm', long)]
    mode: Option<Mode>,
}

/// Encode raw s16le PCM into concatenated Codec2 frames.
///
/// A trailing partial frame is padded with silence.
#[derive(Args)]
pub struct EncodeCommand {
    #[command(flatten)]
    args: TranscodeArgs,
}

/// Decode concatenated Codec2 frames into raw s16le PCM.
///
/// Input must be a whole number of frames for the selected mode.
#[derive(Args)]
pub struct DecodeCommand {
    #[command(flatten)]
    args: TranscodeArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Encode,
    Decode,
}

impl EncodeCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        self.args.run(cli, Direction::Encode)
    }
}

impl DecodeCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        self.args.run(cli, Direction::Decode)
    }
}

impl TranscodeArgs {
    fn run(&self, cli: &Cli, direction: Direction) -> anyhow::Result<()> {
        let cfg = load_config(cli.config.as_deref())?;
        let mode = self.mode.unwrap_or(cfg.mode);
        let engine = cli.engine.unwrap_or(cfg.engine);

        let input = read_input(&self.input)?;
        let output = transcode_with(engine, mode, direction, &input)?;
        info!(
            mode = %mode,
            ?direction,
            input = input.len(),
            output = output.len(),
            "transcoded"
        );

        write_output(self.output.as_deref(), &output)
    }
}

/// Runs one transcoding pass with the selected engine.
pub(crate) fn transcode_with(
    engine: EngineKind,
    mode: Mode,
    direction: Direction,
    input: &[u8],
) -> anyhow::Result<Vec<u8>> {
    match engine {
        EngineKind::Dc => transcode(DcEngine::new().silent(), mode, direction, input),
        #[cfg(feature = "native")]
        EngineKind::Native => transcode(giztoy_codec2::LibCodec2, mode, direction, input),
        #[cfg(not(feature = "native"))]
        EngineKind::Native => {
            anyhow::bail!("built without libcodec2; rebuild with --features native or pass --engine dc")
        }
    }
}

fn transcode<E: Engine>(
    engine: E,
    mode: Mode,
    direction: Direction,
    input: &[u8],
) -> anyhow::Result<Vec<u8>> {
    let mut session = Session::open(engine, mode)?;
    let output = match direction {
        Direction::Encode => session.encode_source(PcmSource::from_le_bytes(input))?,
        Direction::Decode => session.decode_to_le_bytes(input)?,
    };
    session.close()?;
    Ok(output)
}

fn read_input(path: &str) -> anyhow::Result<Vec<u8>> {
    if path == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("reading {}", path))
}

fn write_output(path: Option<&str>, data: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(p) => std::fs::write(p, data).with_context(|| format!("writing {}", p)),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data).context("writing stdout")?;
            stdout.flush().context("flushing stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giztoy_codec2::Codec2Error;

    fn le_bytes(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn test_encode_pads_to_whole_frames() {
        let pcm = le_bytes(&[100; 330]);
        let out = transcode_with(EngineKind::Dc, Mode::Mode1300, Direction::Encode, &pcm).unwrap();
        assert_eq!(out.len(), 2 * 7);
    }

    #[test]
    fn test_round_trip() {
        let pcm = le_bytes(&[-42; 320 * 3]);
        let frames = transcode_with(EngineKind::Dc, Mode::Mode700C, Direction::Encode, &pcm).unwrap();
        let decoded = transcode_with(EngineKind::Dc, Mode::Mode700C, Direction::Decode, &frames).unwrap();
        assert_eq!(decoded, pcm);
    }

    #[test]
    fn test_decode_misaligned() {
        let err = transcode_with(EngineKind::Dc, Mode::Mode3200, Direction::Decode, &[0; 9]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Codec2Error>(),
            Some(Codec2Error::FrameAlignment { .. })
        ));
    }

    #[test]
    fn test_encode_odd_byte_input() {
        let err = transcode_with(EngineKind::Dc, Mode::Mode3200, Direction::Encode, &[0; 3]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Codec2Error>(),
            Some(Codec2Error::BufferAccess(_))
        ));
    }

    #[test]
    fn test_file_io() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.raw");
        let output = dir.path().join("out.c2");
        std::fs::write(&input, le_bytes(&[0; 200])).unwrap();

        let data = read_input(input.to_str().unwrap()).unwrap();
        let frames = transcode_with(EngineKind::Dc, Mode::Mode3200, Direction::Encode, &data).unwrap();
        write_output(output.to_str(), &frames).unwrap();

        assert_eq!(std::fs::read(&output).unwrap().len(), 2 * 8);
        assert!(read_input(dir.path().join("missing").to_str().unwrap()).is_err());
    }
}
