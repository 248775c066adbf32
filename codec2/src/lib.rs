//! Codec2 frame transcoding.
//!
//! This crate adapts arbitrary-length runs of 16-bit PCM to the fixed-size
//! frames of the Codec2 low-bitrate speech codec and back:
//!
//! - `mode`: the seven operating modes and their caller-facing ordinals
//! - `session`: one engine state bound to a mode, released exactly once
//! - `transcoder`: frame windowing, tail padding and alignment checks
//! - `source`: borrowed views over caller-owned PCM
//! - `registry`: handle-based session table for host bindings
//! - `engine`: the per-frame codec capability the rest is written against
//!
//! The compression itself lives behind [`Engine`]. Enable the `native`
//! feature to link the system libcodec2 as `LibCodec2`; [`testing::DcEngine`]
//! is an in-process stand-in.
//!
//! # Example
//!
//! ```rust
//! use giztoy_codec2::{Mode, Registry, testing::DcEngine};
//!
//! let registry = Registry::new(DcEngine::new());
//! let handle = registry.create_session(Mode::Mode1300.ordinal())?;
//!
//! // 90 ms of silence at 8 kHz, 16-bit little-endian
//! let pcm = vec![0u8; 720 * 2];
//! let frames = registry.encode(handle, &pcm)?;
//! assert_eq!(frames.len(), 3 * 7);
//!
//! let decoded = registry.decode(handle, &frames)?;
//! assert_eq!(decoded.len(), 3 * 320 * 2);
//!
//! registry.destroy_session(handle);
//! # Ok::<(), giztoy_codec2::Codec2Error>(())
//! ```

pub mod engine;
pub mod error;
#[cfg(feature = "native")]
mod ffi;
pub mod geometry;
pub mod mode;
#[cfg(feature = "native")]
mod native;
pub mod registry;
pub mod session;
pub mod source;
pub mod testing;
pub mod transcoder;

pub use engine::Engine;
pub use error::{Codec2Error, Result};
pub use geometry::{FrameGeometry, MAX_BUFFER_LEN};
pub use mode::Mode;
#[cfg(feature = "native")]
pub use native::{LibCodec2, LibCodec2State};
pub use registry::{Registry, SessionHandle};
pub use session::Session;
pub use source::{PcmSource, PcmView};

/// Sample rate, in Hz, of the mono PCM every mode consumes and produces.
pub const SAMPLE_RATE: u32 = 8000;
