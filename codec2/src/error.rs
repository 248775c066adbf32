//! Error types for Codec2 sessions and frame transcoding.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::mode::Mode;
use crate::registry::SessionHandle;

/// Errors returned by session and transcoding operations.
///
/// Every failure is reported synchronously to the caller of the failing
/// operation and no partial output is ever returned alongside it.
#[derive(Debug, Error)]
pub enum Codec2Error {
    /// The mode ordinal is not one of the seven recognized modes.
    #[error("codec2: unknown mode ordinal {0}")]
    InvalidMode(i32),

    /// The mode name could not be parsed.
    #[error("codec2: unknown mode name {0:?}")]
    UnknownModeName(String),

    /// The engine refused to produce a usable state handle.
    #[error("codec2: engine failed to create state for mode {0}")]
    EngineInit(Mode),

    /// The output buffer could not be allocated.
    #[error("codec2: failed to allocate output buffer of {len} elements")]
    Allocation {
        len: usize,
        #[source]
        source: TryReserveError,
    },

    /// The caller-provided input buffer cannot be addressed.
    #[error("codec2: cannot access input buffer: {0}")]
    BufferAccess(String),

    /// Decode input is not a whole number of frames.
    #[error("codec2: input of {len} bytes is not a multiple of {bytes_per_frame} bytes per frame")]
    FrameAlignment { len: usize, bytes_per_frame: usize },

    /// The computed output exceeds the addressable buffer limit.
    #[error("codec2: output of {len} bytes exceeds buffer limit of {limit} bytes")]
    OutputTooLarge { len: usize, limit: usize },

    /// The session has already released its engine state.
    #[error("codec2: session is closed")]
    Closed,

    /// No live session is registered under the handle.
    #[error("codec2: unknown session handle {0}")]
    UnknownSession(SessionHandle),
}

/// Result alias for Codec2 operations.
pub type Result<T> = std::result::Result<T, Codec2Error>;
