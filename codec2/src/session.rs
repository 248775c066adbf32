//! Codec sessions.

use tracing::debug;

use crate::engine::Engine;
use crate::error::{Codec2Error, Result};
use crate::geometry::FrameGeometry;
use crate::mode::Mode;
use crate::source::PcmSource;
use crate::transcoder;

/// A live binding between a mode and one engine state.
///
/// The session owns its engine state: the state is created once in
/// [`Session::open`] and destroyed exactly once, either by [`Session::close`]
/// or when the session is dropped. A session is `Send` but every
/// transcoding call takes `&mut self`, so at most one call can be in
/// flight against it.
///
/// # Example
///
/// ```
/// use giztoy_codec2::{Mode, Session, testing::DcEngine};
///
/// let mut session = Session::open(DcEngine::new(), Mode::Mode1300)?;
/// let frames = session.encode(&vec![0i16; 500])?;
/// assert_eq!(frames.len(), 2 * session.bytes_per_frame());
///
/// let pcm = session.decode(&frames)?;
/// assert_eq!(pcm.len(), 2 * session.samples_per_frame());
/// # Ok::<(), giztoy_codec2::Codec2Error>(())
/// ```
pub struct Session<E: Engine> {
    engine: E,
    state: Option<E::State>,
    mode: Mode,
    geometry: FrameGeometry,
}

impl<E: Engine> Drop for Session<E> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            self.engine.destroy_state(state);
            debug!(mode = %self.mode, "codec2: session released on drop");
        }
    }
}

impl<E: Engine> Session<E> {
    /// Opens a session for `mode`.
    ///
    /// Fails with [`Codec2Error::EngineInit`] if the engine returns no state
    /// or reports an empty frame geometry.
    pub fn open(engine: E, mode: Mode) -> Result<Self> {
        let Some(state) = engine.create_state(mode) else {
            return Err(Codec2Error::EngineInit(mode));
        };

        let geometry = FrameGeometry::try_new(
            engine.samples_per_frame(&state),
            engine.bytes_per_frame(&state),
        );
        let Some(geometry) = geometry else {
            engine.destroy_state(state);
            return Err(Codec2Error::EngineInit(mode));
        };

        debug!(
            mode = %mode,
            samples_per_frame = geometry.samples_per_frame(),
            bytes_per_frame = geometry.bytes_per_frame(),
            "codec2: session opened"
        );

        Ok(Self {
            engine,
            state: Some(state),
            mode,
            geometry,
        })
    }

    /// Opens a session from a caller-facing mode ordinal.
    ///
    /// An unrecognized ordinal fails with [`Codec2Error::InvalidMode`]
    /// before the engine is consulted.
    pub fn open_ordinal(engine: E, ordinal: i32) -> Result<Self> {
        let mode = Mode::from_ordinal(ordinal)?;
        Self::open(engine, mode)
    }

    /// Returns the mode bound at open.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the frame geometry reported by the engine at open.
    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    /// Returns the number of PCM samples per frame.
    pub fn samples_per_frame(&self) -> usize {
        self.geometry.samples_per_frame()
    }

    /// Returns the number of compressed bytes per frame.
    pub fn bytes_per_frame(&self) -> usize {
        self.geometry.bytes_per_frame()
    }

    /// Returns the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns true once the engine state has been released.
    pub fn is_closed(&self) -> bool {
        self.state.is_none()
    }

    /// Releases the engine state.
    ///
    /// A second call returns [`Codec2Error::Closed`] and leaves the engine
    /// untouched.
    pub fn close(&mut self) -> Result<()> {
        let state = self.state.take().ok_or(Codec2Error::Closed)?;
        self.engine.destroy_state(state);
        debug!(mode = %self.mode, "codec2: session closed");
        Ok(())
    }

    pub(crate) fn parts_mut(&mut self) -> Result<(&E, &mut E::State)> {
        let state = self.state.as_mut().ok_or(Codec2Error::Closed)?;
        Ok((&self.engine, state))
    }

    /// Encodes PCM samples into concatenated frames.
    ///
    /// See [`transcoder::encode`].
    pub fn encode(&mut self, pcm: &[i16]) -> Result<Vec<u8>> {
        transcoder::encode(self, pcm)
    }

    /// Encodes PCM from a borrowed source.
    pub fn encode_source(&mut self, source: PcmSource<'_>) -> Result<Vec<u8>> {
        transcoder::encode_source(self, source)
    }

    /// Decodes concatenated frames into PCM samples.
    ///
    /// See [`transcoder::decode`].
    pub fn decode(&mut self, frames: &[u8]) -> Result<Vec<i16>> {
        transcoder::decode(self, frames)
    }

    /// Decodes concatenated frames into little-endian PCM bytes.
    pub fn decode_to_le_bytes(&mut self, frames: &[u8]) -> Result<Vec<u8>> {
        transcoder::decode_to_le_bytes(self, frames)
    }
}

impl<E: Engine> std::fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("mode", &self.mode)
            .field("geometry", &self.geometry)
            .field("closed", &self.is_closed())
            .finish()
    }
}
