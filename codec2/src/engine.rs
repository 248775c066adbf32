//! Codec engine capability.

use crate::mode::Mode;

/// Per-frame speech codec engine.
///
/// An engine creates opaque state objects, one per session, and encodes or
/// decodes exactly one frame per call against such a state. The state may
/// carry prediction history between calls, so callers must feed frames in
/// order and never share one state between concurrent calls.
///
/// Buffer lengths are guaranteed by the caller: `encode_frame` always
/// receives `samples_per_frame` samples and `bytes_per_frame` output bytes,
/// `decode_frame` the reverse.
pub trait Engine: Send + Sync {
    /// Opaque engine state for one session.
    type State: Send;

    /// Creates state for `mode`, or `None` if the engine cannot.
    fn create_state(&self, mode: Mode) -> Option<Self::State>;

    /// Releases state created by `create_state`.
    fn destroy_state(&self, state: Self::State);

    /// Returns the compressed size of one frame.
    fn bytes_per_frame(&self, state: &Self::State) -> usize;

    /// Returns the number of PCM samples in one frame.
    fn samples_per_frame(&self, state: &Self::State) -> usize;

    /// Encodes one frame of samples into `out`.
    fn encode_frame(&self, state: &mut Self::State, out: &mut [u8], pcm: &[i16]);

    /// Decodes one compressed frame into `out`.
    fn decode_frame(&self, state: &mut Self::State, out: &mut [i16], frame: &[u8]);
}
