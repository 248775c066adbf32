//! Engine backed by the system libcodec2.

use std::ptr::NonNull;

use crate::engine::Engine;
use crate::ffi;
use crate::mode::Mode;

/// libcodec2 engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibCodec2;

/// Owned `struct CODEC2 *`.
#[derive(Debug)]
pub struct LibCodec2State(NonNull<ffi::Codec2>);

// Safety: The state is only touched through `&mut` and never shared across threads.
unsafe impl Send for LibCodec2State {}

impl Engine for LibCodec2 {
    type State = LibCodec2State;

    fn create_state(&self, mode: Mode) -> Option<Self::State> {
        let handle = unsafe { ffi::codec2_create(mode.engine_id()) };
        NonNull::new(handle).map(LibCodec2State)
    }

    fn destroy_state(&self, state: Self::State) {
        unsafe { ffi::codec2_destroy(state.0.as_ptr()) };
    }

    fn bytes_per_frame(&self, state: &Self::State) -> usize {
        let n = unsafe { ffi::codec2_bytes_per_frame(state.0.as_ptr()) };
        usize::try_from(n).unwrap_or(0)
    }

    fn samples_per_frame(&self, state: &Self::State) -> usize {
        let n = unsafe { ffi::codec2_samples_per_frame(state.0.as_ptr()) };
        usize::try_from(n).unwrap_or(0)
    }

    fn encode_frame(&self, state: &mut Self::State, out: &mut [u8], pcm: &[i16]) {
        debug_assert_eq!(out.len(), self.bytes_per_frame(state));
        debug_assert_eq!(pcm.len(), self.samples_per_frame(state));
        unsafe { ffi::codec2_encode(state.0.as_ptr(), out.as_mut_ptr(), pcm.as_ptr()) };
    }

    fn decode_frame(&self, state: &mut Self::State, out: &mut [i16], frame: &[u8]) {
        debug_assert_eq!(out.len(), self.samples_per_frame(state));
        debug_assert_eq!(frame.len(), self.bytes_per_frame(state));
        unsafe { ffi::codec2_decode(state.0.as_ptr(), out.as_mut_ptr(), frame.as_ptr()) };
    }
}
