//! In-process engine for tests and benchmarks.
//!
//! [`DcEngine`] stands in for libcodec2 where linking the real library is
//! not wanted. Each frame carries a sequence byte followed by the mean of
//! its window as a little-endian `i16`; decoding fills the whole frame with
//! that mean. Constant and per-frame stepped signals therefore survive a
//! round trip exactly, while anything else comes back as its frame means.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::engine::Engine;
use crate::geometry::FrameGeometry;
use crate::mode::Mode;

/// Smallest frame the DC layout fits in.
pub const MIN_BYTES_PER_FRAME: usize = 3;

/// Deterministic DC-level engine.
///
/// Clones share one [`DcStats`].
#[derive(Debug, Clone, Default)]
pub struct DcEngine {
    geometry: Option<FrameGeometry>,
    fail_create: bool,
    silent: bool,
    stats: Arc<DcStats>,
}

/// Observations recorded by a [`DcEngine`] and its clones.
#[derive(Debug, Default)]
pub struct DcStats {
    created: AtomicUsize,
    destroyed: AtomicUsize,
    encoded: AtomicUsize,
    decoded: AtomicUsize,
    windows: Mutex<Vec<Vec<i16>>>,
    sequence: Mutex<Vec<u8>>,
    out_of_order: AtomicUsize,
}

/// Per-session state of a [`DcEngine`].
#[derive(Debug)]
pub struct DcState {
    geometry: FrameGeometry,
    encode_seq: u8,
    decode_seq: u8,
}

impl DcEngine {
    /// Creates an engine using each mode's nominal geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine that reports `samples` and `bytes` per frame for
    /// every mode.
    ///
    /// # Panics
    ///
    /// Panics if `samples` is zero or `bytes` is below
    /// [`MIN_BYTES_PER_FRAME`].
    pub fn with_geometry(samples: usize, bytes: usize) -> Self {
        assert!(samples > 0, "samples per frame must be positive");
        assert!(
            bytes >= MIN_BYTES_PER_FRAME,
            "bytes per frame must be at least {}",
            MIN_BYTES_PER_FRAME
        );
        Self {
            geometry: FrameGeometry::try_new(samples, bytes),
            ..Self::default()
        }
    }

    /// Makes every `create_state` call fail.
    pub fn failing(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Stops recording windows and sequence bytes; counters still advance.
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    /// Returns the shared observations.
    pub fn stats(&self) -> &DcStats {
        &self.stats
    }
}

impl DcStats {
    /// Number of states created.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Number of states destroyed.
    pub fn destroyed(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Number of states currently alive.
    pub fn live(&self) -> usize {
        self.created() - self.destroyed()
    }

    /// Number of frames encoded across all states.
    pub fn encoded_frames(&self) -> usize {
        self.encoded.load(Ordering::SeqCst)
    }

    /// Every window passed to `encode_frame`, in call order.
    pub fn windows(&self) -> Vec<Vec<i16>> {
        self.windows.lock().clone()
    }

    /// Number of frames decoded across all states.
    pub fn decoded_frames(&self) -> usize {
        self.decoded.load(Ordering::SeqCst)
    }

    /// Sequence bytes of decoded frames, in call order.
    pub fn decoded_sequence(&self) -> Vec<u8> {
        self.sequence.lock().clone()
    }

    /// Number of frames decoded with an unexpected sequence byte.
    pub fn out_of_order(&self) -> usize {
        self.out_of_order.load(Ordering::SeqCst)
    }
}

impl Engine for DcEngine {
    type State = DcState;

    fn create_state(&self, mode: Mode) -> Option<Self::State> {
        if self.fail_create {
            return None;
        }
        self.stats.created.fetch_add(1, Ordering::SeqCst);
        Some(DcState {
            geometry: self.geometry.unwrap_or_else(|| mode.nominal_geometry()),
            encode_seq: 0,
            decode_seq: 0,
        })
    }

    fn destroy_state(&self, _state: Self::State) {
        self.stats.destroyed.fetch_add(1, Ordering::SeqCst);
    }

    fn bytes_per_frame(&self, state: &Self::State) -> usize {
        state.geometry.bytes_per_frame()
    }

    fn samples_per_frame(&self, state: &Self::State) -> usize {
        state.geometry.samples_per_frame()
    }

    fn encode_frame(&self, state: &mut Self::State, out: &mut [u8], pcm: &[i16]) {
        let sum: i64 = pcm.iter().map(|&s| i64::from(s)).sum();
        let mean = (sum / pcm.len().max(1) as i64) as i16;

        out.fill(0);
        out[0] = state.encode_seq;
        out[1..3].copy_from_slice(&mean.to_le_bytes());
        state.encode_seq = state.encode_seq.wrapping_add(1);

        self.stats.encoded.fetch_add(1, Ordering::SeqCst);
        if !self.silent {
            self.stats.windows.lock().push(pcm.to_vec());
        }
    }

    fn decode_frame(&self, state: &mut Self::State, out: &mut [i16], frame: &[u8]) {
        let seq = frame[0];
        if seq != state.decode_seq {
            self.stats.out_of_order.fetch_add(1, Ordering::SeqCst);
        }
        state.decode_seq = seq.wrapping_add(1);
        out.fill(i16::from_le_bytes([frame[1], frame[2]]));

        self.stats.decoded.fetch_add(1, Ordering::SeqCst);
        if !self.silent {
            self.stats.sequence.lock().push(seq);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_geometry() {
        let engine = DcEngine::new();
        let state = engine.create_state(Mode::Mode700C).unwrap();
        assert_eq!(engine.samples_per_frame(&state), 320);
        assert_eq!(engine.bytes_per_frame(&state), 4);
        engine.destroy_state(state);
        assert_eq!(engine.stats().live(), 0);
    }

    #[test]
    fn test_frame_layout() {
        let engine = DcEngine::with_geometry(4, 5);
        let mut state = engine.create_state(Mode::Mode3200).unwrap();
        let mut out = [0xaau8; 5];

        engine.encode_frame(&mut state, &mut out, &[-100, -100, -100, -100]);
        assert_eq!(out, [0u8, 0x9c, 0xff, 0, 0]);

        engine.encode_frame(&mut state, &mut out, &[1, 2, 3, 6]);
        assert_eq!(out[0], 1);
        assert_eq!(i16::from_le_bytes([out[1], out[2]]), 3);
    }

    #[test]
    fn test_decode_tracks_order() {
        let engine = DcEngine::with_geometry(2, 3);
        let mut state = engine.create_state(Mode::Mode3200).unwrap();
        let mut pcm = [0i16; 2];

        engine.decode_frame(&mut state, &mut pcm, &[0, 5, 0]);
        assert_eq!(pcm, [5i16, 5]);
        engine.decode_frame(&mut state, &mut pcm, &[2, 0, 0]);
        assert_eq!(engine.stats().out_of_order(), 1);
        assert_eq!(engine.stats().decoded_sequence(), vec![0, 2]);
    }

    #[test]
    fn test_silent_keeps_counting() {
        let engine = DcEngine::with_geometry(2, 3).silent();
        let mut state = engine.create_state(Mode::Mode3200).unwrap();
        let mut out = [0u8; 3];
        engine.encode_frame(&mut state, &mut out, &[1, 1]);
        assert_eq!(engine.stats().encoded_frames(), 1);
        assert!(engine.stats().windows().is_empty());
    }

    #[test]
    fn test_failing() {
        let engine = DcEngine::new().failing();
        assert!(engine.create_state(Mode::Mode1300).is_none());
        assert_eq!(engine.stats().created(), 0);
    }

    #[test]
    #[should_panic(expected = "bytes per frame")]
    fn test_with_geometry_too_small() {
        let _ = DcEngine::with_geometry(160, 2);
    }
}
