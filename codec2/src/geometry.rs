//! Frame geometry and buffer size arithmetic.

use std::time::Duration;

use crate::SAMPLE_RATE;
use crate::error::{Codec2Error, Result};

/// Largest buffer, in bytes, that a single call may produce.
///
/// Host buffer abstractions address at most a 31-bit byte length.
pub const MAX_BUFFER_LEN: usize = i32::MAX as usize;

/// Size of one PCM sample in bytes.
pub const SAMPLE_BYTES: usize = std::mem::size_of::<i16>();

/// Samples and bytes in one codec frame.
///
/// Both values are positive and fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameGeometry {
    samples_per_frame: usize,
    bytes_per_frame: usize,
}

impl FrameGeometry {
    pub(crate) const fn new(samples_per_frame: usize, bytes_per_frame: usize) -> Self {
        Self {
            samples_per_frame,
            bytes_per_frame,
        }
    }

    /// Creates a geometry, returning `None` if either size is zero.
    pub fn try_new(samples_per_frame: usize, bytes_per_frame: usize) -> Option<Self> {
        if samples_per_frame == 0 || bytes_per_frame == 0 {
            return None;
        }
        Some(Self::new(samples_per_frame, bytes_per_frame))
    }

    /// Returns the number of PCM samples consumed or produced per frame.
    pub fn samples_per_frame(&self) -> usize {
        self.samples_per_frame
    }

    /// Returns the number of compressed bytes per frame.
    pub fn bytes_per_frame(&self) -> usize {
        self.bytes_per_frame
    }

    /// Returns the number of frames needed to hold `samples` samples.
    ///
    /// A trailing partial window counts as a whole frame.
    pub fn frames_for_samples(&self, samples: usize) -> usize {
        samples.div_ceil(self.samples_per_frame)
    }

    /// Returns the compressed length, in bytes, of `samples` PCM samples.
    pub fn encoded_len(&self, samples: usize) -> Result<usize> {
        let len = self
            .frames_for_samples(samples)
            .checked_mul(self.bytes_per_frame);
        check_limit(len)
    }

    /// Returns the number of PCM samples decoded from `len` compressed bytes.
    ///
    /// `len` must be a whole number of frames.
    pub fn decoded_samples(&self, len: usize) -> Result<usize> {
        if len % self.bytes_per_frame != 0 {
            return Err(Codec2Error::FrameAlignment {
                len,
                bytes_per_frame: self.bytes_per_frame,
            });
        }
        let samples = (len / self.bytes_per_frame).checked_mul(self.samples_per_frame);
        check_limit(samples.and_then(|n| n.checked_mul(SAMPLE_BYTES)))?;
        Ok(samples.unwrap_or_default())
    }

    /// Returns the span of audio covered by one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(self.samples_per_frame as u64 * 1_000_000 / SAMPLE_RATE as u64)
    }
}

fn check_limit(len: Option<usize>) -> Result<usize> {
    match len {
        Some(len) if len <= MAX_BUFFER_LEN => Ok(len),
        other => Err(Codec2Error::OutputTooLarge {
            len: other.unwrap_or(usize::MAX),
            limit: MAX_BUFFER_LEN,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_zero() {
        assert!(FrameGeometry::try_new(0, 7).is_none());
        assert!(FrameGeometry::try_new(320, 0).is_none());
        assert!(FrameGeometry::try_new(320, 7).is_some());
    }

    #[test]
    fn test_encoded_len() {
        let g = FrameGeometry::new(40, 52);
        assert_eq!(g.encoded_len(0).unwrap(), 0);
        assert_eq!(g.encoded_len(1).unwrap(), 52);
        assert_eq!(g.encoded_len(39).unwrap(), 52);
        assert_eq!(g.encoded_len(40).unwrap(), 52);
        assert_eq!(g.encoded_len(41).unwrap(), 104);
        assert_eq!(g.encoded_len(90).unwrap(), 156);
    }

    #[test]
    fn test_decoded_samples() {
        let g = FrameGeometry::new(320, 7);
        assert_eq!(g.decoded_samples(0).unwrap(), 0);
        assert_eq!(g.decoded_samples(21).unwrap(), 960);
    }

    #[test]
    fn test_decoded_samples_misaligned() {
        let g = FrameGeometry::new(320, 7);
        match g.decoded_samples(22) {
            Err(Codec2Error::FrameAlignment { len, bytes_per_frame }) => {
                assert_eq!(len, 22);
                assert_eq!(bytes_per_frame, 7);
            }
            other => panic!("expected alignment error, got {:?}", other),
        }
    }

    #[test]
    fn test_decoded_output_too_large() {
        // 1 byte per frame expanding to 320 samples overflows quickly
        let g = FrameGeometry::new(320, 1);
        let len = MAX_BUFFER_LEN / (320 * SAMPLE_BYTES) + 1;
        assert!(matches!(
            g.decoded_samples(len),
            Err(Codec2Error::OutputTooLarge { .. })
        ));
        assert!(g.decoded_samples(len - 1).is_ok());
    }

    #[test]
    fn test_encoded_output_too_large() {
        let g = FrameGeometry::new(1, 8);
        assert!(matches!(
            g.encoded_len(MAX_BUFFER_LEN),
            Err(Codec2Error::OutputTooLarge { .. })
        ));
        assert!(matches!(
            g.encoded_len(usize::MAX),
            Err(Codec2Error::OutputTooLarge { len: usize::MAX, .. })
        ));
    }

    #[test]
    fn test_frame_duration() {
        assert_eq!(FrameGeometry::new(160, 8).frame_duration(), Duration::from_millis(20));
        assert_eq!(FrameGeometry::new(320, 7).frame_duration(), Duration::from_millis(40));
    }
}
