//! Borrowed views over caller-owned PCM.
//!
//! A [`PcmSource`] wraps caller memory for the duration of one call. It has
//! two representations: typed samples, which are always borrowed, and raw
//! little-endian bytes, which are borrowed when their layout already matches
//! `i16` and copied otherwise. Either way the caller gets back a
//! [`PcmView`] that releases its hold when dropped.

use std::borrow::Cow;
use std::ops::Deref;

use tracing::trace;

use crate::error::{Codec2Error, Result};
use crate::geometry::{MAX_BUFFER_LEN, SAMPLE_BYTES};

/// Caller-owned PCM input.
#[derive(Debug, Clone, Copy)]
pub enum PcmSource<'a> {
    /// Native 16-bit samples.
    Samples(&'a [i16]),
    /// Little-endian 16-bit samples as raw bytes.
    LeBytes(&'a [u8]),
}

impl<'a> PcmSource<'a> {
    /// Wraps native samples.
    pub fn from_samples(samples: &'a [i16]) -> Self {
        Self::Samples(samples)
    }

    /// Wraps little-endian PCM bytes.
    pub fn from_le_bytes(bytes: &'a [u8]) -> Self {
        Self::LeBytes(bytes)
    }

    /// Returns the size of the underlying buffer in bytes.
    pub fn byte_len(&self) -> usize {
        match self {
            Self::Samples(s) => s.len() * SAMPLE_BYTES,
            Self::LeBytes(b) => b.len(),
        }
    }

    /// Acquires a sample view for the duration of one call.
    ///
    /// Fails with [`Codec2Error::BufferAccess`] if the buffer exceeds the
    /// addressable limit or holds a partial sample.
    pub fn acquire(&self) -> Result<PcmView<'a>> {
        let byte_len = self.byte_len();
        if byte_len > MAX_BUFFER_LEN {
            return Err(Codec2Error::BufferAccess(format!(
                "buffer of {} bytes exceeds limit of {} bytes",
                byte_len, MAX_BUFFER_LEN
            )));
        }

        let samples = match *self {
            Self::Samples(s) => Cow::Borrowed(s),
            Self::LeBytes(b) => {
                if b.len() % SAMPLE_BYTES != 0 {
                    return Err(Codec2Error::BufferAccess(format!(
                        "pcm byte buffer has odd length {}",
                        b.len()
                    )));
                }
                le_bytes_to_samples(b)
            }
        };

        let view = PcmView { samples };
        trace!(
            samples = view.len(),
            borrowed = view.is_borrowed(),
            "codec2: pcm view acquired"
        );
        Ok(view)
    }
}

impl<'a> From<&'a [i16]> for PcmSource<'a> {
    fn from(samples: &'a [i16]) -> Self {
        Self::Samples(samples)
    }
}

fn le_bytes_to_samples(bytes: &[u8]) -> Cow<'_, [i16]> {
    if cfg!(target_endian = "little") {
        // Safety: every bit pattern is a valid i16, and align_to only yields
        // a middle slice for the correctly aligned part.
        let (head, samples, tail) = unsafe { bytes.align_to::<i16>() };
        if head.is_empty() && tail.is_empty() {
            return Cow::Borrowed(samples);
        }
    }

    Cow::Owned(
        bytes
            .chunks_exact(SAMPLE_BYTES)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect(),
    )
}

/// Scoped access to PCM samples.
///
/// The view is valid for one call only and is released on drop.
#[derive(Debug)]
pub struct PcmView<'a> {
    samples: Cow<'a, [i16]>,
}

impl PcmView<'_> {
    /// Returns true if the view aliases caller memory without a copy.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.samples, Cow::Borrowed(_))
    }
}

impl Deref for PcmView<'_> {
    type Target = [i16];

    fn deref(&self) -> &[i16] {
        &self.samples
    }
}

impl Drop for PcmView<'_> {
    fn drop(&mut self) {
        trace!(samples = self.samples.len(), "codec2: pcm view released");
    }
}
