//! Frame windowing between PCM and compressed frames.
//!
//! Encoding walks the PCM in non-overlapping windows of
//! `samples_per_frame` samples and emits one `bytes_per_frame` frame per
//! window. A short trailing window is copied into a zeroed scratch frame so
//! the tail is encoded against silence, never dropped. Decoding requires a
//! whole number of frames and feeds them to the engine strictly in order.
//!
//! Output buffers are allocated fallibly up front. If anything fails the
//! buffer is dropped with the error; callers never see partial output.

use tracing::trace;

use crate::engine::Engine;
use crate::error::{Codec2Error, Result};
use crate::geometry::SAMPLE_BYTES;
use crate::session::Session;
use crate::source::PcmSource;

/// Encodes PCM samples into concatenated frames.
///
/// The output is exactly `ceil(pcm.len() / S) * B` bytes, where `S` and `B`
/// are the session's samples and bytes per frame. Empty input yields empty
/// output without calling the engine.
pub fn encode<E: Engine>(session: &mut Session<E>, pcm: &[i16]) -> Result<Vec<u8>> {
    let geometry = session.geometry();
    let samples_per_frame = geometry.samples_per_frame();
    let bytes_per_frame = geometry.bytes_per_frame();

    let (engine, state) = session.parts_mut()?;
    let len = geometry.encoded_len(pcm.len())?;
    let mut out = zeroed::<u8>(len)?;
    let mut padded = false;

    for (i, frame) in out.chunks_exact_mut(bytes_per_frame).enumerate() {
        let start = i * samples_per_frame;
        let window = &pcm[start..pcm.len().min(start + samples_per_frame)];

        if window.len() == samples_per_frame {
            engine.encode_frame(state, frame, window);
            continue;
        }

        // Only the last window can be short.
        let mut scratch = zeroed::<i16>(samples_per_frame)?;
        scratch[..window.len()].copy_from_slice(window);
        engine.encode_frame(state, frame, &scratch);
        padded = true;
    }

    trace!(
        samples = pcm.len(),
        frames = len / bytes_per_frame,
        padded,
        "codec2: encoded"
    );
    Ok(out)
}

/// Encodes PCM from a borrowed source.
///
/// The source view is held only for the duration of the call and released
/// on every exit path.
pub fn encode_source<E: Engine>(session: &mut Session<E>, source: PcmSource<'_>) -> Result<Vec<u8>> {
    let view = source.acquire()?;
    encode(session, &view)
}

/// Decodes concatenated frames into PCM samples.
///
/// `frames.len()` must be a multiple of the session's bytes per frame;
/// otherwise the call fails with [`Codec2Error::FrameAlignment`] and nothing
/// is decoded. The output holds `(frames.len() / B) * S` samples.
pub fn decode<E: Engine>(session: &mut Session<E>, frames: &[u8]) -> Result<Vec<i16>> {
    let geometry = session.geometry();
    let samples_per_frame = geometry.samples_per_frame();
    let bytes_per_frame = geometry.bytes_per_frame();

    let (engine, state) = session.parts_mut()?;
    let len = geometry.decoded_samples(frames.len())?;
    let mut out = zeroed::<i16>(len)?;

    for (frame, pcm) in frames
        .chunks_exact(bytes_per_frame)
        .zip(out.chunks_exact_mut(samples_per_frame))
    {
        engine.decode_frame(state, pcm, frame);
    }

    trace!(
        bytes = frames.len(),
        frames = frames.len() / bytes_per_frame,
        "codec2: decoded"
    );
    Ok(out)
}

/// Decodes concatenated frames into little-endian PCM bytes.
///
/// Same contract as [`decode`]; the output holds two bytes per sample.
pub fn decode_to_le_bytes<E: Engine>(session: &mut Session<E>, frames: &[u8]) -> Result<Vec<u8>> {
    let geometry = session.geometry();
    let samples_per_frame = geometry.samples_per_frame();
    let bytes_per_frame = geometry.bytes_per_frame();

    let (engine, state) = session.parts_mut()?;
    let len = geometry.decoded_samples(frames.len())? * SAMPLE_BYTES;
    let mut out = zeroed::<u8>(len)?;
    let mut scratch = zeroed::<i16>(samples_per_frame)?;

    for (frame, pcm) in frames
        .chunks_exact(bytes_per_frame)
        .zip(out.chunks_exact_mut(samples_per_frame * SAMPLE_BYTES))
    {
        engine.decode_frame(state, &mut scratch, frame);
        for (dst, sample) in pcm.chunks_exact_mut(SAMPLE_BYTES).zip(&scratch) {
            dst.copy_from_slice(&sample.to_le_bytes());
        }
    }

    trace!(
        bytes = frames.len(),
        frames = frames.len() / bytes_per_frame,
        "codec2: decoded to bytes"
    );
    Ok(out)
}

fn zeroed<T: Copy + Default>(len: usize) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|source| Codec2Error::Allocation { len, source })?;
    buf.resize(len, T::default());
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;
    use crate::testing::DcEngine;

    fn session(samples: usize, bytes: usize) -> (DcEngine, Session<DcEngine>) {
        let engine = DcEngine::with_geometry(samples, bytes);
        let session = Session::open(engine.clone(), Mode::Mode1300).unwrap();
        (engine, session)
    }

    #[test]
    fn test_encode_empty() {
        let (engine, mut s) = session(40, 52);
        let out = encode(&mut s, &[]).unwrap();
        assert!(out.is_empty());
        assert_eq!(engine.stats().encoded_frames(), 0);
    }

    #[test]
    fn test_encode_partial_tail() {
        // two full windows plus a 10-sample tail
        let (engine, mut s) = session(40, 52);
        let pcm: Vec<i16> = (1..=90).collect();
        let out = encode(&mut s, &pcm).unwrap();

        assert_eq!(out.len(), 156);
        assert_eq!(engine.stats().encoded_frames(), 3);

        let windows = engine.stats().windows();
        assert_eq!(windows[0], pcm[..40]);
        assert_eq!(windows[1], pcm[40..80]);
        assert_eq!(windows[2][..10], pcm[80..]);
        assert!(windows[2][10..].iter().all(|&s| s == 0));
    }

    #[test]
    fn test_encode_one_short_of_frame() {
        let (engine, mut s) = session(40, 52);
        let out = encode(&mut s, &[1000; 39]).unwrap();
        assert_eq!(out.len(), 52);
        let windows = engine.stats().windows();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0][39], 0);
    }

    #[test]
    fn test_encode_exact_frames_no_padding() {
        let (engine, mut s) = session(40, 52);
        let out = encode(&mut s, &[7; 120]).unwrap();
        assert_eq!(out.len(), 156);
        assert!(engine.stats().windows().iter().flatten().all(|&s| s == 7));
    }

    #[test]
    fn test_decode_misaligned_rejected() {
        let (engine, mut s) = session(40, 52);
        let err = decode(&mut s, &[0; 53]).unwrap_err();
        assert!(matches!(
            err,
            Codec2Error::FrameAlignment {
                len: 53,
                bytes_per_frame: 52
            }
        ));
        assert_eq!(engine.stats().decoded_frames(), 0);

        assert!(decode_to_le_bytes(&mut s, &[0; 51]).is_err());
        assert_eq!(engine.stats().decoded_frames(), 0);
    }

    #[test]
    fn test_decode_sizes() {
        let (engine, mut s) = session(40, 52);
        let frames = encode(&mut s, &[0; 120]).unwrap();
        let pcm = decode(&mut s, &frames).unwrap();
        assert_eq!(pcm.len(), 120);
        assert_eq!(engine.stats().decoded_frames(), 3);
        assert!(decode(&mut s, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_decode_to_le_bytes_matches_decode() {
        let (_, mut enc) = session(40, 52);
        let pcm: Vec<i16> = (0..160).map(|i| (i / 40) as i16 * -300).collect();
        let frames = encode(&mut enc, &pcm).unwrap();

        let (_, mut a) = session(40, 52);
        let (_, mut b) = session(40, 52);
        let samples = decode(&mut a, &frames).unwrap();
        let bytes = decode_to_le_bytes(&mut b, &frames).unwrap();

        assert_eq!(bytes.len(), samples.len() * 2);
        let from_bytes: Vec<i16> = bytes
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();
        assert_eq!(from_bytes, samples);
    }

    #[test]
    fn test_encode_source_le_bytes() {
        let (engine, mut s) = session(4, 3);
        let bytes: Vec<u8> = [1i16, 2, 3, 4, 5].iter().flat_map(|s| s.to_le_bytes()).collect();
        let out = encode_source(&mut s, PcmSource::from_le_bytes(&bytes)).unwrap();
        assert_eq!(out.len(), 6);
        assert_eq!(engine.stats().windows()[1], vec![5, 0, 0, 0]);
    }

    #[test]
    fn test_encode_source_odd_bytes() {
        let (engine, mut s) = session(4, 3);
        let err = encode_source(&mut s, PcmSource::from_le_bytes(&[0; 7])).unwrap_err();
        assert!(matches!(err, Codec2Error::BufferAccess(_)));
        assert_eq!(engine.stats().encoded_frames(), 0);
    }

    #[test]
    fn test_zeroed_allocation_failure() {
        let err = zeroed::<u8>(usize::MAX).unwrap_err();
        assert!(matches!(err, Codec2Error::Allocation { .. }));
    }
}
