//! Mono to interleaved-stereo expansion.
//!
//! The playback DMA consumes interleaved 16-bit stereo frames, but the
//! microphone path is mono: each filtered sample is duplicated into both
//! channel slots. This is the intended behavior, not a placeholder — no
//! true stereo source exists.

/// Duplicate each mono sample into consecutive left/right slots.
///
/// `dst[2i] = dst[2i + 1] = src[i]`, order preserved.
///
/// # Panics
///
/// Debug-asserts that `dst` is exactly twice as long as `src`.
pub fn expand_stereo(dst: &mut [i16], src: &[i16]) {
    debug_assert_eq!(dst.len(), src.len() * 2);

    for (frame, &sample) in dst.chunks_exact_mut(2).zip(src.iter()) {
        frame[0] = sample;
        frame[1] = sample;
    }
}
