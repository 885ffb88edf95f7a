//! Block-based Q15 FIR filter with selectable response.
//!
//! One [`FirFilter`] runs every block popped from the microphone ring,
//! in place, before mono-to-stereo expansion. Block processing (rather
//! than per-sample calls from the ISR) amortizes setup cost and matches
//! the DMA block cadence; Q15 saturating arithmetic matches the 16-bit
//! audio path with no floating point anywhere near the real-time loop.
//!
//! A response switch is only honored between blocks: [`configure()`]
//! discards the delay line, so the first block after a switch carries a
//! brief transient. That is accepted behavior, not a defect — it avoids
//! the audible discontinuity a mid-block swap would cause.
//!
//! [`configure()`]: FirFilter::configure

pub mod coeffs;

use crate::constants::NUM_FIR_TAPS;
use crate::dsp::saturate16;

/// Selectable filter response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterResponse {
    /// Pass samples through untouched.
    Bypass,
    /// ~1 kHz low-pass (response A).
    LowPass,
    /// ~1.5 kHz high-pass (response B).
    HighPass,
}

/// Stateful block FIR processor.
///
/// The delay line is a tap-length history ring carried across blocks, so
/// the output is a pure function of the input block plus that history.
pub struct FirFilter {
    response: FilterResponse,
    taps: &'static [i16; NUM_FIR_TAPS],
    history: [i16; NUM_FIR_TAPS],
    cursor: usize,
}

impl FirFilter {
    /// Create a filter in [`FilterResponse::Bypass`] with a zeroed delay line.
    pub const fn new() -> Self {
        FirFilter {
            response: FilterResponse::Bypass,
            taps: &coeffs::LOW_PASS,
            history: [0i16; NUM_FIR_TAPS],
            cursor: 0,
        }
    }

    /// Select the active response.
    ///
    /// Idempotent when `response` is unchanged. On a change, the matching
    /// coefficient table is loaded and the delay line is zeroed — the
    /// first block after a switch depends only on the new coefficients.
    pub fn configure(&mut self, response: FilterResponse) {
        if response == self.response {
            return;
        }
        self.response = response;
        self.taps = match response {
            FilterResponse::HighPass => &coeffs::HIGH_PASS,
            _ => &coeffs::LOW_PASS,
        };
        self.history = [0i16; NUM_FIR_TAPS];
        self.cursor = 0;
    }

    /// The currently configured response.
    pub fn response(&self) -> FilterResponse {
        self.response
    }

    /// Run one block through the filter, in place.
    ///
    /// Q15 convolution: wide accumulate of tap products, `>> 15`,
    /// saturated to `i16`. [`FilterResponse::Bypass`] is the identity.
    pub fn apply(&mut self, block: &mut [i16]) {
        if self.response == FilterResponse::Bypass {
            return;
        }

        for sample in block.iter_mut() {
            self.history[self.cursor] = *sample;

            // The high-pass |tap| sum is 76829, so a full-scale block
            // with matching signs overflows an i32 accumulator.
            let mut acc: i64 = 0;
            for (k, &tap) in self.taps.iter().enumerate() {
                let idx = (self.cursor + NUM_FIR_TAPS - k) % NUM_FIR_TAPS;
                acc += tap as i64 * self.history[idx] as i64;
            }

            self.cursor = (self.cursor + 1) % NUM_FIR_TAPS;
            *sample = saturate16((acc >> 15) as i32);
        }
    }
}
