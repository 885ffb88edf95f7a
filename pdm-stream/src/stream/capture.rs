//! Producer-side capture adapter.
//!
//! The platform layer calls [`CaptureInput::on_samples_ready`] from the
//! decimator interrupt each time a decoded PCM burst is available. The
//! adapter's only obligations are a clip scan and a ring push — both
//! bounded, lock-free and allocation-free, because the producer context
//! must never be blocked by the consumer.

use crate::ring::SampleRing;

use super::clip::{ClipDetector, ClipIndicator};

/// Interrupt-context entry point for decoded microphone bursts.
pub struct CaptureInput<'a, const N: usize> {
    ring: &'a SampleRing<N>,
    clip: ClipDetector<'a>,
}

impl<'a, const N: usize> CaptureInput<'a, N> {
    /// Create a capture adapter feeding `ring`, reporting clips into
    /// `indicator`.
    pub const fn new(ring: &'a SampleRing<N>, indicator: &'a ClipIndicator) -> Self {
        CaptureInput {
            ring,
            clip: ClipDetector::new(indicator),
        }
    }

    /// Enqueue one decoded burst.
    ///
    /// Called from the time-critical producer context. A full ring drops
    /// the burst (counted by the ring); clipping only raises the
    /// out-of-band indicator and never alters the samples.
    pub fn on_samples_ready(&mut self, burst: &[i16]) {
        self.clip.scan(burst);
        let _ = self.ring.push(burst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MIC_BURST_SAMPLES;

    #[test]
    fn bursts_land_in_the_ring() {
        let ring: SampleRing<64> = SampleRing::new();
        let indicator = ClipIndicator::new();
        let mut capture = CaptureInput::new(&ring, &indicator);

        let burst: [i16; MIC_BURST_SAMPLES] = core::array::from_fn(|i| i as i16 * 100);
        capture.on_samples_ready(&burst);
        capture.on_samples_ready(&burst);
        assert_eq!(ring.len(), MIC_BURST_SAMPLES * 2);

        let mut out = [0i16; MIC_BURST_SAMPLES];
        assert!(ring.pop_into(&mut out));
        assert_eq!(out, burst);
    }

    #[test]
    fn clipped_burst_raises_indicator_and_still_enqueues() {
        let ring: SampleRing<64> = SampleRing::new();
        let indicator = ClipIndicator::new();
        let mut capture = CaptureInput::new(&ring, &indicator);

        let mut burst = [0i16; MIC_BURST_SAMPLES];
        burst[5] = 32_750;
        capture.on_samples_ready(&burst);

        assert!(indicator.is_set());
        // The audio path is untouched by clip detection.
        let mut out = [0i16; MIC_BURST_SAMPLES];
        assert!(ring.pop_into(&mut out));
        assert_eq!(out, burst);
    }

    #[test]
    fn overrun_drops_burst_without_blocking() {
        let ring: SampleRing<32> = SampleRing::new();
        let indicator = ClipIndicator::new();
        let mut capture = CaptureInput::new(&ring, &indicator);

        let burst = [1i16; MIC_BURST_SAMPLES];
        capture.on_samples_ready(&burst);
        capture.on_samples_ready(&burst);
        capture.on_samples_ready(&burst); // ring full, dropped

        assert_eq!(ring.len(), 32);
        assert_eq!(ring.overruns(), 1);
    }
}
