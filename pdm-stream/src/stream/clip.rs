//! Clipping detection on the capture path.
//!
//! Clipping is telemetry, not a processing error: the indicator is
//! surfaced out-of-band (the board glue typically wires it to an LED) and
//! the audio path is never altered.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::constants::{CLIP_HOLD_BURSTS, CLIP_THRESHOLD};

/// Shared clip indicator cell.
///
/// Written only by the capture context (via [`ClipDetector`]), readable
/// from anywhere.
pub struct ClipIndicator(AtomicBool);

impl ClipIndicator {
    /// Create a cleared indicator (suitable for `static` storage).
    pub const fn new() -> Self {
        ClipIndicator(AtomicBool::new(false))
    }

    /// Whether the indicator is currently raised.
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn set(&self, on: bool) {
        self.0.store(on, Ordering::Relaxed);
    }
}

impl Default for ClipIndicator {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-burst clip scanner with a hold timer.
///
/// A burst containing any sample at or beyond [`CLIP_THRESHOLD`] raises
/// the indicator for [`CLIP_HOLD_BURSTS`] bursts; continued clipping
/// refreshes the hold. Owned by the capture context; the hold counter is
/// not shared.
pub struct ClipDetector<'a> {
    indicator: &'a ClipIndicator,
    hold: u32,
}

impl<'a> ClipDetector<'a> {
    /// Create a detector reporting into `indicator`.
    pub const fn new(indicator: &'a ClipIndicator) -> Self {
        ClipDetector { indicator, hold: 0 }
    }

    /// Scan one burst and advance the hold timer.
    pub fn scan(&mut self, burst: &[i16]) {
        let clipped = burst
            .iter()
            .any(|&s| s >= CLIP_THRESHOLD || s <= -CLIP_THRESHOLD);

        if self.hold > 0 {
            self.hold -= 1;
            if self.hold == 0 {
                self.indicator.set(false);
            }
        } else if clipped {
            self.indicator.set(true);
            #[cfg(feature = "defmt")]
            defmt::warn!("input clipping detected");
        }

        if clipped {
            self.hold = CLIP_HOLD_BURSTS;
        }
    }
}
