//! Shared filter-mode cell.
//!
//! The reference firmware kept the user mode in an ambient volatile
//! global, incremented by a debounced button interrupt and read by the
//! DSP path. Here it is an explicit cell passed by reference into the
//! scheduler at construction: the UI context is the single writer, the
//! scheduler reads a snapshot once per block boundary. Changes are never
//! honored mid-block.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::filter::FilterResponse;

/// Process-wide filter mode word.
///
/// Bit 0 enables filtering; bit 1 selects the high-pass (response B)
/// over the low-pass (response A). Higher bits are ignored here and free
/// for UI use (the reference used one for an LED blink rate).
pub struct ModeSelector(AtomicU32);

impl ModeSelector {
    /// Create a selector with filtering disabled (suitable for `static`s).
    pub const fn new() -> Self {
        ModeSelector(AtomicU32::new(0))
    }

    /// Increment the mode word (UI/button context; single writer).
    pub fn bump(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// The raw mode word.
    pub fn raw(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }

    /// Snapshot the filter response selected by the current mode word.
    pub fn response(&self) -> FilterResponse {
        let mode = self.raw();
        if mode & 1 == 0 {
            FilterResponse::Bypass
        } else if mode & 2 != 0 {
            FilterResponse::HighPass
        } else {
            FilterResponse::LowPass
        }
    }
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::new()
    }
}
