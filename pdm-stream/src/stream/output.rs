//! Ping-pong output buffer pair and the playback driver interface.
//!
//! Two interleaved-stereo buffers alternate between hardware and software
//! ownership: at any instant exactly one buffer (the `active` one) is
//! being read by the playback DMA and must not be touched, while the
//! other is exclusively software-owned and may be refilled. Ownership
//! transfers only on the DMA completion signal.
//!
//! The playback driver (DMA/codec glue, external to this crate) calls the
//! ISR-side methods; the [`StreamScheduler`](super::StreamScheduler) in
//! the main loop consumes the latched events. All shared state is a pair
//! of atomics with the single-writer discipline documented per field.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::constants::OUT_BUFFER_SAMPLES;

/// Double buffer for interleaved 16-bit stereo playback.
pub struct OutputBufferPair {
    buffers: [UnsafeCell<[i16; OUT_BUFFER_SAMPLES]>; 2],
    /// Index of the hardware-owned buffer (only written by the DMA ISR).
    active: AtomicU8,
    /// Completion event latch (set by the ISR, cleared by the scheduler).
    consumed: AtomicBool,
    /// Fatal playback fault latch (set by the ISR, never cleared).
    fault: AtomicBool,
}

// SAFETY: Buffer slots are only mutated through `buffer_mut()`, whose
// contract restricts it to the software-owned index in the single
// consumer context, while the hardware side only reads the active index.
// The `active` flip in `on_buffer_consumed` is the sole ownership
// transfer point and is published before the `consumed` latch.
unsafe impl Sync for OutputBufferPair {}

impl OutputBufferPair {
    /// Create a pair with both buffers zeroed and buffer 0 hardware-owned.
    ///
    /// Buffer 0 doubles as the initial silence block: playback starts on
    /// it while the scheduler prepares buffer 1.
    pub const fn new() -> Self {
        OutputBufferPair {
            buffers: [
                UnsafeCell::new([0i16; OUT_BUFFER_SAMPLES]),
                UnsafeCell::new([0i16; OUT_BUFFER_SAMPLES]),
            ],
            active: AtomicU8::new(0),
            consumed: AtomicBool::new(false),
            fault: AtomicBool::new(false),
        }
    }

    /// Index of the buffer currently owned by the playback hardware.
    pub fn active_index(&self) -> usize {
        self.active.load(Ordering::Acquire) as usize
    }

    /// DMA completion callback: transfer ownership and latch the event.
    ///
    /// The buffer that just finished playing becomes software-owned; the
    /// other buffer (filled by the scheduler during the previous period)
    /// becomes hardware-owned and starts playing.
    pub fn on_buffer_consumed(&self) {
        let finished = self.active.load(Ordering::Relaxed);
        self.active.store(1 - finished, Ordering::Release);
        self.consumed.store(true, Ordering::Release);
    }

    /// DMA half-transfer callback.
    ///
    /// Available from the hardware but unused by the core logic; present
    /// so the driver glue has a complete interface to wire up.
    pub fn on_half_transfer(&self) {}

    /// DMA/codec fault callback. Fatal: latches permanently and halts the
    /// scheduler on its next poll.
    pub fn on_playback_error(&self) {
        #[cfg(feature = "defmt")]
        defmt::error!("playback fault raised; halting stream");
        self.fault.store(true, Ordering::Release);
    }

    /// Whether a fatal playback fault has been raised.
    pub fn fault_raised(&self) -> bool {
        self.fault.load(Ordering::Acquire)
    }

    /// Consume the completion latch.
    ///
    /// Returns the index of the newly software-owned buffer, once per
    /// completion signal. Scheduler side only.
    pub fn take_consumed(&self) -> Option<usize> {
        if self.consumed.swap(false, Ordering::Acquire) {
            Some(1 - self.active_index())
        } else {
            None
        }
    }

    /// Exclusive access to buffer `index` for refilling.
    ///
    /// # Safety
    ///
    /// `index` must be software-owned (not the active index) and the
    /// caller must be the sole consumer context; the reference must be
    /// dropped before the next ownership transfer hands the buffer back
    /// to the hardware.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn buffer_mut(&self, index: usize) -> &mut [i16; OUT_BUFFER_SAMPLES] {
        unsafe { &mut *self.buffers[index].get() }
    }

    /// The hardware-owned buffer, as the playback driver reads it.
    ///
    /// # Safety
    ///
    /// The reference is only valid until the next call to
    /// [`on_buffer_consumed`](Self::on_buffer_consumed) transfers
    /// ownership.
    pub unsafe fn hardware_buffer(&self) -> &[i16; OUT_BUFFER_SAMPLES] {
        unsafe { &*self.buffers[self.active_index()].get() }
    }
}

impl Default for OutputBufferPair {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_silent_buffer_zero() {
        let pair = OutputBufferPair::new();
        assert_eq!(pair.active_index(), 0);
        assert!(pair.take_consumed().is_none());
        assert!(!pair.fault_raised());

        let hw = unsafe { pair.hardware_buffer() };
        assert!(hw.iter().all(|&s| s == 0), "initial buffer must be silence");
    }

    #[test]
    fn consumption_flips_ownership() {
        let pair = OutputBufferPair::new();

        pair.on_buffer_consumed();
        assert_eq!(pair.active_index(), 1);
        // The just-played buffer 0 is now software-owned.
        assert_eq!(pair.take_consumed(), Some(0));
        // Latch is one-shot.
        assert!(pair.take_consumed().is_none());

        pair.on_buffer_consumed();
        assert_eq!(pair.active_index(), 0);
        assert_eq!(pair.take_consumed(), Some(1));
    }

    #[test]
    fn refill_is_visible_to_hardware_after_flip() {
        let pair = OutputBufferPair::new();

        // Scheduler fills the inactive buffer 1.
        unsafe {
            pair.buffer_mut(1).fill(1234);
        }
        // Completion: buffer 1 becomes active.
        pair.on_buffer_consumed();

        let hw = unsafe { pair.hardware_buffer() };
        assert!(hw.iter().all(|&s| s == 1234));
    }

    #[test]
    fn half_transfer_is_a_no_op() {
        let pair = OutputBufferPair::new();
        pair.on_half_transfer();
        assert_eq!(pair.active_index(), 0);
        assert!(pair.take_consumed().is_none());
    }

    #[test]
    fn fault_latches_permanently() {
        let pair = OutputBufferPair::new();
        assert!(!pair.fault_raised());

        pair.on_playback_error();
        assert!(pair.fault_raised());
        assert!(pair.fault_raised(), "fault must not self-clear");
    }
}
