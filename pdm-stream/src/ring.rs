//! Lock-free single-producer single-consumer microphone sample ring.
//!
//! Decoded PCM bursts arrive from the decimator interrupt (the producer)
//! and the block scheduler drains them in the main loop (the consumer).
//! The two contexts share only the atomic `head`/`tail` indices; each is
//! written by exactly one side, which is what makes the ring lock-free.
//!
//! # Safety Contract
//!
//! - Only ONE context may call [`push()`](SampleRing::push) (the producer).
//! - Only ONE context may call [`pop_into()`](SampleRing::pop_into) (the
//!   consumer).
//! - These may be different threads/ISR contexts running concurrently.
//!
//! # Degraded-mode policy
//!
//! The reference pipeline assumed the consumer always keeps up and did not
//! guard either direction. Here both violations are detected and counted:
//! a full ring drops the incoming burst (overrun), an insufficient fill
//! substitutes silence for the requested block (underrun). Audio degrades;
//! it never reads stale or torn data.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// Fixed-capacity mono PCM ring shared between the capture interrupt and
/// the block scheduler.
///
/// `head` and `tail` are free-running counters; the slot for a sample is
/// the counter modulo `N`, and occupancy is `head - tail`. All `N` slots
/// are usable.
pub struct SampleRing<const N: usize> {
    buffer: UnsafeCell<[i16; N]>,
    /// Write position (only advanced by the producer).
    head: AtomicUsize,
    /// Read position (only advanced by the consumer).
    tail: AtomicUsize,
    /// Bursts dropped because the ring was full.
    overruns: AtomicU32,
    /// Blocks substituted with silence because the ring ran dry.
    underruns: AtomicU32,
}

// SAFETY: The SPSC contract (single producer, single consumer) ensures
// that head and tail are only advanced by their respective sides, so a
// buffer slot is never written and read concurrently: the producer only
// writes slots in [head, head + n) after checking they are free, and the
// consumer only reads slots in [tail, tail + n) after checking they are
// filled. Release stores on the indices publish the matching slot writes.
unsafe impl<const N: usize> Sync for SampleRing<N> {}
unsafe impl<const N: usize> Send for SampleRing<N> {}

impl<const N: usize> SampleRing<N> {
    /// Create a new empty ring (suitable for `static` storage).
    pub const fn new() -> Self {
        SampleRing {
            buffer: UnsafeCell::new([0i16; N]),
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            overruns: AtomicU32::new(0),
            underruns: AtomicU32::new(0),
        }
    }

    /// Append a burst of samples (producer side).
    ///
    /// Never blocks and never allocates; safe to call from the capture
    /// interrupt. If the ring lacks room for the whole burst, the burst is
    /// dropped, the overrun counter is incremented and `false` is returned.
    pub fn push(&self, burst: &[i16]) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        let free = N - head.wrapping_sub(tail);

        if burst.len() > free {
            self.overruns.fetch_add(1, Ordering::Relaxed);
            #[cfg(feature = "defmt")]
            defmt::warn!("mic ring overrun: {=usize} samples dropped", burst.len());
            return false;
        }

        // SAFETY: We are the sole producer; the free-space check above
        // guarantees the consumer is not reading any of these slots.
        unsafe {
            let buffer = self.buffer.get();
            for (i, &sample) in burst.iter().enumerate() {
                (*buffer)[head.wrapping_add(i) % N] = sample;
            }
        }

        // Release ordering publishes the slot writes before head advances.
        self.head.store(head.wrapping_add(burst.len()), Ordering::Release);
        true
    }

    /// Read one block of samples into `block` (consumer side).
    ///
    /// If the ring holds fewer than `block.len()` samples the block is
    /// filled with silence, the underrun counter is incremented and `false`
    /// is returned; the read position does not advance.
    pub fn pop_into(&self, block: &mut [i16]) -> bool {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);

        if head.wrapping_sub(tail) < block.len() {
            block.fill(0);
            self.underruns.fetch_add(1, Ordering::Relaxed);
            #[cfg(feature = "defmt")]
            defmt::warn!("mic ring underrun: {=usize} silent samples substituted", block.len());
            return false;
        }

        // SAFETY: We are the sole consumer; the occupancy check above
        // guarantees the producer has finished writing all of these slots.
        unsafe {
            let buffer = self.buffer.get();
            for (i, sample) in block.iter_mut().enumerate() {
                *sample = (*buffer)[tail.wrapping_add(i) % N];
            }
        }

        // Release ordering frees the slots for the producer.
        self.tail.store(tail.wrapping_add(block.len()), Ordering::Release);
        true
    }

    /// Number of samples currently buffered.
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        head.wrapping_sub(tail)
    }

    /// Whether the ring holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total capacity in samples.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of bursts dropped on a full ring.
    pub fn overruns(&self) -> u32 {
        self.overruns.load(Ordering::Relaxed)
    }

    /// Number of blocks substituted with silence on an empty ring.
    pub fn underruns(&self) -> u32 {
        self.underruns.load(Ordering::Relaxed)
    }
}
