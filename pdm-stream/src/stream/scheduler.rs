//! Block scheduler: the consumer side of the pipeline.
//!
//! The scheduler turns the two asynchronous signals (ring fill, buffer
//! consumed) into block production. It is written as a non-blocking step
//! function rather than the reference's busy-wait loops: firmware spins
//! on [`StreamScheduler::poll`] from its foreground loop, a hosted
//! harness calls it from a plain loop or an event pump. Each call does at
//! most one block of work.
//!
//! ## State machine
//!
//! ```text
//! WaitFill ──(ring ≥ 2/3)──► Steady ──(fault)──► Halted
//!     │                        ▲  │
//!     └──(fault)──► Halted     └──┘ one refill per consumed signal
//! ```
//!
//! `WaitFill` establishes the startup margin: the first pop only happens
//! once the ring holds two blocks, so steady state oscillates around
//! half-full with about one block of slack on each side.

use crate::constants::{BLOCK_SAMPLES, MIC_BUFFER_SAMPLES, START_THRESHOLD_SAMPLES};
use crate::filter::FirFilter;
use crate::mode::ModeSelector;
use crate::ring::SampleRing;

use super::expand::expand_stereo;
use super::output::OutputBufferPair;

/// Scheduler lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerState {
    /// Waiting for the ring to reach the startup threshold.
    WaitFill,
    /// Free-running block production, one refill per consumed signal.
    Steady,
    /// A fatal playback fault occurred; no further progress.
    Halted,
}

/// What one [`poll()`](StreamScheduler::poll) call accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Activity {
    /// Nothing to do yet.
    Idle,
    /// Startup complete: buffer 1 is filled, buffer 0 (silence) is
    /// hardware-owned — the caller should start the DMA on it now.
    Armed,
    /// The named buffer was refilled after a consumed signal.
    Refilled {
        /// Index of the buffer that was just refilled.
        buffer: usize,
    },
}

/// Streaming pipeline errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamError {
    /// The playback driver raised a fatal fault (e.g. a DMA error).
    /// Never retried; every subsequent poll returns this again.
    PlaybackFault,
}

impl core::fmt::Display for StreamError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StreamError::PlaybackFault => write!(f, "fatal playback driver fault"),
        }
    }
}

/// Counters accumulated since startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StreamStats {
    /// Blocks produced (including silence-substituted ones).
    pub blocks: u32,
    /// Producer bursts dropped on a full ring.
    pub overruns: u32,
    /// Blocks substituted with silence on an empty ring.
    pub underruns: u32,
}

/// Orchestrates pop → filter → mono-to-stereo → refill.
pub struct StreamScheduler<'a> {
    ring: &'a SampleRing<MIC_BUFFER_SAMPLES>,
    output: &'a OutputBufferPair,
    mode: &'a ModeSelector,
    filter: FirFilter,
    scratch: [i16; BLOCK_SAMPLES],
    state: SchedulerState,
    blocks: u32,
}

impl<'a> StreamScheduler<'a> {
    /// Create a scheduler over the shared pipeline cells.
    pub const fn new(
        ring: &'a SampleRing<MIC_BUFFER_SAMPLES>,
        output: &'a OutputBufferPair,
        mode: &'a ModeSelector,
    ) -> Self {
        StreamScheduler {
            ring,
            output,
            mode,
            filter: FirFilter::new(),
            scratch: [0i16; BLOCK_SAMPLES],
            state: SchedulerState::WaitFill,
            blocks: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Counters accumulated since startup.
    pub fn stats(&self) -> StreamStats {
        StreamStats {
            blocks: self.blocks,
            overruns: self.ring.overruns(),
            underruns: self.ring.underruns(),
        }
    }

    /// Advance the pipeline by at most one block of work.
    ///
    /// Non-blocking; intended to be called repeatedly from the foreground
    /// loop. Once a fault is observed the scheduler enters
    /// [`SchedulerState::Halted`] and every call returns
    /// [`StreamError::PlaybackFault`] without doing any work.
    pub fn poll(&mut self) -> Result<Activity, StreamError> {
        if self.output.fault_raised() {
            self.state = SchedulerState::Halted;
        }

        match self.state {
            SchedulerState::Halted => Err(StreamError::PlaybackFault),

            SchedulerState::WaitFill => {
                if self.ring.len() < START_THRESHOLD_SAMPLES {
                    return Ok(Activity::Idle);
                }
                // Buffer 0 stays hardware-owned as the initial silence
                // block; the first real audio lands in buffer 1.
                self.produce_block(1);
                self.state = SchedulerState::Steady;
                Ok(Activity::Armed)
            }

            SchedulerState::Steady => match self.output.take_consumed() {
                None => Ok(Activity::Idle),
                Some(buffer) => {
                    self.produce_block(buffer);
                    Ok(Activity::Refilled { buffer })
                }
            },
        }
    }

    /// Pop one block, filter it and expand it into output buffer `index`.
    ///
    /// The mode cell is read exactly once here, so response switches take
    /// effect only at block boundaries. A ring underrun degrades to a
    /// silent block (handled inside `pop_into`) rather than stalling.
    fn produce_block(&mut self, index: usize) {
        self.filter.configure(self.mode.response());
        let _ = self.ring.pop_into(&mut self.scratch);
        self.filter.apply(&mut self.scratch);

        // SAFETY: `index` came from take_consumed() (or is buffer 1 while
        // buffer 0 is still hardware-owned during startup), so it is
        // software-owned, and poll() is only called from the single
        // consumer context.
        let buffer = unsafe { self.output.buffer_mut(index) };
        expand_stereo(buffer, &self.scratch);
        self.blocks = self.blocks.wrapping_add(1);
    }
}
