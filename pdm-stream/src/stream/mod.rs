//! The real-time streaming pipeline.
//!
//! This module wires the microphone ring, the FIR filter and the
//! ping-pong output pair into a bounded pipeline driven entirely by two
//! external signals: the decoded-sample burst from the PDM decimator and
//! the buffer-consumed interrupt from the playback DMA.
//!
//! ## Components
//!
//! | Type | Context | Role |
//! |------|---------|------|
//! | [`CaptureInput`] | producer ISR | clip scan + ring push per burst |
//! | [`ClipIndicator`] | any | out-of-band clipping telemetry cell |
//! | [`OutputBufferPair`] | DMA ISR / main | ping-pong buffers + ownership flag |
//! | [`StreamScheduler`] | main loop | pop → filter → expand → refill |
//!
//! ## Control flow
//!
//! The scheduler never blocks: [`StreamScheduler::poll`] is called from
//! the foreground loop and does at most one block of work per call. The
//! ISR-side entry points ([`CaptureInput::on_samples_ready`],
//! [`OutputBufferPair::on_buffer_consumed`]) only touch atomics and fixed
//! buffers — no locks, no allocation.

pub mod capture;
pub mod clip;
pub mod expand;
pub mod output;
pub mod scheduler;

pub use capture::CaptureInput;
pub use clip::{ClipDetector, ClipIndicator};
pub use expand::expand_stereo;
pub use output::OutputBufferPair;
pub use scheduler::{Activity, SchedulerState, StreamError, StreamScheduler, StreamStats};

#[cfg(test)]
mod integration_tests;
