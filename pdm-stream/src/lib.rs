//! # pdm-stream
//!
//! A `no_std`, zero-allocation real-time audio streaming core for a PDM
//! microphone → FIR filter → stereo I2S playback path, as found on small
//! Cortex-M evaluation boards. The crate owns the bounded pipeline between
//! the decoded-microphone interrupt and the DMA completion interrupt; board
//! bring-up, the PDM decimator itself and codec register programming stay
//! with the platform layer.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Buffering | [`ring`] | Lock-free SPSC microphone sample ring |
//! | DSP | [`filter`] / [`dsp`] | Q15 block FIR with selectable response |
//! | Control | [`mode`] | Shared filter-mode cell (button driven) |
//! | Streaming | [`stream`] | Capture adapter, ping-pong output pair, block scheduler |
//!
//! ## Data flow
//!
//! ```text
//! decimator ISR ──► CaptureInput ──► SampleRing ──► StreamScheduler ──► OutputBufferPair ──► DMA/I2S
//!                   (clip detect)                   (pop → FIR → L/R)       ▲
//!                                                        ▲                 │
//! DMA complete ISR ──────────────────────── consumed latch ────────────────┘
//! ```
//!
//! The scheduler is a non-blocking step function: the firmware main loop
//! spins on [`stream::StreamScheduler::poll`], the ISRs only touch atomics.
//! There is no shutdown path; a playback fault halts the scheduler
//! permanently.
//!
//! ## Audio parameters
//!
//! - **Sample rate:** 16 kHz ([`constants::SAMPLE_RATE_HZ`])
//! - **Block size:** 512 mono samples ([`constants::BLOCK_SAMPLES`])
//! - **Sample format:** `i16` (Q15 throughout the filter path)
//! - **Mic ring:** 1536 samples, consumer starts at 2/3 fill
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `defmt` | no | Diagnostics for overrun/underrun, clipping and faults |

#![no_std]

pub mod constants;
pub mod dsp;
pub mod filter;
pub mod mode;
pub mod ring;
pub mod stream;
