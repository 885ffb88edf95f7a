/// Fixed audio sample rate in Hz (output rate of the PDM decimation filter).
pub const SAMPLE_RATE_HZ: u32 = 16_000;

/// Number of mono 16-bit samples per processing block.
pub const BLOCK_SAMPLES: usize = 512;

/// Number of interleaved stereo samples per output ping-pong buffer.
pub const OUT_BUFFER_SAMPLES: usize = BLOCK_SAMPLES * 2;

/// Microphone ring buffer capacity in mono samples.
///
/// Three blocks deep: during normal operation occupancy varies between
/// about 1/3 and 2/3 full, leaving roughly one block of margin on each
/// side against producer/consumer cadence jitter.
pub const MIC_BUFFER_SAMPLES: usize = BLOCK_SAMPLES * 3;

/// Ring occupancy the scheduler waits for before the first pop.
pub const START_THRESHOLD_SAMPLES: usize = MIC_BUFFER_SAMPLES * 2 / 3;

/// Mono PCM samples delivered per decoded microphone burst.
pub const MIC_BURST_SAMPLES: usize = 16;

/// FIR tap count shared by both coefficient tables.
pub const NUM_FIR_TAPS: usize = 56;

/// Absolute sample amplitude at which the clip indicator is raised.
pub const CLIP_THRESHOLD: i16 = 32_700;

/// Number of microphone bursts the clip indicator stays raised after the
/// last clipped sample.
pub const CLIP_HOLD_BURSTS: u32 = 50;
