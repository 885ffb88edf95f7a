//! Precomputed Q15 FIR coefficient tables.
//!
//! Both responses were designed offline for the fixed 16 kHz sample rate
//! and are matched in stop-band attenuation; they are static configuration
//! data and are never derived at runtime. The trailing zero taps pad both
//! tables to the common [`NUM_FIR_TAPS`] length.

use crate::constants::NUM_FIR_TAPS;

/// Low-pass at 1 kHz, 40 dB down at 1.5 kHz.
pub static LOW_PASS: [i16; NUM_FIR_TAPS] = [
    -217, 40, 120, 237, 366, 475, 527, 490, 346,
    100, -217, -548, -818, -947, -864, -522, 86, 922,
    1904, 2918, 3835, 4529, 4903, 4903, 4529, 3835, 2918,
    1904, 922, 86, -522, -864, -947, -818, -548, -217,
    100, 346, 490, 527, 475, 366, 237, 120, 40,
    -217, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0,
];

/// High-pass at 1.5 kHz, 40 dB down at 1 kHz.
pub static HIGH_PASS: [i16; NUM_FIR_TAPS] = [
    -654, 483, 393, 321, 222, 76, -108, -299, -447,
    -501, -422, -200, 136, 520, 855, 1032, 953, 558,
    -160, -1148, -2290, -3432, -4406, -5060, 27477, -5060, -4406,
    -3432, -2290, -1148, -160, 558, 953, 1032, 855, 520,
    136, -200, -422, -501, -447, -299, -108, 76, 222,
    321, 393, 483, -654, 0, 0, 0, 0, 0,
    0, 0,
];
