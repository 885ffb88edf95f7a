//! Q15 fixed-point saturation.
//!
//! The filter path works in Q15 with saturating arithmetic; [`saturate16`]
//! reproduces the ARM `SSAT` semantics bit-for-bit. On `thumbv7em` targets
//! with the DSP extension it compiles to a single instruction; elsewhere
//! (host tests) a pure-Rust fallback is used.

/// Saturate an `i32` to `i16` range (`-32768..=32767`).
///
/// Maps to ARM `SSAT #16`.
#[inline(always)]
pub fn saturate16(val: i32) -> i16 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: i32;
        unsafe {
            core::arch::asm!(
                "ssat {out}, #16, {val}",
                out = out(reg) out,
                val = in(reg) val,
            );
        }
        out as i16
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        if val > 32767 {
            32767
        } else if val < -32768 {
            -32768
        } else {
            val as i16
        }
    }
}
