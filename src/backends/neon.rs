//! ARM NEON backend implementation (aarch64 128-bit SIMD)
//!
//! NEON has no dot-product instruction for `f32`; the squares are reduced with
//! the across-vector add `vaddvq_f32`, which only exists on AArch64.
//!
//! # Safety
//!
//! Callers must check `is_aarch64_feature_detected!("neon")`.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use super::LengthBackend;
use crate::Vec4;

/// ARM NEON backend (128-bit SIMD)
pub struct NeonBackend;

impl LengthBackend for NeonBackend {
    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn length(v: &Vec4) -> f32 {
        let va = vld1q_f32(v.as_array().as_ptr());
        let sq = vmulq_f32(va, va);
        vaddvq_f32(sq).sqrt()
    }

    #[target_feature(enable = "neon")]
    unsafe fn sum_lengths(values: &[Vec4]) -> f32 {
        let mut sum = 0.0f32;
        for v in values {
            sum += Self::length(v);
        }
        sum
    }
}
