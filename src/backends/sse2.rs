//! SSE2 backend implementation (x86_64 baseline SIMD)
//!
//! SSE2 has no dot-product instruction, so the four squares are reduced with
//! a `movhlps` + shuffle horizontal add before the square root. SSE2 is
//! available on all x86_64 CPUs.
//!
//! # Safety
//!
//! All SSE2 intrinsics are marked `unsafe` by Rust. Loads rely on `Vec4`
//! being 16-byte aligned.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::LengthBackend;
use crate::Vec4;

/// SSE2 backend (128-bit SIMD for x86_64)
pub struct Sse2Backend;

impl LengthBackend for Sse2Backend {
    #[inline]
    #[target_feature(enable = "sse2")]
    unsafe fn length(v: &Vec4) -> f32 {
        let va = _mm_load_ps(v.as_array().as_ptr());
        let sq = _mm_mul_ps(va, va);

        // [s0+s2, s1+s3, ..] then lane 0 + lane 1
        let pair = _mm_add_ps(sq, _mm_movehl_ps(sq, sq));
        let total = _mm_add_ss(pair, _mm_shuffle_ps(pair, pair, 1));

        _mm_cvtss_f32(_mm_sqrt_ss(total))
    }

    #[target_feature(enable = "sse2")]
    unsafe fn sum_lengths(values: &[Vec4]) -> f32 {
        let mut sum = 0.0f32;
        for v in values {
            sum += Self::length(v);
        }
        sum
    }
}
