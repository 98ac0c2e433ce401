//! SSE4.1 backend implementation (`dpps` horizontal dot product)
//!
//! The register is dotted with itself using mask `0xF1`: the high nibble
//! multiplies all four lanes, the low nibble writes the sum to lane 0 only.
//!
//! # Performance
//!
//! `sum_lengths` walks the slice as a raw `f32` pointer and loads each
//! 16-byte element straight into a register, so no per-element `Vec4` copy is
//! made.
//!
//! # Safety
//!
//! Callers must check `is_x86_feature_detected!("sse4.1")`. Loads rely on
//! `Vec4` being 16-byte aligned.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::LengthBackend;
use crate::Vec4;

/// `dpps` mask: multiply lanes 0-3, store the sum in lane 0
pub const DOT_MASK: i32 = 0xF1;

/// SSE4.1 backend (128-bit SIMD with dot product)
pub struct Sse41Backend;

impl Sse41Backend {
    #[inline]
    #[target_feature(enable = "sse4.1")]
    unsafe fn length_at(ptr: *const f32) -> f32 {
        let va = _mm_load_ps(ptr);
        let dot = _mm_dp_ps(va, va, DOT_MASK);
        _mm_cvtss_f32(dot).sqrt()
    }
}

impl LengthBackend for Sse41Backend {
    #[inline]
    #[target_feature(enable = "sse4.1")]
    unsafe fn length(v: &Vec4) -> f32 {
        Self::length_at(v.as_array().as_ptr())
    }

    #[target_feature(enable = "sse4.1")]
    unsafe fn sum_lengths(values: &[Vec4]) -> f32 {
        let mut sum = 0.0f32;
        let mut ptr = values.as_ptr() as *const f32;
        let end = ptr.add(values.len() * Vec4::LANES);

        while ptr < end {
            sum += Self::length_at(ptr);
            ptr = ptr.add(Vec4::LANES);
        }

        sum
    }
}
