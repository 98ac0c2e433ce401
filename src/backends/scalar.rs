//! Scalar (non-SIMD) backend implementation
//!
//! This is the portable reference that works on all platforms. Every SIMD
//! backend is checked against it.

use super::LengthBackend;
use crate::Vec4;

/// Scalar backend (portable, no SIMD)
pub struct ScalarBackend;

impl LengthBackend for ScalarBackend {
    // SAFETY: This function is safe because:
    // 1. Only named field reads, no pointer arithmetic
    // 2. Marked unsafe only to match LengthBackend trait interface
    #[inline(always)]
    unsafe fn length(v: &Vec4) -> f32 {
        (v.x * v.x + v.y * v.y + v.z * v.z + v.w * v.w).sqrt()
    }

    // SAFETY: This function is safe because:
    // 1. All slice accesses go through the iterator
    // 2. Marked unsafe only to match LengthBackend trait interface
    unsafe fn sum_lengths(values: &[Vec4]) -> f32 {
        let mut sum = 0.0f32;
        for v in values {
            sum += Self::length(v);
        }
        sum
    }
}
