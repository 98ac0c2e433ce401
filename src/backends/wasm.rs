//! WebAssembly SIMD128 backend implementation
//!
//! SIMD128 has no horizontal add, so the four squares are extracted and summed
//! pairwise: `(s0 + s1) + (s2 + s3)`.
//!
//! # Safety
//!
//! Only available when compiled with `target_feature = "simd128"`.

#[cfg(target_arch = "wasm32")]
use std::arch::wasm32::*;

use super::LengthBackend;
use crate::Vec4;

/// WebAssembly SIMD128 backend (128-bit SIMD)
pub struct WasmBackend;

impl LengthBackend for WasmBackend {
    #[inline]
    #[target_feature(enable = "simd128")]
    unsafe fn length(v: &Vec4) -> f32 {
        let va = v128_load(v.as_array().as_ptr() as *const v128);
        let sq = f32x4_mul(va, va);

        let lo = f32x4_extract_lane::<0>(sq) + f32x4_extract_lane::<1>(sq);
        let hi = f32x4_extract_lane::<2>(sq) + f32x4_extract_lane::<3>(sq);
        (lo + hi).sqrt()
    }

    #[target_feature(enable = "simd128")]
    unsafe fn sum_lengths(values: &[Vec4]) -> f32 {
        let mut sum = 0.0f32;
        for v in values {
            sum += Self::length(v);
        }
        sum
    }
}
