//! AVX backend implementation (256-bit `vdpps`)
//!
//! `vdpps` works on each 128-bit half independently, so one 256-bit register
//! holds two consecutive `Vec4` values and produces both dot products at once
//! (lane 0 and lane 4). Square roots are taken with a single `vsqrtps`.
//!
//! Lengths are still added to the running sum one at a time in index order,
//! which keeps the sum comparable with the scalar path.
//!
//! # Safety
//!
//! Callers must check `is_x86_feature_detected!("avx")`. A `Vec4` slice is only
//! 16-byte aligned, so 256-bit loads are unaligned.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::sse41::DOT_MASK;
use super::LengthBackend;
use crate::Vec4;

/// AVX backend (256-bit SIMD, two vectors per register)
pub struct AvxBackend;

impl LengthBackend for AvxBackend {
    #[inline]
    #[target_feature(enable = "avx")]
    unsafe fn length(v: &Vec4) -> f32 {
        let va = _mm_load_ps(v.as_array().as_ptr());
        let dot = _mm_dp_ps(va, va, DOT_MASK);
        _mm_cvtss_f32(_mm_sqrt_ss(dot))
    }

    #[target_feature(enable = "avx")]
    unsafe fn sum_lengths(values: &[Vec4]) -> f32 {
        let flat: &[f32] = bytemuck::cast_slice(values);
        let mut sum = 0.0f32;

        for pair in flat.chunks_exact(2 * Vec4::LANES) {
            let vab = _mm256_loadu_ps(pair.as_ptr());
            let dots = _mm256_dp_ps(vab, vab, DOT_MASK);
            let lens = _mm256_sqrt_ps(dots);

            sum += _mm_cvtss_f32(_mm256_castps256_ps128(lens));
            sum += _mm_cvtss_f32(_mm256_extractf128_ps(lens, 1));
        }

        // Odd element out
        if values.len() % 2 == 1 {
            if let Some(last) = values.last() {
                sum += Self::length(last);
            }
        }

        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::scalar::ScalarBackend;

    fn avx_available() -> bool {
        if is_x86_feature_detected!("avx") {
            true
        } else {
            eprintln!("Skipping AVX test: CPU does not support AVX");
            false
        }
    }

    #[test]
    fn test_avx_length() {
        if !avx_available() {
            return;
        }
        let v = Vec4::new(0.0, 0.0, 3.0, 4.0);
        assert_eq!(unsafe { AvxBackend::length(&v) }, 5.0);
    }

    #[test]
    fn test_avx_sum_lengths_even_and_odd() {
        if !avx_available() {
            return;
        }
        let values: Vec<Vec4> = (1..=5).map(|i| Vec4::new(i as f32, 0.0, 0.0, 0.0)).collect();

        // Odd count exercises the tail, even count the pairs only
        assert_eq!(unsafe { AvxBackend::sum_lengths(&values) }, 15.0);
        assert_eq!(unsafe { AvxBackend::sum_lengths(&values[..4]) }, 10.0);
        assert_eq!(unsafe { AvxBackend::sum_lengths(&values[..1]) }, 1.0);
        assert_eq!(unsafe { AvxBackend::sum_lengths(&[]) }, 0.0);
    }

    #[test]
    fn test_avx_pair_halves_do_not_mix() {
        if !avx_available() {
            return;
        }
        let values = [Vec4::new(0.0, 0.0, 0.0, 100.0), Vec4::new(1.0, 0.0, 0.0, 0.0)];
        assert_eq!(unsafe { AvxBackend::sum_lengths(&values) }, 101.0);
    }

    #[test]
    fn test_avx_matches_scalar_and_sse41() {
        if !avx_available() {
            return;
        }
        // Same per-element lengths as SSE4.1 and the same accumulation order
        let values: Vec<Vec4> = (0..1001)
            .map(|i| {
                let f = i as f32;
                Vec4::new(f * 0.001, (f * 0.3).sin(), 0.25, (f * 0.7).cos())
            })
            .collect();

        let scalar = unsafe { ScalarBackend::sum_lengths(&values) };
        let avx = unsafe { AvxBackend::sum_lengths(&values) };
        assert!((scalar - avx).abs() <= 1e-5 * scalar);

        if is_x86_feature_detected!("sse4.1") {
            let sse41 = unsafe { crate::backends::sse41::Sse41Backend::sum_lengths(&values) };
            assert_eq!(avx.to_bits(), sse41.to_bits());
        }
    }
}
