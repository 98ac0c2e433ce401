//! Backend implementations for different SIMD instruction sets
//!
//! Every backend computes the same quantity, `sqrt(x² + y² + z² + w²)`, from
//! the same 16 bytes, and sums it over slices in index order.
//!
//! # Safety
//!
//! All `unsafe` code is isolated within backend implementations. The public API
//! remains 100% safe: callers go through [`crate::Vec4::length_with`] and
//! [`crate::Vec4Array`], which check availability first.
//!
//! # Backends
//!
//! - `scalar`: Portable reference implementation (no SIMD)
//! - `sse2`: x86_64 baseline, multiply plus shuffle-based horizontal add
//! - `sse41`: x86_64 `dpps` horizontal dot product
//! - `avx`: x86_64 256-bit `vdpps`, two vectors per register
//! - `neon`: aarch64 `vmulq` plus `vaddvq`
//! - `wasm`: WebAssembly SIMD128

use crate::{Backend, Vec4};

pub mod scalar;

#[cfg(target_arch = "x86_64")]
pub mod sse2;

#[cfg(target_arch = "x86_64")]
pub mod sse41;

#[cfg(target_arch = "x86_64")]
pub mod avx;

#[cfg(target_arch = "aarch64")]
pub mod neon;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

use scalar::ScalarBackend;

/// Backend trait defining the length operations
///
/// # Safety
///
/// Implementations may use unsafe SIMD intrinsics. Callers must ensure the
/// CPU supports the target features the implementation is compiled for.
pub trait LengthBackend {
    /// Euclidean length: sqrt(x² + y² + z² + w²)
    ///
    /// # Safety
    ///
    /// The backend's target features must be available on this CPU.
    unsafe fn length(v: &Vec4) -> f32;

    /// Sum of lengths, accumulated in index order into an `f32`
    ///
    /// # Safety
    ///
    /// The backend's target features must be available on this CPU.
    unsafe fn sum_lengths(values: &[Vec4]) -> f32;
}

/// Length of `v` on `backend`
///
/// Backends that do not exist for this target fall back to scalar.
///
/// # Safety
///
/// `backend` must be available on this CPU (see [`Backend::is_available`]).
#[inline]
pub(crate) unsafe fn length(backend: Backend, v: &Vec4) -> f32 {
    match backend {
        Backend::Scalar => ScalarBackend::length(v),
        #[cfg(target_arch = "x86_64")]
        Backend::SSE2 => sse2::Sse2Backend::length(v),
        #[cfg(target_arch = "x86_64")]
        Backend::SSE41 => sse41::Sse41Backend::length(v),
        #[cfg(target_arch = "x86_64")]
        Backend::AVX => avx::AvxBackend::length(v),
        #[cfg(target_arch = "aarch64")]
        Backend::NEON => neon::NeonBackend::length(v),
        #[cfg(target_arch = "wasm32")]
        Backend::WasmSIMD => wasm::WasmBackend::length(v),
        Backend::Auto => length(crate::best_backend(), v),
        #[allow(unreachable_patterns)]
        _ => ScalarBackend::length(v),
    }
}

/// Sum of the lengths of `values` on `backend`
///
/// # Safety
///
/// `backend` must be available on this CPU (see [`Backend::is_available`]).
pub(crate) unsafe fn sum_lengths(backend: Backend, values: &[Vec4]) -> f32 {
    match backend {
        Backend::Scalar => ScalarBackend::sum_lengths(values),
        #[cfg(target_arch = "x86_64")]
        Backend::SSE2 => sse2::Sse2Backend::sum_lengths(values),
        #[cfg(target_arch = "x86_64")]
        Backend::SSE41 => sse41::Sse41Backend::sum_lengths(values),
        #[cfg(target_arch = "x86_64")]
        Backend::AVX => avx::AvxBackend::sum_lengths(values),
        #[cfg(target_arch = "aarch64")]
        Backend::NEON => neon::NeonBackend::sum_lengths(values),
        #[cfg(target_arch = "wasm32")]
        Backend::WasmSIMD => wasm::WasmBackend::sum_lengths(values),
        Backend::Auto => sum_lengths(crate::best_backend(), values),
        #[allow(unreachable_patterns)]
        _ => ScalarBackend::sum_lengths(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Vec4> {
        (0..37)
            .map(|i| {
                let f = i as f32;
                Vec4::new(f * 0.25, 1.0 - f * 0.01, (f * 0.7).sin(), (f * 1.3).cos())
            })
            .collect()
    }

    #[test]
    fn test_dispatch_matches_scalar_for_available_backends() {
        let values = sample();
        let reference = unsafe { ScalarBackend::sum_lengths(&values) };

        for backend in crate::available_backends() {
            let got = unsafe { sum_lengths(backend, &values) };
            assert!(
                (got - reference).abs() <= 1e-5 * reference,
                "{backend}: got {got}, want {reference}"
            );

            for v in &values {
                let single = unsafe { length(backend, v) };
                let want = v.length_scalar();
                assert!((single - want).abs() <= 1e-6 * want.max(f32::MIN_POSITIVE));
            }
        }
    }

    #[test]
    fn test_dispatch_auto() {
        let values = sample();
        let auto = unsafe { sum_lengths(Backend::Auto, &values) };
        let best = unsafe { sum_lengths(crate::best_backend(), &values) };
        assert_eq!(auto.to_bits(), best.to_bits());
    }

    #[test]
    fn test_dispatch_empty_slice() {
        for backend in crate::available_backends() {
            assert_eq!(unsafe { sum_lengths(backend, &[]) }, 0.0);
        }
    }
}
