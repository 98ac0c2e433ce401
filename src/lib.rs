//! vec4len: Euclidean length of 4-lane `f32` vectors across SIMD backends
//!
//! **vec4len** computes `sqrt(x² + y² + z² + w²)` for a 16-byte [`Vec4`] through
//! several interchangeable code paths and sums it over large seeded arrays so
//! the paths can be measured against each other:
//!
//! 1. **Scalar** - plain `f32` arithmetic on the named fields
//! 2. **x86_64** - SSE2 shuffles, SSE4.1 `dpps`, AVX 256-bit `vdpps`
//! 3. **ARM / WebAssembly** - NEON and SIMD128
//!
//! # Design Principles
//!
//! - **One value, one layout**: `Vec4` is `#[repr(C, align(16))]`, so the named
//!   fields, the `[f32; 4]` view and a SIMD register all see the same 16 bytes
//! - **Runtime dispatch**: the best backend is detected once and cached
//! - **Zero unsafe in public API**: `unsafe` is isolated in `backends`
//! - **Equivalence is tested**: every backend must agree with the scalar path
//!
//! # Quick Start
//!
//! ```rust
//! use vec4len::{length, sum_lengths, Vec4};
//!
//! assert_eq!(length(3.0, 4.0, 0.0, 0.0), 5.0);
//!
//! let values = [Vec4::new(3.0, 4.0, 0.0, 0.0), Vec4::new(0.0, 0.0, 0.0, 2.0)];
//! assert_eq!(sum_lengths(&values), 7.0);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

pub mod backends;
pub mod driver;
pub mod error;
pub mod vec4;

pub use driver::{PopulateConfig, Vec4Array, DEFAULT_COUNT, DEFAULT_SEED};
pub use error::{Result, Vec4Error};
pub use vec4::Vec4;

/// Length code path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Scalar reference (no SIMD)
    Scalar,
    /// SSE2 multiply with shuffle-based horizontal add (x86_64 baseline)
    SSE2,
    /// SSE4.1 `dpps` horizontal dot product
    SSE41,
    /// AVX 256-bit `vdpps`, two vectors per register
    AVX,
    /// ARM NEON (aarch64)
    NEON,
    /// WebAssembly SIMD128
    WasmSIMD,
    /// Auto-select best available
    Auto,
}

impl Backend {
    /// Every concrete backend, in ascending order of preference
    pub const ALL: [Backend; 6] = [
        Backend::Scalar,
        Backend::SSE2,
        Backend::SSE41,
        Backend::AVX,
        Backend::NEON,
        Backend::WasmSIMD,
    ];

    /// Lower-case name accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Scalar => "scalar",
            Backend::SSE2 => "sse2",
            Backend::SSE41 => "sse4.1",
            Backend::AVX => "avx",
            Backend::NEON => "neon",
            Backend::WasmSIMD => "wasm-simd",
            Backend::Auto => "auto",
        }
    }

    /// Whether this backend can run on the current CPU and target
    ///
    /// `Auto` is always available since it resolves to something that is.
    ///
    /// # Examples
    ///
    /// ```
    /// use vec4len::Backend;
    ///
    /// assert!(Backend::Scalar.is_available());
    /// assert!(Backend::Auto.is_available());
    /// ```
    pub fn is_available(&self) -> bool {
        match self {
            Backend::Scalar | Backend::Auto => true,
            #[cfg(target_arch = "x86_64")]
            Backend::SSE2 => is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "x86_64")]
            Backend::SSE41 => is_x86_feature_detected!("sse4.1"),
            #[cfg(target_arch = "x86_64")]
            Backend::AVX => is_x86_feature_detected!("avx"),
            #[cfg(target_arch = "aarch64")]
            Backend::NEON => std::arch::is_aarch64_feature_detected!("neon"),
            #[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
            Backend::WasmSIMD => true,
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }

    /// Resolve `Auto` to a concrete backend, leaving others untouched
    pub fn resolve(self) -> Self {
        match self {
            Backend::Auto => best_backend(),
            other => other,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = Vec4Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" | "reference" => Ok(Backend::Scalar),
            "sse2" => Ok(Backend::SSE2),
            "sse4.1" | "sse41" | "sse4_1" => Ok(Backend::SSE41),
            "avx" => Ok(Backend::AVX),
            "neon" => Ok(Backend::NEON),
            "wasm" | "wasm-simd" | "simd128" => Ok(Backend::WasmSIMD),
            "auto" => Ok(Backend::Auto),
            _ => Err(Vec4Error::UnknownBackend(s.to_string())),
        }
    }
}

/// Detect best SIMD backend for x86_64 platforms
#[cfg(target_arch = "x86_64")]
fn detect_x86_backend() -> Backend {
    if is_x86_feature_detected!("avx") {
        return Backend::AVX;
    }
    if is_x86_feature_detected!("sse4.1") {
        return Backend::SSE41;
    }
    if is_x86_feature_detected!("sse2") {
        return Backend::SSE2;
    }
    Backend::Scalar
}

/// Detect best SIMD backend for ARM platforms
#[cfg(target_arch = "aarch64")]
fn detect_arm_backend() -> Backend {
    if std::arch::is_aarch64_feature_detected!("neon") {
        Backend::NEON
    } else {
        Backend::Scalar
    }
}

/// Detect best SIMD backend for WebAssembly
#[cfg(target_arch = "wasm32")]
fn detect_wasm_backend() -> Backend {
    #[cfg(target_feature = "simd128")]
    {
        Backend::WasmSIMD
    }
    #[cfg(not(target_feature = "simd128"))]
    {
        Backend::Scalar
    }
}

/// Select the best available backend for the current platform
///
/// Performs runtime CPU feature detection on every call. The selection
/// follows this priority:
///
/// **x86_64**: AVX, then SSE4.1, then SSE2
///
/// **aarch64**: NEON, then Scalar
///
/// **wasm32**: SIMD128 if compiled in, else Scalar
///
/// **Other platforms**: Scalar
///
/// # Examples
///
/// ```
/// use vec4len::select_best_available_backend;
///
/// let backend = select_best_available_backend();
/// assert!(backend.is_available());
/// ```
pub fn select_best_available_backend() -> Backend {
    #[cfg(target_arch = "x86_64")]
    {
        detect_x86_backend()
    }

    #[cfg(target_arch = "aarch64")]
    {
        detect_arm_backend()
    }

    #[cfg(target_arch = "wasm32")]
    {
        detect_wasm_backend()
    }

    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "aarch64",
        target_arch = "wasm32"
    )))]
    {
        Backend::Scalar
    }
}

static BEST_BACKEND: OnceLock<Backend> = OnceLock::new();

/// Best available backend, detected on first use and cached for the process
pub fn best_backend() -> Backend {
    *BEST_BACKEND.get_or_init(|| {
        let backend = select_best_available_backend();
        #[cfg(feature = "tracing")]
        tracing::debug!(%backend, "selected length backend");
        backend
    })
}

/// Every backend that can run on this CPU
pub fn available_backends() -> Vec<Backend> {
    Backend::ALL
        .iter()
        .copied()
        .filter(Backend::is_available)
        .collect()
}

/// Euclidean length of `(x, y, z, w)` on the best available backend
///
/// # Examples
///
/// ```
/// assert_eq!(vec4len::length(0.0, 0.0, 0.0, 0.0), 0.0);
/// assert_eq!(vec4len::length(3.0, 4.0, 0.0, 0.0), 5.0);
/// ```
pub fn length(x: f32, y: f32, z: f32, w: f32) -> f32 {
    Vec4::new(x, y, z, w).length()
}

/// Sum of the lengths of `values`, accumulated in index order on the best
/// available backend
///
/// An empty slice sums to `0.0`.
pub fn sum_lengths(values: &[Vec4]) -> f32 {
    // SAFETY: best_backend() only returns backends detected on this CPU
    unsafe { backends::sum_lengths(best_backend(), values) }
}
