//! Error types for vec4len operations

use thiserror::Error;

use crate::Backend;

/// Result type for vec4len operations
pub type Result<T> = std::result::Result<T, Vec4Error>;

/// Errors that can occur around length computation
///
/// The arithmetic itself never fails: NaN and infinity propagate per IEEE-754.
/// These cover backend selection, workload setup and cross-backend checks.
#[derive(Debug, Error, PartialEq)]
pub enum Vec4Error {
    /// Backend not supported on this CPU or target
    #[error("Backend not supported on this platform: {0}")]
    UnsupportedBackend(Backend),

    /// Backend name did not match any known backend
    #[error("Unknown backend: {0:?} (expected scalar, sse2, sse4.1, avx, neon, wasm-simd or auto)")]
    UnknownBackend(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Sum on one backend drifted from the scalar reference
    #[error("Backend {backend} diverged: expected {reference}, got {actual} (relative tolerance {tolerance})")]
    Divergence {
        /// Backend that diverged
        backend: Backend,
        /// Scalar reference sum
        reference: f32,
        /// Sum produced by `backend`
        actual: f32,
        /// Relative tolerance that was exceeded
        tolerance: f32,
    },
}
