//! vec4len CLI library
//!
//! Drives repeated timed executions of the length summation, lists backends,
//! and checks cross-backend equivalence. The binary in `main.rs` only parses
//! arguments and prints what these functions return.

pub mod error;
pub mod output;

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};
use vec4len::{Backend, PopulateConfig, Vec4Array};

pub use error::{CliError, Result};
pub use output::OutputFormat;

/// Result of `vec4len run`
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Backend that executed the passes
    pub backend: String,
    /// Elements in the array
    pub count: usize,
    /// Generator seed
    pub seed: u64,
    /// Number of timed passes
    pub iterations: u32,
    /// Sum of lengths (identical for every pass)
    pub sum: f32,
    /// Fastest pass in milliseconds
    pub min_ms: f64,
    /// Mean pass in milliseconds
    pub mean_ms: f64,
    /// Elements per second for the fastest pass
    pub elements_per_sec: f64,
}

/// One backend's sum in a `vec4len verify` report
#[derive(Debug, Clone, Serialize)]
pub struct BackendSum {
    pub backend: String,
    pub sum: f32,
    /// `|sum - reference| / |reference|`
    pub relative_error: f64,
}

/// Result of `vec4len verify`
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub count: usize,
    pub seed: u64,
    pub tolerance: f32,
    /// Scalar reference sum
    pub reference: f32,
    pub results: Vec<BackendSum>,
}

/// One row of `vec4len backends`
#[derive(Debug, Clone, Serialize)]
pub struct BackendInfo {
    pub name: String,
    pub available: bool,
}

/// Result of `vec4len backends`
#[derive(Debug, Clone, Serialize)]
pub struct BackendsReport {
    /// What `auto` resolves to on this CPU
    pub selected: String,
    pub backends: Vec<BackendInfo>,
}

/// Populate the array and time `iterations` passes of the summation
///
/// # Errors
///
/// Fails if the backend is unavailable, `count` is zero or `iterations` is zero.
pub fn run_benchmark(config: &PopulateConfig, iterations: u32) -> Result<RunReport> {
    if iterations == 0 {
        return Err(vec4len::Vec4Error::InvalidInput("iterations must be positive".to_string()).into());
    }

    let array = Vec4Array::populate(config)?;
    info!(backend = %array.backend(), count = array.len(), iterations, "starting run");

    let mut sum = 0.0f32;
    let mut passes = Vec::with_capacity(iterations as usize);
    for pass in 0..iterations {
        let start = Instant::now();
        sum = std::hint::black_box(array.sum_lengths());
        let elapsed = start.elapsed();
        debug!(pass, elapsed_us = elapsed.as_micros() as u64, sum, "pass complete");
        passes.push(elapsed);
    }

    let min = passes.iter().min().copied().unwrap_or_default();
    let total: Duration = passes.iter().sum();
    let mean = total / iterations;

    let min_secs = min.as_secs_f64();
    let elements_per_sec = if min_secs > 0.0 {
        array.len() as f64 / min_secs
    } else {
        f64::INFINITY
    };

    Ok(RunReport {
        backend: array.backend().to_string(),
        count: array.len(),
        seed: config.seed,
        iterations,
        sum,
        min_ms: min_secs * 1e3,
        mean_ms: mean.as_secs_f64() * 1e3,
        elements_per_sec,
    })
}

/// Run every available backend over the seeded array and compare with scalar
///
/// # Errors
///
/// Returns the library's `Divergence` error if any backend exceeds `tolerance`.
pub fn verify(config: &PopulateConfig, tolerance: f32) -> Result<VerifyReport> {
    let array = Vec4Array::populate(config)?;
    let sums = array.verify_equivalence(tolerance)?;
    let reference = match sums.first() {
        Some(&(Backend::Scalar, sum)) => sum,
        _ => array.sum_lengths_with(Backend::Scalar)?,
    };

    let results = sums
        .into_iter()
        .map(|(backend, sum)| BackendSum {
            backend: backend.to_string(),
            sum,
            relative_error: relative_error(sum, reference),
        })
        .collect();

    Ok(VerifyReport {
        count: array.len(),
        seed: config.seed,
        tolerance,
        reference,
        results,
    })
}

/// Every backend with its availability on this CPU
pub fn list_backends() -> BackendsReport {
    BackendsReport {
        selected: vec4len::best_backend().to_string(),
        backends: Backend::ALL
            .iter()
            .map(|b| BackendInfo {
                name: b.to_string(),
                available: b.is_available(),
            })
            .collect(),
    }
}

fn relative_error(sum: f32, reference: f32) -> f64 {
    if sum == reference || (sum.is_nan() && reference.is_nan()) {
        return 0.0;
    }
    ((sum as f64) - (reference as f64)).abs() / (reference as f64).abs()
}
