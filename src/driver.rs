//! Benchmark driver: a seeded array of [`Vec4`] and its length sum
//!
//! # Examples
//!
//! ```
//! use vec4len::{Backend, PopulateConfig, Vec4Array};
//!
//! let config = PopulateConfig::new().with_count(1_000).with_seed(7);
//! let array = Vec4Array::populate(&config).unwrap();
//!
//! let auto = array.sum_lengths();
//! let scalar = array.sum_lengths_with(Backend::Scalar).unwrap();
//! assert!((auto - scalar).abs() <= 1e-5 * scalar);
//! ```

use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{backends, Backend, Result, Vec4, Vec4Error};

/// Default number of elements in a populated array
pub const DEFAULT_COUNT: usize = 1_000_000;

/// Default generator seed
pub const DEFAULT_SEED: u64 = 1;

/// How to build a [`Vec4Array`]
///
/// All populated components are drawn in order x, y, z, w from a seeded
/// [`XorShiftRng`] in `[0, 1)`, so the same seed always yields the same array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateConfig {
    /// Number of elements
    pub count: usize,
    /// Generator seed
    pub seed: u64,
    /// Code path used by [`Vec4Array::sum_lengths`]
    pub backend: Backend,
}

impl Default for PopulateConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            seed: DEFAULT_SEED,
            backend: Backend::Auto,
        }
    }
}

impl PopulateConfig {
    /// One million elements, seed 1, auto-selected backend
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }
}

/// Fixed-size array of [`Vec4`] owned by the benchmark driver
///
/// Populated once, read many times. The backend is resolved and checked when
/// the array is built, so summation cannot hit an unsupported instruction set.
#[derive(Debug, Clone, PartialEq)]
pub struct Vec4Array {
    data: Vec<Vec4>,
    backend: Backend,
}

impl Vec4Array {
    /// Wrap existing values using the best available backend
    ///
    /// # Examples
    ///
    /// ```
    /// use vec4len::{Vec4, Vec4Array};
    ///
    /// let array = Vec4Array::from_vec(vec![Vec4::new(3.0, 4.0, 0.0, 0.0)]);
    /// assert_eq!(array.len(), 1);
    /// assert!((array.sum_lengths() - 5.0).abs() < 1e-6);
    /// ```
    pub fn from_vec(data: Vec<Vec4>) -> Self {
        Self {
            data,
            backend: crate::best_backend(),
        }
    }

    /// Wrap existing values with a specific backend (for benchmarking or testing)
    ///
    /// # Errors
    ///
    /// Returns [`Vec4Error::UnsupportedBackend`] if `backend` cannot run here.
    pub fn from_vec_with_backend(data: Vec<Vec4>, backend: Backend) -> Result<Self> {
        let backend = backend.resolve();
        if !backend.is_available() {
            return Err(Vec4Error::UnsupportedBackend(backend));
        }
        Ok(Self { data, backend })
    }

    /// Allocate `config.count` elements and fill them from the seeded generator
    ///
    /// # Errors
    ///
    /// Returns [`Vec4Error::InvalidInput`] for a zero count and
    /// [`Vec4Error::UnsupportedBackend`] if `config.backend` cannot run here.
    #[cfg_attr(
        feature = "tracing",
        instrument(skip(config), fields(count = config.count, seed = config.seed, backend = %config.backend))
    )]
    pub fn populate(config: &PopulateConfig) -> Result<Self> {
        if config.count == 0 {
            return Err(Vec4Error::InvalidInput(
                "element count must be positive".to_string(),
            ));
        }

        let mut rng = XorShiftRng::seed_from_u64(config.seed);
        let data: Vec<Vec4> = (0..config.count)
            .map(|_| {
                let x = rng.gen::<f32>();
                let y = rng.gen::<f32>();
                let z = rng.gen::<f32>();
                let w = rng.gen::<f32>();
                Vec4::new(x, y, z, w)
            })
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(bytes = data.len() * std::mem::size_of::<Vec4>(), "populated array");

        Self::from_vec_with_backend(data, config.backend)
    }

    pub fn as_slice(&self) -> &[Vec4] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the backend being used
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Sum every element's length in index order on this array's backend
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), fields(len = self.data.len(), backend = %self.backend)))]
    pub fn sum_lengths(&self) -> f32 {
        // SAFETY: the backend was checked for availability at construction
        unsafe { backends::sum_lengths(self.backend, &self.data) }
    }

    /// Sum every element's length on an explicit backend
    ///
    /// # Errors
    ///
    /// Returns [`Vec4Error::UnsupportedBackend`] if `backend` cannot run here.
    pub fn sum_lengths_with(&self, backend: Backend) -> Result<f32> {
        let backend = backend.resolve();
        if !backend.is_available() {
            return Err(Vec4Error::UnsupportedBackend(backend));
        }
        // SAFETY: availability was checked above
        Ok(unsafe { backends::sum_lengths(backend, &self.data) })
    }

    /// Run every available backend and compare with the scalar reference
    ///
    /// Returns `(backend, sum)` for each available backend, scalar first.
    ///
    /// # Errors
    ///
    /// Returns [`Vec4Error::Divergence`] for the first backend whose sum differs
    /// from the scalar sum by more than `tolerance` relative to the reference,
    /// and [`Vec4Error::InvalidInput`] for a negative or NaN tolerance.
    #[cfg_attr(feature = "tracing", instrument(skip(self), fields(len = self.data.len())))]
    pub fn verify_equivalence(&self, tolerance: f32) -> Result<Vec<(Backend, f32)>> {
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(Vec4Error::InvalidInput(format!(
                "tolerance must be non-negative, got {tolerance}"
            )));
        }

        let reference = self.sum_lengths_with(Backend::Scalar)?;
        let mut sums = Vec::new();

        for backend in crate::available_backends() {
            let actual = if backend == Backend::Scalar {
                reference
            } else {
                self.sum_lengths_with(backend)?
            };
            check_divergence(backend, reference, actual, tolerance)?;
            sums.push((backend, actual));
        }

        Ok(sums)
    }
}

fn check_divergence(backend: Backend, reference: f32, actual: f32, tolerance: f32) -> Result<()> {
    if within_tolerance(actual, reference, tolerance) {
        return Ok(());
    }

    #[cfg(feature = "tracing")]
    tracing::warn!(%backend, reference, actual, "backend diverged from scalar reference");
    Err(Vec4Error::Divergence {
        backend,
        reference,
        actual,
        tolerance,
    })
}

/// `|actual - reference| <= tolerance * |reference|`
///
/// NaN matches only NaN: an input NaN propagates through every backend.
fn within_tolerance(actual: f32, reference: f32, tolerance: f32) -> bool {
    if actual == reference || (actual.is_nan() && reference.is_nan()) {
        return true;
    }
    (actual - reference).abs() <= tolerance * reference.abs()
}

impl From<Vec<Vec4>> for Vec4Array {
    fn from(data: Vec<Vec4>) -> Self {
        Self::from_vec(data)
    }
}
