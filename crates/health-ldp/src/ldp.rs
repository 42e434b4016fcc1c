//! Local Differential Privacy for One-Hot Histograms
//!
//! A subject's measurements occupy exactly one cell of a multidimensional
//! histogram. The mechanisms here disclose that cell so that any observer of
//! the output can only guess the true cell with bounded confidence. They
//! operate purely on `(index, shape, ps)` and know nothing about attributes.
//!
//! # Mechanisms
//!
//! - **Preferential sampling** reports the true coordinates with probability
//!   `ps` and otherwise a decoy drawn uniformly from every other cell.
//! - **Repeated sampling** is randomized response over every cell: the true
//!   cell is reported with probability `ps`, every other cell independently
//!   with probability `1 - ps`.
//!
//! # Cost
//!
//! Repeated sampling visits all `∏ shape[i]` cells and is exponential in the
//! number of axes. It is only usable for small histograms; callers must bound
//! the histogram size themselves. [`LocalDifferentialPrivacy::repeated_sampling_iter`]
//! avoids materialising the output but still pays for every cell.
//!
//! # Randomness
//!
//! [`LocalDifferentialPrivacy`] owns its generator, ChaCha20 by default. The
//! free functions draw from the thread-local generator.

use crate::error::{LdpError, Result};
use crate::histogram::{
    coordinates_to_flat_index, decompose, histogram_size, validate_coordinates,
    validate_index_for_shape, validate_shape,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Draws attempted by rejection sampling before selecting by rank
pub const MAX_REJECTION_DRAWS: usize = 1024;

/// Histogram size above which repeated sampling logs a cost warning
pub const REPEATED_SAMPLING_WARN_CELLS: u64 = 1 << 20;

/// Disclosure mechanisms bound to a random source
#[derive(Debug, Clone)]
pub struct LocalDifferentialPrivacy<R: Rng = ChaCha20Rng> {
    rng: R,
}

impl LocalDifferentialPrivacy<ChaCha20Rng> {
    /// ChaCha20 seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(ChaCha20Rng::from_entropy())
    }

    /// Deterministic generator for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    /// Deterministic generator keyed by the SHA-256 of `label`
    pub fn from_label(label: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(label.as_bytes());
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&hasher.finalize());
        Self::with_rng(ChaCha20Rng::from_seed(seed))
    }
}

impl Default for LocalDifferentialPrivacy<ChaCha20Rng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> LocalDifferentialPrivacy<R> {
    pub fn with_rng(rng: R) -> Self {
        LocalDifferentialPrivacy { rng }
    }

    /// Give back the underlying generator
    pub fn into_inner(self) -> R {
        self.rng
    }

    /// Preferential sampling
    ///
    /// Returns the true coordinates of `index` (count entry dropped) with
    /// probability `ps`, otherwise coordinates drawn uniformly from every
    /// other cell of `shape`.
    ///
    /// # Arguments
    /// * `index` - The only non-zero cell, coordinates plus trailing count
    /// * `shape` - Bucket count per axis
    /// * `ps` - Probability of truthful disclosure, in `[0, 1]`
    ///
    /// # Errors
    /// * `InvalidProbability` if `ps` is outside `[0, 1]`
    /// * `InvalidIndex` if `index` does not fit `shape`
    /// * `TooManyExclusions` if `shape` has a single cell and a decoy is needed
    pub fn preferential_sampling(
        &mut self,
        index: &[usize],
        shape: &[usize],
        ps: f64,
    ) -> Result<Vec<usize>> {
        validate_probability(ps)?;
        validate_index_for_shape(index, shape)?;
        let truth = &index[..shape.len()];

        if self.rng.gen::<f64>() < ps {
            return Ok(truth.to_vec());
        }
        self.uniform_coordinates(shape, &[truth])
    }

    /// Repeated sampling (randomized response over every cell)
    ///
    /// Cells are visited in row-major order. The true cell is included with
    /// probability `ps`, every other cell independently with probability
    /// `1 - ps`. Order of the returned coordinates follows visiting order.
    ///
    /// # Caution
    /// Cost is linear in the number of cells, which grows exponentially with
    /// the number of axes. Do not call this on large histograms.
    pub fn repeated_sampling(
        &mut self,
        index: &[usize],
        shape: &[usize],
        ps: f64,
    ) -> Result<Vec<Vec<usize>>> {
        Ok(self.repeated_sampling_iter(index, shape, ps)?.collect())
    }

    /// Lazy form of [`repeated_sampling`](Self::repeated_sampling)
    ///
    /// Inputs are validated up front; the iterator then yields each included
    /// cell as its inclusion is decided, with identical per-cell
    /// probabilities.
    pub fn repeated_sampling_iter(
        &mut self,
        index: &[usize],
        shape: &[usize],
        ps: f64,
    ) -> Result<RepeatedSampling<'_, R>> {
        validate_probability(ps)?;
        validate_index_for_shape(index, shape)?;
        let size = histogram_size(shape).ok_or(LdpError::HistogramTooLarge)?;
        if size > REPEATED_SAMPLING_WARN_CELLS {
            tracing::warn!(cells = size, "repeated sampling over a large histogram");
        }
        let truth = coordinates_to_flat_index(&index[..shape.len()], shape)?;

        Ok(RepeatedSampling {
            rng: &mut self.rng,
            shape: shape.to_vec(),
            truth,
            ps,
            next: 0,
            size,
        })
    }

    /// Coordinates drawn uniformly from `shape`, skipping `exclude`
    ///
    /// Draws each axis independently and retries while the draw is excluded.
    /// After [`MAX_REJECTION_DRAWS`] failed draws the result is selected by
    /// rank among the remaining cells, so the call always terminates.
    ///
    /// # Errors
    /// * `InvalidIndex` if the shape or an excluded vector is malformed
    /// * `TooManyExclusions` if the distinct exclusions cover every cell
    pub fn uniform_coordinates<C: AsRef<[usize]>>(
        &mut self,
        shape: &[usize],
        exclude: &[C],
    ) -> Result<Vec<usize>> {
        validate_shape(shape)?;
        let mut excluded: HashSet<&[usize]> = HashSet::with_capacity(exclude.len());
        for coordinates in exclude {
            let coordinates = coordinates.as_ref();
            validate_coordinates(coordinates, shape)?;
            excluded.insert(coordinates);
        }

        let size = histogram_size(shape);
        if let Some(size) = size {
            if excluded.len() as u64 >= size {
                return Err(LdpError::TooManyExclusions {
                    excluded: excluded.len() as u64,
                    size,
                });
            }
        }

        for _ in 0..MAX_REJECTION_DRAWS {
            let candidate: Vec<usize> = shape.iter().map(|&dim| self.rng.gen_range(0..dim)).collect();
            if !excluded.contains(candidate.as_slice()) {
                return Ok(candidate);
            }
        }

        // Only reachable when nearly every cell is excluded, so the size is small
        let size = size.ok_or(LdpError::HistogramTooLarge)?;
        let mut skipped = excluded
            .iter()
            .map(|coordinates| coordinates_to_flat_index(coordinates, shape))
            .collect::<Result<Vec<u64>>>()?;
        skipped.sort_unstable();
        tracing::debug!(
            excluded = skipped.len(),
            cells = size,
            "rejection sampling exhausted, selecting by rank"
        );

        let mut flat = self.rng.gen_range(0..size - skipped.len() as u64);
        for excluded_flat in skipped {
            if excluded_flat <= flat {
                flat += 1;
            } else {
                break;
            }
        }
        Ok(decompose(flat, shape, size))
    }

    /// Integer drawn uniformly from `[min, max)`
    pub fn random_integer_in_range(&mut self, min: i64, max: i64) -> Result<i64> {
        if max <= min {
            return Err(LdpError::InvalidRange { min, max });
        }
        Ok(self.rng.gen_range(min..max))
    }
}

/// One-shot iterator over the cells included by repeated sampling
///
/// Created by [`LocalDifferentialPrivacy::repeated_sampling_iter`].
#[derive(Debug)]
pub struct RepeatedSampling<'a, R: Rng> {
    rng: &'a mut R,
    shape: Vec<usize>,
    truth: u64,
    ps: f64,
    next: u64,
    size: u64,
}

impl<R: Rng> Iterator for RepeatedSampling<'_, R> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.size {
            let flat = self.next;
            self.next += 1;

            let u: f64 = self.rng.gen();
            let included = if flat == self.truth {
                u < self.ps
            } else {
                u >= self.ps
            };
            if included {
                return Some(decompose(flat, &self.shape, self.size));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.size - self.next).ok();
        (0, remaining)
    }
}

/// Check that `ps` is a probability
pub fn validate_probability(ps: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&ps) {
        return Err(LdpError::InvalidProbability(ps));
    }
    Ok(())
}

/// [`LocalDifferentialPrivacy::preferential_sampling`] with the thread-local generator
pub fn preferential_sampling(index: &[usize], shape: &[usize], ps: f64) -> Result<Vec<usize>> {
    LocalDifferentialPrivacy::with_rng(rand::thread_rng()).preferential_sampling(index, shape, ps)
}

/// [`LocalDifferentialPrivacy::repeated_sampling`] with the thread-local generator
pub fn repeated_sampling(index: &[usize], shape: &[usize], ps: f64) -> Result<Vec<Vec<usize>>> {
    LocalDifferentialPrivacy::with_rng(rand::thread_rng()).repeated_sampling(index, shape, ps)
}

/// [`LocalDifferentialPrivacy::random_integer_in_range`] with the thread-local generator
pub fn random_integer_in_range(min: i64, max: i64) -> Result<i64> {
    LocalDifferentialPrivacy::with_rng(rand::thread_rng()).random_integer_in_range(min, max)
}
