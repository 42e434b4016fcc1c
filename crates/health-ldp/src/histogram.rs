//! Histogram shape and one-hot index types, plus the validator both the
//! indexer and the sampler run before trusting an `(index, shape)` pair.
//!
//! # Layout
//!
//! A histogram over `n` attributes has shape `[s_0, .., s_{n-1}]` and holds
//! exactly one observation. Its index is `[c_0, .., c_{n-1}, 1]`: one bucket
//! coordinate per axis followed by the count of the single nonzero cell.
//! Coordinate vectors are flattened in row-major order, so the first axis is
//! the most significant.

use crate::error::{LdpError, Result};
use serde::{Deserialize, Serialize};

/// Trailing entry of every [`HistogramIndex`]
pub const ONE_HOT_COUNT: usize = 1;

/// Bucket count per histogram axis
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistogramShape(Vec<usize>);

impl HistogramShape {
    pub fn new(dimensions: Vec<usize>) -> Self {
        HistogramShape(dimensions)
    }

    pub fn dimensions(&self) -> &[usize] {
        &self.0
    }

    /// Number of axes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of cells, `None` if it overflows `u64`
    pub fn size(&self) -> Option<u64> {
        histogram_size(&self.0)
    }
}

impl From<Vec<usize>> for HistogramShape {
    fn from(dimensions: Vec<usize>) -> Self {
        HistogramShape(dimensions)
    }
}

impl AsRef<[usize]> for HistogramShape {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

/// Coordinates of the single nonzero cell followed by [`ONE_HOT_COUNT`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistogramIndex(Vec<usize>);

impl HistogramIndex {
    /// Build an index from bucket coordinates, appending the count entry
    pub fn from_coordinates(mut coordinates: Vec<usize>) -> Self {
        coordinates.push(ONE_HOT_COUNT);
        HistogramIndex(coordinates)
    }

    /// Wrap a raw index that already carries its trailing count
    pub fn from_raw(raw: Vec<usize>) -> Self {
        HistogramIndex(raw)
    }

    /// Bucket coordinates without the trailing count
    pub fn coordinates(&self) -> &[usize] {
        match self.0.split_last() {
            Some((_, coordinates)) => coordinates,
            None => &[],
        }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[usize]> for HistogramIndex {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

/// Product of all dimensions, `None` on `u64` overflow
///
/// An empty shape has exactly one (empty) coordinate vector.
pub fn histogram_size(shape: &[usize]) -> Option<u64> {
    shape
        .iter()
        .try_fold(1u64, |size, &dim| size.checked_mul(dim as u64))
}

/// Check that every shape entry is a positive bucket count
pub fn validate_shape(shape: &[usize]) -> Result<()> {
    if let Some(axis) = shape.iter().position(|&dim| dim == 0) {
        return Err(LdpError::InvalidIndex(format!(
            "histogram shape cannot have non-positive entries (axis {})",
            axis
        )));
    }
    Ok(())
}

/// Check that `index` addresses a cell of a histogram with `shape`
///
/// The index must carry one coordinate per axis plus the trailing count, and
/// every coordinate must be below its axis size. Neither input is modified.
pub fn validate_index_for_shape(index: &[usize], shape: &[usize]) -> Result<()> {
    if index.len() != shape.len() + 1 {
        return Err(LdpError::InvalidIndex(format!(
            "expected {} entries for {} axes, got {}",
            shape.len() + 1,
            shape.len(),
            index.len()
        )));
    }
    validate_shape(shape)?;
    validate_coordinates(&index[..shape.len()], shape)
}

/// Check a bare coordinate vector (no trailing count) against `shape`
pub fn validate_coordinates(coordinates: &[usize], shape: &[usize]) -> Result<()> {
    if coordinates.len() != shape.len() {
        return Err(LdpError::InvalidIndex(format!(
            "expected {} coordinates, got {}",
            shape.len(),
            coordinates.len()
        )));
    }
    for (axis, (&coordinate, &dim)) in coordinates.iter().zip(shape).enumerate() {
        if coordinate >= dim {
            return Err(LdpError::InvalidIndex(format!(
                "coordinate {} on axis {} is outside 0..{}",
                coordinate, axis, dim
            )));
        }
    }
    Ok(())
}

/// Decompose a row-major flat index into its coordinate vector
///
/// Divides by the product of the remaining axis sizes, taking the quotient as
/// the coordinate and carrying the remainder, most significant axis first.
pub fn flat_index_to_coordinates(flat_index: u64, shape: &[usize]) -> Result<Vec<usize>> {
    validate_shape(shape)?;
    let size = histogram_size(shape).ok_or(LdpError::HistogramTooLarge)?;
    if flat_index >= size {
        return Err(LdpError::FlatIndexOutOfRange { flat_index, size });
    }

    Ok(decompose(flat_index, shape, size))
}

/// Mixed-radix decomposition for a flat index already known to be below `size`
pub(crate) fn decompose(flat_index: u64, shape: &[usize], size: u64) -> Vec<usize> {
    let mut stride = size;
    let mut remainder = flat_index;
    let mut coordinates = Vec::with_capacity(shape.len());
    for &dim in shape {
        stride /= dim as u64;
        coordinates.push((remainder / stride) as usize);
        remainder %= stride;
    }
    coordinates
}

/// Row-major flat index of a coordinate vector
pub fn coordinates_to_flat_index(coordinates: &[usize], shape: &[usize]) -> Result<u64> {
    validate_shape(shape)?;
    validate_coordinates(coordinates, shape)?;
    coordinates
        .iter()
        .zip(shape)
        .try_fold(0u64, |flat, (&coordinate, &dim)| {
            flat.checked_mul(dim as u64)?.checked_add(coordinate as u64)
        })
        .ok_or(LdpError::HistogramTooLarge)
}
