//! Health LDP - Histogram Indexing with Local Differential Privacy
//!
//! Converts one subject's vector of health measurements into the coordinate
//! of a single cell in a multidimensional histogram, then discloses that
//! coordinate through a local differential privacy mechanism so no observer
//! of the output can infer the true cell with certainty.
//!
//! # Features
//!
//! - Closed catalog of 27 health attributes with built-in bin configurations
//! - Hard-coded (explicit interval) and automatic (equal-width) binning
//! - Configuration validation: contiguity, coverage, legal ranges
//! - Preferential sampling and repeated sampling (randomized response)
//! - Seedable ChaCha20 randomness for reproducible experiments
//!
//! # Example
//!
//! ```rust
//! use health_ldp::{
//!     ConfigTable, HealthAttribute, HistogramIndexer, LocalDifferentialPrivacy, Measurement,
//! };
//!
//! let defaults = ConfigTable::defaults();
//! let mut indexer = HistogramIndexer::new(
//!     &defaults,
//!     Some(&[HealthAttribute::HeartRate, HealthAttribute::StepCount]),
//!     None,
//! )?;
//!
//! let index = indexer
//!     .load_values(&[
//!         Measurement::new(HealthAttribute::HeartRate, 72.0),
//!         Measurement::new(HealthAttribute::StepCount, 8000.0),
//!     ])?
//!     .clone();
//!
//! let mut ldp = LocalDifferentialPrivacy::from_entropy();
//! let disclosed = ldp.preferential_sampling(index.as_slice(), indexer.shape().dimensions(), 0.7)?;
//! assert_eq!(disclosed.len(), 2);
//! # Ok::<(), health_ldp::LdpError>(())
//! ```

pub mod attribute;
pub mod bins;
pub mod config;
pub mod error;
pub mod histogram;
pub mod indexer;
pub mod ldp;

// Re-export commonly used types for convenience
pub use attribute::{HealthAttribute, Unit};
pub use bins::{BinSpec, Interval};
pub use config::{default_config, AttributeConfig, ConfigTable};
pub use error::{LdpError, Result};
pub use histogram::{
    coordinates_to_flat_index, flat_index_to_coordinates, histogram_size,
    validate_index_for_shape, HistogramIndex, HistogramShape,
};
pub use indexer::{HistogramIndexer, IndexerWarning, Measurement};
pub use ldp::{
    preferential_sampling, random_integer_in_range, repeated_sampling, validate_probability,
    LocalDifferentialPrivacy, RepeatedSampling,
};
