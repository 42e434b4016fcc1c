//! Error type shared by the indexer and the sampler.
//!
//! Every variant is fail-fast: the operation that produced it is aborted and
//! nothing is retried. Non-fatal conditions are not errors; they are reported
//! through [`crate::IndexerWarning`].

use crate::attribute::HealthAttribute;
use thiserror::Error;

/// Errors that can occur while indexing measurements or sampling disclosures
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LdpError {
    /// Attribute list and override list disagree
    #[error("provided configurations {found:?} are not compatible with attributes {expected:?}")]
    ConfigurationMismatch {
        expected: Vec<HealthAttribute>,
        found: Vec<HealthAttribute>,
    },

    /// Bin specification is malformed for the attribute's legal range
    #[error("invalid bin specification for {attribute}: {reason}")]
    InvalidBinSpec {
        attribute: HealthAttribute,
        reason: String,
    },

    /// No value was loaded for a configured attribute
    #[error("no value present for attribute {0}")]
    MissingValue(HealthAttribute),

    /// No resolved configuration exists for a configured attribute
    #[error("no configuration present for attribute {0}")]
    MissingConfig(HealthAttribute),

    /// Measurement lies outside `[legal_min, legal_max]`
    #[error("value {value} for {attribute} is outside the legal range [{legal_min}, {legal_max}]")]
    OutOfLegalRange {
        attribute: HealthAttribute,
        value: f64,
        legal_min: f64,
        legal_max: f64,
    },

    /// Index does not fit the histogram shape
    #[error("index is invalid for histogram shape: {0}")]
    InvalidIndex(String),

    /// Disclosure probability outside `[0, 1]`
    #[error("{0} is not a probability")]
    InvalidProbability(f64),

    /// Exclusion set covers the whole coordinate space
    #[error("too many indices are excluded: {excluded} of {size}")]
    TooManyExclusions { excluded: u64, size: u64 },

    /// Flat index is not below the histogram size
    #[error("flat index {flat_index} is out of range for histogram size {size}")]
    FlatIndexOutOfRange { flat_index: u64, size: u64 },

    /// Integer range with `max <= min`
    #[error("'max' ({max}) must be greater than 'min' ({min})")]
    InvalidRange { min: i64, max: i64 },

    /// Histogram size does not fit in a `u64`
    #[error("histogram size overflows u64")]
    HistogramTooLarge,

    /// Configuration table could not be parsed
    #[error("failed to parse configuration table: {0}")]
    ConfigParse(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LdpError>;
