//! Histogram indexer
//!
//! Maps one subject's measurement vector onto the coordinate of a single
//! cell in a multidimensional histogram. Each configured attribute is one
//! axis; its bucket count comes from the attribute's [`BinSpec`].
//!
//! # Lifecycle
//!
//! 1. Construction resolves and validates a configuration for every
//!    attribute and fixes the [`HistogramShape`].
//! 2. [`HistogramIndexer::load_values`] replaces the held measurements and
//!    recomputes the index. The index is replaced all-or-nothing: on error
//!    no index is held.
//!
//! [`HistogramIndexer::compute_index`] is the side-effect-free variant for
//! callers that share an indexer and only need a fresh result per call.
//!
//! [`BinSpec`]: crate::bins::BinSpec

use crate::attribute::HealthAttribute;
use crate::config::{AttributeConfig, ConfigTable};
use crate::error::{LdpError, Result};
use crate::histogram::{validate_index_for_shape, HistogramIndex, HistogramShape};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One entry of a measurement vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub attribute: HealthAttribute,
    pub value: Option<f64>,
}

impl Measurement {
    pub fn new(attribute: HealthAttribute, value: f64) -> Self {
        Measurement {
            attribute,
            value: Some(value),
        }
    }

    /// An entry whose value is absent
    pub fn missing(attribute: HealthAttribute) -> Self {
        Measurement {
            attribute,
            value: None,
        }
    }
}

/// Non-fatal conditions reported while configuring or loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexerWarning {
    /// Measurement for an attribute outside the configured set was skipped
    UnknownAttribute(HealthAttribute),
    /// Measurement was accepted without a value
    MissingValue(HealthAttribute),
    /// Attribute had no override and no default, so it was dropped
    MissingDefaultConfig(HealthAttribute),
}

/// Converts measurement vectors into one-hot histogram indices
#[derive(Debug, Clone)]
pub struct HistogramIndexer {
    attributes: Vec<HealthAttribute>,
    configs: HashMap<HealthAttribute, AttributeConfig>,
    shape: HistogramShape,
    dropped: Vec<HealthAttribute>,
    values: HashMap<HealthAttribute, Option<f64>>,
    index: Option<HistogramIndex>,
    warnings: Vec<IndexerWarning>,
    construction_warnings: Vec<IndexerWarning>,
}

impl HistogramIndexer {
    /// Indexer over every attribute, configured from `defaults`
    pub fn with_defaults(defaults: &ConfigTable) -> Result<Self> {
        Self::new(defaults, None, None)
    }

    /// Create an indexer
    ///
    /// # Arguments
    /// * `defaults` - Fallback catalog for attributes without an override
    /// * `attributes` - Histogram axes in order; defaults to
    ///   [`HealthAttribute::ALL`]
    /// * `overrides` - Explicit configurations replacing the defaults of
    ///   their attributes. When given together with `attributes`, their
    ///   attributes must match `attributes` exactly, order included
    ///
    /// # Errors
    /// * `ConfigurationMismatch` if attributes and overrides disagree or
    ///   either contains duplicates
    /// * `InvalidBinSpec` if any resolved configuration is malformed
    pub fn new(
        defaults: &ConfigTable,
        attributes: Option<&[HealthAttribute]>,
        overrides: Option<Vec<AttributeConfig>>,
    ) -> Result<Self> {
        let override_ids: Option<Vec<HealthAttribute>> = overrides
            .as_ref()
            .map(|configs| configs.iter().map(|c| c.attribute).collect());

        let requested: Vec<HealthAttribute> = match (attributes, &override_ids) {
            (Some(attributes), Some(ids)) => {
                if attributes != ids.as_slice() {
                    return Err(LdpError::ConfigurationMismatch {
                        expected: attributes.to_vec(),
                        found: ids.clone(),
                    });
                }
                attributes.to_vec()
            }
            (Some(attributes), None) => attributes.to_vec(),
            (None, _) => HealthAttribute::ALL.to_vec(),
        };

        if has_duplicates(&requested) {
            return Err(LdpError::ConfigurationMismatch {
                expected: dedup_in_order(&requested),
                found: requested,
            });
        }
        if let Some(ids) = override_ids.filter(|ids| has_duplicates(ids)) {
            return Err(LdpError::ConfigurationMismatch {
                expected: dedup_in_order(&ids),
                found: ids,
            });
        }

        let mut explicit: HashMap<HealthAttribute, AttributeConfig> = overrides
            .unwrap_or_default()
            .into_iter()
            .map(|c| (c.attribute, c))
            .collect();

        let mut resolved_attributes = Vec::with_capacity(requested.len());
        let mut configs = HashMap::with_capacity(requested.len());
        let mut dropped = Vec::new();
        let mut construction_warnings = Vec::new();

        for attribute in requested {
            let config = match explicit.remove(&attribute) {
                Some(config) => config,
                None => match defaults.get(attribute) {
                    Some(config) => config.clone(),
                    None => {
                        tracing::warn!(
                            attribute = %attribute,
                            "no default configuration, dropping attribute from histogram"
                        );
                        dropped.push(attribute);
                        construction_warnings.push(IndexerWarning::MissingDefaultConfig(attribute));
                        continue;
                    }
                },
            };
            config.validate()?;
            resolved_attributes.push(attribute);
            configs.insert(attribute, config);
        }

        let shape = HistogramShape::new(
            resolved_attributes
                .iter()
                .filter_map(|a| configs.get(a))
                .map(AttributeConfig::bucket_count)
                .collect(),
        );

        tracing::debug!(
            axes = shape.len(),
            dropped = dropped.len(),
            "histogram indexer configured"
        );

        Ok(HistogramIndexer {
            attributes: resolved_attributes,
            configs,
            shape,
            dropped,
            values: HashMap::new(),
            index: None,
            warnings: construction_warnings.clone(),
            construction_warnings,
        })
    }

    /// Replace the held measurement vector and recompute the index
    ///
    /// Entries for attributes outside the configured set are skipped and
    /// entries without a value are kept; both are reported as warnings. A
    /// missing value only fails once its attribute is indexed. On error the
    /// previous index is discarded and none is held.
    pub fn load_values(&mut self, measurements: &[Measurement]) -> Result<&HistogramIndex> {
        let (values, warnings) = self.collect_values(measurements);
        self.values = values;
        self.warnings = self.construction_warnings.clone();
        self.warnings.extend(warnings);
        self.index = None;

        let index = self.index_for(&self.values)?;
        let index: &HistogramIndex = self.index.insert(index);
        Ok(index)
    }

    /// Compute the index for `measurements` without touching held state
    pub fn compute_index(&self, measurements: &[Measurement]) -> Result<HistogramIndex> {
        let (values, _) = self.collect_values(measurements);
        self.index_for(&values)
    }

    /// Histogram axes, in index order
    pub fn attributes(&self) -> &[HealthAttribute] {
        &self.attributes
    }

    /// Resolved configuration for an axis
    pub fn config(&self, attribute: HealthAttribute) -> Option<&AttributeConfig> {
        self.configs.get(&attribute)
    }

    /// Resolved configurations, in index order
    pub fn configs(&self) -> Vec<&AttributeConfig> {
        self.attributes
            .iter()
            .filter_map(|a| self.configs.get(a))
            .collect()
    }

    pub fn shape(&self) -> &HistogramShape {
        &self.shape
    }

    /// Current index, or an empty slice before any successful load
    pub fn index(&self) -> &[usize] {
        match &self.index {
            Some(index) => index.as_slice(),
            None => {
                tracing::warn!("histogram index requested before values were loaded");
                &[]
            }
        }
    }

    /// Current index, if the last load succeeded
    pub fn try_index(&self) -> Option<&HistogramIndex> {
        self.index.as_ref()
    }

    /// Held value for an attribute, if one was loaded
    pub fn value(&self, attribute: HealthAttribute) -> Option<f64> {
        self.values.get(&attribute).copied().flatten()
    }

    /// Warnings raised at construction followed by those of the most recent load
    pub fn warnings(&self) -> &[IndexerWarning] {
        &self.warnings
    }

    /// Attributes dropped at construction for lack of a configuration
    pub fn dropped_attributes(&self) -> &[HealthAttribute] {
        &self.dropped
    }

    fn collect_values(
        &self,
        measurements: &[Measurement],
    ) -> (HashMap<HealthAttribute, Option<f64>>, Vec<IndexerWarning>) {
        let mut values = HashMap::with_capacity(self.attributes.len());
        let mut warnings = Vec::new();

        for measurement in measurements {
            let attribute = measurement.attribute;
            if !self.configs.contains_key(&attribute) {
                tracing::warn!(attribute = %attribute, "skipping measurement for unconfigured attribute");
                warnings.push(IndexerWarning::UnknownAttribute(attribute));
                continue;
            }
            if measurement.value.is_none() {
                tracing::warn!(attribute = %attribute, "measurement has no value");
                warnings.push(IndexerWarning::MissingValue(attribute));
            }
            values.insert(attribute, measurement.value);
        }

        (values, warnings)
    }

    fn index_for(&self, values: &HashMap<HealthAttribute, Option<f64>>) -> Result<HistogramIndex> {
        let mut coordinates = Vec::with_capacity(self.attributes.len());

        for &attribute in &self.attributes {
            let value = values
                .get(&attribute)
                .copied()
                .flatten()
                .ok_or(LdpError::MissingValue(attribute))?;
            let config = self
                .configs
                .get(&attribute)
                .ok_or(LdpError::MissingConfig(attribute))?;

            if !config.is_legal(value) {
                return Err(LdpError::OutOfLegalRange {
                    attribute,
                    value,
                    legal_min: config.legal_min,
                    legal_max: config.legal_max,
                });
            }

            let bucket = config.bins.bucket_for(value).ok_or_else(|| {
                LdpError::InvalidIndex(format!("no bucket of {} contains {}", attribute, value))
            })?;
            coordinates.push(bucket);
        }

        let index = HistogramIndex::from_coordinates(coordinates);
        validate_index_for_shape(index.as_slice(), self.shape.dimensions())?;
        Ok(index)
    }
}

fn has_duplicates(attributes: &[HealthAttribute]) -> bool {
    let mut seen = HashSet::with_capacity(attributes.len());
    attributes.iter().any(|a| !seen.insert(*a))
}

fn dedup_in_order(attributes: &[HealthAttribute]) -> Vec<HealthAttribute> {
    let mut seen = HashSet::with_capacity(attributes.len());
    attributes.iter().copied().filter(|a| seen.insert(*a)).collect()
}
