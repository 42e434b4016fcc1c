//! Per-attribute histogram configuration
//!
//! [`ConfigTable`] is the injected catalog the indexer falls back to for
//! attributes without an explicit override. [`ConfigTable::defaults`] carries
//! the built-in catalog; deployments can substitute their own table, for
//! example one loaded from JSON.

use crate::attribute::{HealthAttribute, Unit};
use crate::bins::BinSpec;
use crate::error::{LdpError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Upper legal bound for open-ended cumulative measurements
pub const NUMBER_MAXIMUM: f64 = 99_999_999.0;

/// Default number of equal-width buckets per attribute
pub const DEFAULT_BUCKET_COUNT: usize = 15;

/// How one attribute is placed on its histogram axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeConfig {
    pub attribute: HealthAttribute,
    pub bins: BinSpec,
    pub legal_min: f64,
    pub legal_max: f64,
    pub unit: Unit,
}

impl AttributeConfig {
    pub fn new(
        attribute: HealthAttribute,
        bins: BinSpec,
        legal_min: f64,
        legal_max: f64,
        unit: Unit,
    ) -> Self {
        AttributeConfig {
            attribute,
            bins,
            legal_min,
            legal_max,
            unit,
        }
    }

    /// Check the legal range and the bin specification
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| LdpError::InvalidBinSpec {
            attribute: self.attribute,
            reason,
        };

        if !self.legal_min.is_finite() || !self.legal_max.is_finite() {
            return Err(invalid("legal range bounds must be finite".to_string()));
        }
        if self.legal_min > self.legal_max {
            return Err(invalid(format!(
                "legal min {} is above legal max {}",
                self.legal_min, self.legal_max
            )));
        }
        self.bins
            .validate(self.legal_min, self.legal_max)
            .map_err(invalid)
    }

    /// Whether `value` lies in `[legal_min, legal_max]`
    pub fn is_legal(&self, value: f64) -> bool {
        value.is_finite() && self.legal_min <= value && value <= self.legal_max
    }

    pub fn bucket_count(&self) -> usize {
        self.bins.bucket_count()
    }
}

/// Lookup of default configurations by attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTable {
    configs: HashMap<HealthAttribute, AttributeConfig>,
}

impl ConfigTable {
    /// An empty table; every attribute resolved against it is dropped
    pub fn empty() -> Self {
        ConfigTable::default()
    }

    /// The built-in catalog covering every [`HealthAttribute`]
    pub fn defaults() -> Self {
        HealthAttribute::ALL
            .into_iter()
            .map(default_config)
            .collect::<Vec<_>>()
            .into()
    }

    /// Build a table from a list of configurations
    ///
    /// A later entry for the same attribute replaces an earlier one.
    pub fn from_configs(configs: Vec<AttributeConfig>) -> Self {
        configs.into()
    }

    /// Parse a JSON array of configurations
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let configs: Vec<AttributeConfig> =
            serde_json::from_str(json).map_err(|e| LdpError::ConfigParse(e.to_string()))?;
        Ok(configs.into())
    }

    /// Serialize the table as a JSON array ordered like [`HealthAttribute::ALL`]
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String> {
        let ordered: Vec<&AttributeConfig> = HealthAttribute::ALL
            .iter()
            .filter_map(|a| self.configs.get(a))
            .collect();
        serde_json::to_string_pretty(&ordered).map_err(|e| LdpError::ConfigParse(e.to_string()))
    }

    pub fn get(&self, attribute: HealthAttribute) -> Option<&AttributeConfig> {
        self.configs.get(&attribute)
    }

    /// Insert or replace the configuration for its attribute
    pub fn insert(&mut self, config: AttributeConfig) -> Option<AttributeConfig> {
        self.configs.insert(config.attribute, config)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

impl From<Vec<AttributeConfig>> for ConfigTable {
    fn from(configs: Vec<AttributeConfig>) -> Self {
        ConfigTable {
            configs: configs.into_iter().map(|c| (c.attribute, c)).collect(),
        }
    }
}

/// Built-in configuration for one attribute
pub fn default_config(attribute: HealthAttribute) -> AttributeConfig {
    use HealthAttribute::*;

    let (legal_max, min, max, unit) = match attribute {
        ActiveEnergyBurned => (100_000.0, 1600.0, 4000.0, Unit::Kilocalorie),
        AppleExerciseTime => {
            return AttributeConfig::new(
                attribute,
                BinSpec::auto(0.0, 60.0 * 60.0 * 24.0, 24),
                0.0,
                NUMBER_MAXIMUM,
                Unit::Minutes,
            )
        }
        BasalEnergyBurned => (NUMBER_MAXIMUM, 1600.0, 1800.0, Unit::Kilocalorie),
        BloodGlucoseA => (999.0, 140.0, 200.0, Unit::MilligramPerDeciliter),
        BloodGlucoseB => (999.0, 7.8, 11.1, Unit::MillimolePerLiter),
        BloodPressureDiastolic => (999.0, 60.0, 80.0, Unit::MillimeterOfMercury),
        BloodPressureSystolic => (999.0, 110.0, 130.0, Unit::MillimeterOfMercury),
        BodyFatPercentage => (99.0, 6.0, 26.0, Unit::Percentage),
        // Grams, so the legal range has to reach past the bucket interval
        BodyMass => (999_999.0, 2000.0, 140_000.0, Unit::Gram),
        BodyMassIndex => (99.0, 18.0, 24.0, Unit::Unitless),
        BodyTemperature => (50.0, 35.0, 37.0, Unit::Celsius),
        DistanceWalkingRunning => (NUMBER_MAXIMUM, 0.0, 24.0, Unit::MilesPerTime),
        ForcedExpiratoryVolume => (999.0, 80.0, 120.0, Unit::Percentage),
        ForcedVitalCapacity => (999.0, 80.0, 120.0, Unit::Percentage),
        HeartRate => (999.0, 30.0, 140.0, Unit::BeatsPerMinute),
        HeartRateVariabilitySDN => (99.0, 0.0, 99.0, Unit::Millisecond),
        Height => (999.0, 23.0, 220.0, Unit::Centimeter),
        LeanBodyMass => (99.0, 60.0, 90.0, Unit::Percentage),
        NumberOfTimesFallen => (9999.0, 0.0, 100.0, Unit::Unitless),
        OxygenSaturation => (100.0, 96.0, 100.0, Unit::Percentage),
        PeakExpiratoryFlowRate => (999.0, 320.0, 550.0, Unit::LiterPerMinute),
        PeripheralPerfusionIndex => (99.0, 0.02, 20.0, Unit::Percentage),
        RespiratoryRate => (99.0, 10.0, 18.0, Unit::RespirationsPerMinute),
        RestingHeartRate => (999.0, 30.0, 140.0, Unit::BeatsPerMinute),
        StepCount => (NUMBER_MAXIMUM, 1000.0, 15_000.0, Unit::Steps),
        Vo2Max => (99.0, 20.0, 50.0, Unit::MilliliterPerKilogram),
        WalkingHeartRateAverage => (999.0, 50.0, 140.0, Unit::BeatsPerMinute),
    };

    AttributeConfig::new(
        attribute,
        BinSpec::auto(min, max, DEFAULT_BUCKET_COUNT),
        0.0,
        legal_max,
        unit,
    )
}
