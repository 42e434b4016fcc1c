//! Health attribute identifiers and unit labels
//!
//! The attribute set is closed: every place that needs per-attribute data
//! matches on [`HealthAttribute`] exhaustively, so adding a variant is a
//! compile error until the catalog covers it.

use serde::{Deserialize, Serialize};

/// A numeric health measurement that can be placed on a histogram axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthAttribute {
    Height,
    BodyMass,
    BodyMassIndex,
    LeanBodyMass,
    BodyFatPercentage,
    HeartRate,
    RestingHeartRate,
    WalkingHeartRateAverage,
    HeartRateVariabilitySDN,
    OxygenSaturation,
    BodyTemperature,
    BloodPressureDiastolic,
    BloodPressureSystolic,
    RespiratoryRate,
    StepCount,
    DistanceWalkingRunning,
    BasalEnergyBurned,
    ActiveEnergyBurned,
    AppleExerciseTime,
    Vo2Max,
    BloodGlucoseA,
    BloodGlucoseB,
    ForcedExpiratoryVolume,
    ForcedVitalCapacity,
    PeakExpiratoryFlowRate,
    NumberOfTimesFallen,
    PeripheralPerfusionIndex,
}

impl HealthAttribute {
    /// Every attribute, in the default histogram axis order
    pub const ALL: [HealthAttribute; 27] = [
        HealthAttribute::Height,
        HealthAttribute::BodyMass,
        HealthAttribute::BodyMassIndex,
        HealthAttribute::LeanBodyMass,
        HealthAttribute::BodyFatPercentage,
        HealthAttribute::HeartRate,
        HealthAttribute::RestingHeartRate,
        HealthAttribute::WalkingHeartRateAverage,
        HealthAttribute::HeartRateVariabilitySDN,
        HealthAttribute::OxygenSaturation,
        HealthAttribute::BodyTemperature,
        HealthAttribute::BloodPressureDiastolic,
        HealthAttribute::BloodPressureSystolic,
        HealthAttribute::RespiratoryRate,
        HealthAttribute::StepCount,
        HealthAttribute::DistanceWalkingRunning,
        HealthAttribute::BasalEnergyBurned,
        HealthAttribute::ActiveEnergyBurned,
        HealthAttribute::AppleExerciseTime,
        HealthAttribute::Vo2Max,
        HealthAttribute::BloodGlucoseA,
        HealthAttribute::BloodGlucoseB,
        HealthAttribute::ForcedExpiratoryVolume,
        HealthAttribute::ForcedVitalCapacity,
        HealthAttribute::PeakExpiratoryFlowRate,
        HealthAttribute::NumberOfTimesFallen,
        HealthAttribute::PeripheralPerfusionIndex,
    ];

    /// Stable identifier, identical to the serialized form
    pub fn id(&self) -> &'static str {
        match self {
            HealthAttribute::Height => "height",
            HealthAttribute::BodyMass => "bodyMass",
            HealthAttribute::BodyMassIndex => "bodyMassIndex",
            HealthAttribute::LeanBodyMass => "leanBodyMass",
            HealthAttribute::BodyFatPercentage => "bodyFatPercentage",
            HealthAttribute::HeartRate => "heartRate",
            HealthAttribute::RestingHeartRate => "restingHeartRate",
            HealthAttribute::WalkingHeartRateAverage => "walkingHeartRateAverage",
            HealthAttribute::HeartRateVariabilitySDN => "heartRateVariabilitySDN",
            HealthAttribute::OxygenSaturation => "oxygenSaturation",
            HealthAttribute::BodyTemperature => "bodyTemperature",
            HealthAttribute::BloodPressureDiastolic => "bloodPressureDiastolic",
            HealthAttribute::BloodPressureSystolic => "bloodPressureSystolic",
            HealthAttribute::RespiratoryRate => "respiratoryRate",
            HealthAttribute::StepCount => "stepCount",
            HealthAttribute::DistanceWalkingRunning => "distanceWalkingRunning",
            HealthAttribute::BasalEnergyBurned => "basalEnergyBurned",
            HealthAttribute::ActiveEnergyBurned => "activeEnergyBurned",
            HealthAttribute::AppleExerciseTime => "appleExerciseTime",
            HealthAttribute::Vo2Max => "vo2Max",
            HealthAttribute::BloodGlucoseA => "bloodGlucoseA",
            HealthAttribute::BloodGlucoseB => "bloodGlucoseB",
            HealthAttribute::ForcedExpiratoryVolume => "forcedExpiratoryVolume",
            HealthAttribute::ForcedVitalCapacity => "forcedVitalCapacity",
            HealthAttribute::PeakExpiratoryFlowRate => "peakExpiratoryFlowRate",
            HealthAttribute::NumberOfTimesFallen => "numberOfTimesFallen",
            HealthAttribute::PeripheralPerfusionIndex => "peripheralPerfusionIndex",
        }
    }
}

impl std::fmt::Display for HealthAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Unit label attached to an attribute configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "gr")]
    Gram,
    #[serde(rename = "unit")]
    Unitless,
    #[serde(rename = "percentage")]
    Percentage,
    #[serde(rename = "beat per minute")]
    BeatsPerMinute,
    #[serde(rename = "ms")]
    Millisecond,
    #[serde(rename = "saturation")]
    Saturation,
    #[serde(rename = "celsius")]
    Celsius,
    #[serde(rename = "mmHG")]
    MillimeterOfMercury,
    #[serde(rename = "respPerMinute")]
    RespirationsPerMinute,
    #[serde(rename = "kCal")]
    Kilocalorie,
    #[serde(rename = "steps")]
    Steps,
    #[serde(rename = "milesPerTime")]
    MilesPerTime,
    #[serde(rename = "minutes")]
    Minutes,
    #[serde(rename = "mlPerKg")]
    MilliliterPerKilogram,
    #[serde(rename = "mgPerDl")]
    MilligramPerDeciliter,
    #[serde(rename = "mmolPerL")]
    MillimolePerLiter,
    #[serde(rename = "lPerMin")]
    LiterPerMinute,
}

impl Unit {
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Centimeter => "cm",
            Unit::Gram => "gr",
            Unit::Unitless => "unit",
            Unit::Percentage => "percentage",
            Unit::BeatsPerMinute => "beat per minute",
            Unit::Millisecond => "ms",
            Unit::Saturation => "saturation",
            Unit::Celsius => "celsius",
            Unit::MillimeterOfMercury => "mmHG",
            Unit::RespirationsPerMinute => "respPerMinute",
            Unit::Kilocalorie => "kCal",
            Unit::Steps => "steps",
            Unit::MilesPerTime => "milesPerTime",
            Unit::Minutes => "minutes",
            Unit::MilliliterPerKilogram => "mlPerKg",
            Unit::MilligramPerDeciliter => "mgPerDl",
            Unit::MillimolePerLiter => "mmolPerL",
            Unit::LiterPerMinute => "lPerMin",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
