//! Bucket boundary model
//!
//! A [`BinSpec`] describes how one attribute's legal domain is cut into
//! buckets, either as an explicit list of contiguous intervals or as an
//! interval split into equal-width buckets.

use serde::{Deserialize, Serialize};

/// Closed numeric interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Interval { min, max }
    }

    /// Whether `value` lies in `[min, max]`
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// How an attribute's values are mapped onto bucket coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BinSpec {
    /// Explicit contiguous intervals covering the legal range
    HardCoded { bins: Vec<Interval> },
    /// `bucket_count` equal-width buckets over `interval`
    ///
    /// Values outside the interval are clamped into the first or last bucket.
    Auto {
        interval: Interval,
        bucket_count: usize,
    },
}

impl BinSpec {
    pub fn hard_coded(bins: Vec<Interval>) -> Self {
        BinSpec::HardCoded { bins }
    }

    pub fn auto(min: f64, max: f64, bucket_count: usize) -> Self {
        BinSpec::Auto {
            interval: Interval::new(min, max),
            bucket_count,
        }
    }

    /// Number of buckets, i.e. this attribute's histogram shape entry
    pub fn bucket_count(&self) -> usize {
        match self {
            BinSpec::HardCoded { bins } => bins.len(),
            BinSpec::Auto { bucket_count, .. } => *bucket_count,
        }
    }

    /// Map a value onto its bucket
    ///
    /// Returns `None` for a hard-coded spec when no interval contains the
    /// value, and for an auto spec with no buckets or an empty interval.
    /// Callers are expected to have checked the legal range and validated
    /// the spec first, which rules both out.
    pub fn bucket_for(&self, value: f64) -> Option<usize> {
        match self {
            BinSpec::HardCoded { bins } => {
                // Shared boundaries belong to the later interval
                let mut found = None;
                for (i, bin) in bins.iter().enumerate() {
                    if bin.contains(value) {
                        found = Some(i);
                    }
                }
                found
            }
            BinSpec::Auto {
                interval,
                bucket_count,
            } => {
                if *bucket_count == 0 || !(interval.min < interval.max) {
                    return None;
                }
                let clamped = value.clamp(interval.min, interval.max);
                let bucket_width = interval.width() / *bucket_count as f64;
                let bucket = ((clamped - interval.min) / bucket_width).floor() as usize;
                Some(bucket.min(bucket_count - 1))
            }
        }
    }

    /// Check the spec against the attribute's legal range
    ///
    /// On failure the returned string describes the first violation found.
    pub fn validate(&self, legal_min: f64, legal_max: f64) -> Result<(), String> {
        match self {
            BinSpec::HardCoded { bins } => validate_hard_coded(bins, legal_min, legal_max),
            BinSpec::Auto {
                interval,
                bucket_count,
            } => {
                if *bucket_count == 0 {
                    return Err("bucket count must be positive".to_string());
                }
                if !interval.is_finite() {
                    return Err("interval bounds must be finite".to_string());
                }
                if interval.min >= interval.max {
                    return Err(format!(
                        "interval min {} must be below max {}",
                        interval.min, interval.max
                    ));
                }
                Ok(())
            }
        }
    }
}

fn validate_hard_coded(bins: &[Interval], legal_min: f64, legal_max: f64) -> Result<(), String> {
    let (first, last) = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err("at least one interval is required".to_string()),
    };

    for (i, bin) in bins.iter().enumerate() {
        if !bin.is_finite() {
            return Err(format!("interval {} has non-finite bounds", i));
        }
        if bin.min > bin.max {
            return Err(format!(
                "interval {} has min {} above max {}",
                i, bin.min, bin.max
            ));
        }
    }

    for (i, pair) in bins.windows(2).enumerate() {
        let (current, next) = (pair[0], pair[1]);
        if current.max < next.min {
            return Err(format!(
                "gap between interval {} (max {}) and interval {} (min {})",
                i,
                current.max,
                i + 1,
                next.min
            ));
        }
        if current.max > next.min {
            return Err(format!(
                "interval {} (max {}) overlaps interval {} (min {})",
                i,
                current.max,
                i + 1,
                next.min
            ));
        }
    }

    if first.min != legal_min {
        return Err(format!(
            "first interval starts at {} but the legal range starts at {}",
            first.min, legal_min
        ));
    }
    if last.max != legal_max {
        return Err(format!(
            "last interval ends at {} but the legal range ends at {}",
            last.max, legal_max
        ));
    }

    Ok(())
}
