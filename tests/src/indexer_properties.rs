//! Properties of Histogram Indexing
//!
//! Checks that hold across the built-in attribute catalog:
//! - Auto bins send the legal extremes to the first and last bucket
//! - Bucket assignment never decreases as the value grows
//! - Every legal value lands in a cell of the indexer's shape

use health_ldp::{ConfigTable, HealthAttribute, HistogramIndexer, Measurement};

/// Measurements at a fixed fraction of every catalog attribute's legal range
pub fn catalog_measurements(fraction: f64) -> Vec<Measurement> {
    let defaults = ConfigTable::defaults();
    HealthAttribute::ALL
        .iter()
        .filter_map(|attribute| defaults.get(*attribute))
        .map(|config| {
            let value = config.legal_min + (config.legal_max - config.legal_min) * fraction;
            Measurement::new(config.attribute, value)
        })
        .collect()
}

/// Indexer over the whole built-in catalog
pub fn catalog_indexer() -> health_ldp::Result<HistogramIndexer> {
    HistogramIndexer::new(&ConfigTable::defaults(), Some(&HealthAttribute::ALL), None)
}

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn test_legal_extremes_hit_outer_buckets() {
        let defaults = ConfigTable::defaults();
        for attribute in HealthAttribute::ALL {
            let config = defaults.get(attribute).unwrap();
            let last = config.bucket_count() - 1;

            assert_eq!(
                config.bins.bucket_for(config.legal_min),
                Some(0),
                "{} legal min should fall in the first bucket",
                attribute
            );
            assert_eq!(
                config.bins.bucket_for(config.legal_max),
                Some(last),
                "{} legal max should fall in the last bucket",
                attribute
            );
        }
    }

    #[test]
    fn test_buckets_monotonic_in_value() {
        let defaults = ConfigTable::defaults();
        for attribute in HealthAttribute::ALL {
            let config = defaults.get(attribute).unwrap();
            let steps = 200;
            let mut previous = 0usize;
            for step in 0..=steps {
                let value = config.legal_min
                    + (config.legal_max - config.legal_min) * step as f64 / steps as f64;
                let bucket = config.bins.bucket_for(value).unwrap();
                assert!(
                    bucket >= previous,
                    "{} bucket dropped from {} to {} at {}",
                    attribute,
                    previous,
                    bucket,
                    value
                );
                previous = bucket;
            }
        }
    }

    #[test]
    fn test_catalog_index_in_shape() {
        let indexer = catalog_indexer().unwrap();
        let shape = indexer.shape().dimensions();
        assert_eq!(shape.len(), HealthAttribute::ALL.len());

        for fraction in [0.0, 0.001, 0.25, 0.5, 0.999, 1.0] {
            let index = indexer.compute_index(&catalog_measurements(fraction)).unwrap();
            assert_eq!(index.len(), shape.len() + 1);
            assert_eq!(index.as_slice().last(), Some(&1));
            for (coordinate, dim) in index.coordinates().iter().zip(shape) {
                assert!(coordinate < dim, "fraction {}: {} >= {}", fraction, coordinate, dim);
            }
        }
    }

    #[test]
    fn test_catalog_size_overflows() {
        // 15^26 * 24 cells does not fit a u64
        assert_eq!(catalog_indexer().unwrap().shape().size(), None);
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use health_ldp::{
        coordinates_to_flat_index, flat_index_to_coordinates, histogram_size, AttributeConfig,
        BinSpec, Interval, Unit,
    };
    use proptest::prelude::*;

    proptest! {
        /// Any legal catalog value maps to a valid index
        #[test]
        fn catalog_values_always_index(fraction in 0.0..=1.0f64) {
            let indexer = catalog_indexer().unwrap();
            let index = indexer.compute_index(&catalog_measurements(fraction)).unwrap();
            prop_assert_eq!(index.len(), indexer.shape().len() + 1);
        }

        /// Contiguous hard-coded bins place every legal value in exactly the
        /// bucket whose half-open range holds it, with the top value in the last
        #[test]
        fn hard_coded_partition_assigns_every_value(
            cuts in proptest::collection::btree_set(1u32..1000, 1..8),
            value in 0.0..=1000.0f64
        ) {
            let mut edges: Vec<f64> = vec![0.0];
            edges.extend(cuts.iter().map(|c| *c as f64));
            edges.push(1000.0);
            edges.dedup();
            let bins: Vec<Interval> = edges.windows(2).map(|w| Interval::new(w[0], w[1])).collect();
            let count = bins.len();

            let config = AttributeConfig::new(
                HealthAttribute::StepCount,
                BinSpec::hard_coded(bins),
                0.0,
                1000.0,
                Unit::Steps,
            );
            prop_assert!(config.validate().is_ok());

            let bucket = config.bins.bucket_for(value).unwrap();
            prop_assert!(bucket < count);
            prop_assert!(edges[bucket] <= value);
            if bucket + 1 < count {
                prop_assert!(value < edges[bucket + 1]);
            }
        }

        /// Flat index and coordinates convert back and forth over small shapes
        #[test]
        fn flat_index_round_trip(
            shape in proptest::collection::vec(1usize..7, 1..5),
            pick in any::<u64>()
        ) {
            let size = histogram_size(&shape).unwrap();
            let flat = pick % size;
            let coordinates = flat_index_to_coordinates(flat, &shape).unwrap();
            prop_assert_eq!(coordinates_to_flat_index(&coordinates, &shape).unwrap(), flat);
        }
    }
}
