//! Property-Based Tests for Local Differential Privacy Mechanisms
//!
//! These tests verify the statistical behavior of the disclosure mechanisms:
//! - Truthful disclosure frequency of preferential sampling (≈ ps)
//! - Per-cell inclusion frequency of repeated sampling (ps / 1 - ps)
//! - Uniformity of decoys over the non-true cells
//!
//! Tolerances are expressed in standard errors of a proportion.

use health_ldp::LocalDifferentialPrivacy;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Sampler with a fixed seed so every run draws the same trials
pub fn seeded_sampler(seed: u64) -> LocalDifferentialPrivacy<ChaCha20Rng> {
    LocalDifferentialPrivacy::with_rng(ChaCha20Rng::seed_from_u64(seed))
}

#[cfg(test)]
mod preferential_tests {
    use super::*;
    use crate::{proportion, proportion_standard_error};
    use std::collections::HashMap;

    fn truthful_rate(ps: f64, trials: usize, seed: u64) -> f64 {
        let mut ldp = seeded_sampler(seed);
        let index = [2usize, 1, 4, 1];
        let shape = [3usize, 2, 5];

        let hits = (0..trials)
            .filter(|_| {
                ldp.preferential_sampling(&index, &shape, ps).unwrap() == index[..3]
            })
            .count();
        proportion(hits, trials)
    }

    #[test]
    fn test_truthful_rate_tracks_ps() {
        let trials = 20_000;
        for (ps, seed) in [(0.1, 1u64), (0.5, 2), (0.7, 3), (0.95, 4)] {
            let rate = truthful_rate(ps, trials, seed);
            let se = proportion_standard_error(ps, trials);

            // Within 4 standard errors
            assert!(
                (rate - ps).abs() < 4.0 * se,
                "Truthful rate {} should be close to ps = {} (SE = {})",
                rate,
                ps,
                se
            );
        }
    }

    #[test]
    fn test_decoys_uniform_over_other_cells() {
        let trials = 30_000;
        let mut ldp = seeded_sampler(5);
        let index = [0usize, 1, 1];
        let shape = [2usize, 3];
        let mut counts: HashMap<Vec<usize>, usize> = HashMap::new();

        for _ in 0..trials {
            let disclosed = ldp.preferential_sampling(&index, &shape, 0.0).unwrap();
            *counts.entry(disclosed).or_default() += 1;
        }

        // The true cell never appears as a decoy
        assert!(!counts.contains_key(&vec![0, 1]));
        assert_eq!(counts.len(), 5);

        let expected = 1.0 / 5.0;
        let se = proportion_standard_error(expected, trials);
        for (cell, count) in counts {
            let rate = proportion(count, trials);
            assert!(
                (rate - expected).abs() < 4.0 * se,
                "Decoy {:?} rate {} should be close to {}",
                cell,
                rate,
                expected
            );
        }
    }

    #[test]
    fn test_inference_advantage_bounded_by_ps() {
        // An observer guessing "the disclosed cell is the truth" is right with
        // probability ps, whichever cell the subject occupies
        let trials = 20_000;
        let ps = 0.6;
        let shape = [4usize, 4];
        let se = proportion_standard_error(ps, trials);

        for (seed, truth) in [(11u64, [0usize, 0, 1]), (12, [3, 3, 1]), (13, [1, 2, 1])] {
            let mut ldp = seeded_sampler(seed);
            let hits = (0..trials)
                .filter(|_| ldp.preferential_sampling(&truth, &shape, ps).unwrap() == truth[..2])
                .count();
            let rate = proportion(hits, trials);
            assert!(
                (rate - ps).abs() < 4.0 * se,
                "Guess accuracy {} for {:?} should be close to {}",
                rate,
                truth,
                ps
            );
        }
    }
}

#[cfg(test)]
mod repeated_tests {
    use super::*;
    use crate::{proportion, proportion_standard_error};
    use std::collections::HashMap;

    #[test]
    fn test_cell_frequencies_for_three_by_two() {
        // Shape [3, 2], true index [2, 1, 1], ps = 0.6 over 10,000 trials:
        // the true cell appears ≈ 6,000 times, every other cell ≈ 4,000 times
        let trials = 10_000;
        let ps = 0.6;
        let mut ldp = seeded_sampler(2024);
        let mut counts: HashMap<Vec<usize>, usize> = HashMap::new();

        for _ in 0..trials {
            for cell in ldp.repeated_sampling(&[2, 1, 1], &[3, 2], ps).unwrap() {
                *counts.entry(cell).or_default() += 1;
            }
        }

        assert_eq!(counts.len(), 6);
        let se = proportion_standard_error(ps, trials);
        for (cell, count) in counts {
            let expected = if cell == [2, 1] { ps } else { 1.0 - ps };
            let rate = proportion(count, trials);
            assert!(
                (rate - expected).abs() < 4.0 * se,
                "Cell {:?} appeared {} times, expected about {:.0}",
                cell,
                count,
                expected * trials as f64
            );
        }
    }

    #[test]
    fn test_output_size_expectation() {
        // E[|output|] = ps + (size - 1)(1 - ps)
        let trials = 5_000;
        let ps = 0.8;
        let shape = [3usize, 3, 2];
        let size = 18.0;
        let mut ldp = seeded_sampler(77);

        let total: usize = (0..trials)
            .map(|_| ldp.repeated_sampling(&[1, 2, 0, 1], &shape, ps).unwrap().len())
            .sum();
        let mean = total as f64 / trials as f64;
        let expected = ps + (size - 1.0) * (1.0 - ps);

        // Var(|output|) = ps(1-ps) + (size-1)(1-ps)ps
        let variance = ps * (1.0 - ps) * size;
        let se = (variance / trials as f64).sqrt();
        assert!(
            (mean - expected).abs() < 4.0 * se,
            "Mean output size {} should be close to {}",
            mean,
            expected
        );
    }

    #[test]
    fn test_lazy_variant_has_same_frequencies() {
        let trials = 10_000;
        let ps = 0.3;
        let mut ldp = seeded_sampler(99);
        let mut truth_hits = 0usize;
        let mut other_hits = 0usize;

        for _ in 0..trials {
            for cell in ldp.repeated_sampling_iter(&[0, 0, 1], &[2, 2], ps).unwrap() {
                if cell == [0, 0] {
                    truth_hits += 1;
                } else if cell == [1, 1] {
                    other_hits += 1;
                }
            }
        }

        let se = proportion_standard_error(ps, trials);
        assert!((proportion(truth_hits, trials) - ps).abs() < 4.0 * se);
        assert!((proportion(other_hits, trials) - (1.0 - ps)).abs() < 4.0 * se);
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use health_ldp::{flat_index_to_coordinates, histogram_size, validate_index_for_shape};
    use proptest::prelude::*;

    proptest! {
        /// Every disclosure is a coordinate vector inside the shape
        #[test]
        fn preferential_output_in_shape(
            shape in proptest::collection::vec(2usize..6, 1..5),
            ps in 0.0..=1.0f64,
            seed in any::<u64>(),
            pick in any::<u64>()
        ) {
            let size = histogram_size(&shape).unwrap();
            let mut index = flat_index_to_coordinates(pick % size, &shape).unwrap();
            index.push(1);

            let disclosed = seeded_sampler(seed).preferential_sampling(&index, &shape, ps).unwrap();
            let mut as_index = disclosed.clone();
            as_index.push(1);
            prop_assert!(validate_index_for_shape(&as_index, &shape).is_ok());
        }

        /// Repeated sampling never reports more cells than the histogram holds
        #[test]
        fn repeated_output_bounded(
            shape in proptest::collection::vec(1usize..4, 1..4),
            ps in 0.0..=1.0f64,
            seed in any::<u64>()
        ) {
            let size = histogram_size(&shape).unwrap() as usize;
            let mut index = vec![0usize; shape.len()];
            index.push(1);

            let cells = seeded_sampler(seed).repeated_sampling(&index, &shape, ps).unwrap();
            prop_assert!(cells.len() <= size);
            let mut deduped = cells.clone();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), cells.len());
        }

        /// Probabilities outside [0, 1] are always rejected
        #[test]
        fn out_of_range_probability_rejected(ps in prop_oneof![-10.0..-1e-9f64, 1.0 + 1e-9..10.0f64]) {
            let mut ldp = seeded_sampler(0);
            prop_assert!(ldp.preferential_sampling(&[0, 1], &[2], ps).is_err());
            prop_assert!(ldp.repeated_sampling(&[0, 1], &[2], ps).is_err());
        }
    }
}
