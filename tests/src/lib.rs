//! Health LDP Statistical Test Suite
//!
//! Long-running checks that need many trials to say anything:
//! - Disclosure frequencies of preferential and repeated sampling
//! - Uniformity of decoy draws
//! - Indexer properties across the built-in catalog
//!
//! All trials use seeded ChaCha20 generators so failures reproduce.

pub mod dp_property_tests;
pub mod indexer_properties;

/// Compute sample proportion
pub fn proportion(hits: usize, trials: usize) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    hits as f64 / trials as f64
}

/// Standard error of a proportion with true probability `p` over `trials`
pub fn proportion_standard_error(p: f64, trials: usize) -> f64 {
    (p * (1.0 - p) / trials as f64).sqrt()
}
