//! Index random measurement vectors and print their private disclosures.
//!
//! Run with: cargo run -p health-ldp --example disclosure_demo

use health_ldp::{
    BinSpec, ConfigTable, HistogramIndexer, LdpError, LocalDifferentialPrivacy, Measurement,
};
use rand::Rng;

const ROUNDS: usize = 100;
const PS: f64 = 0.7;

fn main() -> Result<(), LdpError> {
    let defaults = ConfigTable::defaults();
    let mut indexer = HistogramIndexer::with_defaults(&defaults)?;
    let mut ldp = LocalDifferentialPrivacy::from_entropy();
    let mut rng = rand::thread_rng();

    println!("=== Health LDP Disclosure Demo ===\n");
    println!("Axes: {}", indexer.shape().len());
    println!("Shape: {:?}\n", indexer.shape().dimensions());

    let mut truthful = 0usize;
    for round in 0..ROUNDS {
        // One value per attribute, drawn from the attribute's bucket interval
        let measurements: Vec<Measurement> = indexer
            .configs()
            .iter()
            .map(|config| {
                let value = match &config.bins {
                    BinSpec::Auto { interval, .. } => rng.gen_range(interval.min..=interval.max),
                    BinSpec::HardCoded { .. } => rng.gen_range(config.legal_min..=config.legal_max),
                };
                Measurement::new(config.attribute, value)
            })
            .collect();

        let index = indexer.load_values(&measurements)?.clone();
        let disclosed = ldp.preferential_sampling(index.as_slice(), indexer.shape().dimensions(), PS)?;
        if disclosed.as_slice() == index.coordinates() {
            truthful += 1;
        }

        if round < 5 {
            println!("Round {}", round);
            println!("  Index:     {:?}", index.as_slice());
            println!("  Disclosed: {:?}", disclosed);
        }
    }

    println!(
        "\nTruthful disclosures: {}/{} (expected about {:.0})",
        truthful,
        ROUNDS,
        PS * ROUNDS as f64
    );
    Ok(())
}
