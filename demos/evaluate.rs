//! Sweep the number of hash functions at 15 bits per element and report the
//! observed false positive rate for both hash families.
//!
//! Run with `RUST_LOG=modbloom=info` to see each evaluation as it completes.
use modbloom::evaluate::sweep;
use modbloom::{Config, HashVariant, Parameters};
use tracing_subscriber::EnvFilter;

const UNIVERSE: u64 = 10_000_000;
const INSERTED: usize = 10_000;

fn main() -> modbloom::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let rng = fastrand::Rng::with_seed(1);
    let data: Vec<u64> = (0..INSERTED * 4).map(|_| rng.u64(0..UNIVERSE)).collect();

    for variant in [HashVariant::Seeded, HashVariant::AffineModular] {
        let config = Config::new(
            UNIVERSE,
            INSERTED,
            0,
            1,
            variant,
            Parameters::Generate { master_seed: 7 },
        )
        .with_bits_per_element(15);

        println!("{} (n = {}):", variant, config.filter_bits);
        for (k, evaluation) in sweep(&config, &data, 5..=15)? {
            println!(
                "  k = {:>2}  observed = {:.5}  expected = {:.5}",
                k,
                evaluation.false_positive_rate(),
                evaluation.expected_false_positive_rate,
            );
        }
    }
    Ok(())
}
