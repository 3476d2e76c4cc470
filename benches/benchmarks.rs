use criterion::Criterion;
use modbloom::{BloomFilter, Config, HashVariant, Parameters};

fn filter(variant: HashVariant, nbits: usize) -> BloomFilter {
    let config = Config::new(
        10_000_000,
        nbits / 15,
        nbits,
        7,
        variant,
        Parameters::Generate { master_seed: 1 },
    )
    .with_seed_divisor(100);
    BloomFilter::from_config(&config).expect("valid benchmark configuration")
}

fn populate(bf: &mut BloomFilter, rng: &fastrand::Rng, n: usize) {
    for _ in 0..n {
        bf.insert(rng.u64(..));
    }
}

fn bench_bloom_filter_insert(c: &mut Criterion) {
    for (name, variant) in [
        ("insert-seeded-15000", HashVariant::Seeded),
        ("insert-affine-15000", HashVariant::AffineModular),
    ] {
        c.bench_function(name, |b| {
            let rng = fastrand::Rng::with_seed(1);
            let mut bf = filter(variant, 15_000);

            b.iter(|| bf.insert(rng.u64(..)));
        });
    }
}

fn bench_bloom_filter_check(c: &mut Criterion) {
    for (name, variant) in [
        ("check-seeded-150000", HashVariant::Seeded),
        ("check-affine-150000", HashVariant::AffineModular),
    ] {
        c.bench_function(name, |b| {
            let rng = fastrand::Rng::with_seed(2);
            let mut bf = filter(variant, 150_000);
            populate(&mut bf, &rng, 10_000);

            b.iter(|| bf.contains(rng.u64(..)));
        });
    }
}

criterion::criterion_group!(benches, bench_bloom_filter_insert, bench_bloom_filter_check);
criterion::criterion_main!(benches);
