//! A simple example showing the use of a Bloom filter.
use modbloom::hash::AffineHashes;
use modbloom::{BloomFilter, HashFamily};

fn main() -> modbloom::Result<()> {
    let hashes = AffineHashes::new(vec![3, 17], vec![5, 2], 1_000_003, 128)?;
    let mut bf: BloomFilter = BloomFilter::new(HashFamily::AffineModular(hashes));

    bf.insert(4);
    bf.insert(99);

    bf.contains(4); // true
    bf.contains(99); // true
    bf.contains(7); // false

    bf.count(); // 2

    Ok(())
}
