// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Hash families mapping an integer key to `k` bit indices.
//!
//! Two families are provided:
//!
//! * [`SeededHashes`]: the i-th hash of `x` is a single draw from `[0, n)` after
//!   re-seeding a generator with `seed[i] + x`.
//! * [`AffineHashes`]: the i-th hash of `x` is `((a[i] * x + b[i]) mod P) mod n`,
//!   with `P` a prime no smaller than the key universe.
use tracing::debug;

use crate::error::{Error, Result};
use crate::generator::{Generator, StdGenerator};
use crate::prime;

/// Default divisor of the seeded family's seed range, `[0, n / divisor)`.
pub const DEFAULT_SEED_DIVISOR: u64 = 10_000;

/// Hash functions driven by a re-seeded pseudo-random generator.
#[derive(Clone, Debug)]
pub struct SeededHashes<G = StdGenerator> {
    seeds: Vec<u64>,
    nbits: usize,
    rng: G,
}

impl<G: Generator + Clone> SeededHashes<G> {
    /// Use the given seeds, one per hash function. `rng` is the prototype
    /// generator re-seeded for every hash.
    pub fn new(seeds: Vec<u64>, nbits: usize, rng: G) -> Result<Self> {
        if seeds.is_empty() {
            return Err(Error::ZeroParameter("hash count"));
        }
        if nbits == 0 {
            return Err(Error::ZeroParameter("filter bits"));
        }
        Ok(Self { seeds, nbits, rng })
    }

    /// Draw `k` seeds uniformly from `[0, nbits / divisor)`, with `rng` seeded
    /// by `master_seed`.
    ///
    /// Filters with fewer than `divisor` bits have an empty seed range; use
    /// [`SeededHashes::new`] with explicit seeds for those.
    pub fn generate(
        k: usize,
        nbits: usize,
        divisor: u64,
        master_seed: u64,
        mut rng: G,
    ) -> Result<Self> {
        if k == 0 {
            return Err(Error::ZeroParameter("hash count"));
        }
        if divisor == 0 {
            return Err(Error::ZeroParameter("seed divisor"));
        }
        let high = nbits as u64 / divisor;
        if high == 0 {
            return Err(Error::EmptySeedRange {
                bits: nbits,
                divisor,
            });
        }

        rng.seed(master_seed);
        let seeds: Vec<u64> = (0..k).map(|_| rng.draw_uniform(0, high)).collect();
        debug!(hashes = k, bits = nbits, ?seeds, "generated seeded hash family");

        Self::new(seeds, nbits, rng)
    }

    /// The per-function base seeds.
    pub fn seeds(&self) -> &[u64] {
        &self.seeds
    }

    fn index(&self, i: usize, key: u64) -> usize {
        let mut rng = self.rng.clone();
        rng.seed(self.seeds[i].wrapping_add(key));
        rng.draw_uniform(0, self.nbits as u64) as usize
    }
}

/// Universal hash functions of the form `((a * x + b) mod P) mod n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffineHashes {
    a: Vec<u64>,
    b: Vec<u64>,
    modulus: u64,
    nbits: usize,
}

impl AffineHashes {
    /// Use the given coefficient pairs `(a[i], b[i])` and prime `modulus`.
    pub fn new(a: Vec<u64>, b: Vec<u64>, modulus: u64, nbits: usize) -> Result<Self> {
        if a.is_empty() {
            return Err(Error::ZeroParameter("hash count"));
        }
        if a.len() != b.len() {
            return Err(Error::ParameterCount {
                what: "b coefficients",
                expected: a.len(),
                found: b.len(),
            });
        }
        if nbits == 0 {
            return Err(Error::ZeroParameter("filter bits"));
        }
        if !prime::is_prime(modulus) {
            return Err(Error::NotPrime(modulus));
        }
        Ok(Self {
            a,
            b,
            modulus,
            nbits,
        })
    }

    /// Draw `k` values of `a`, then `k` values of `b`, uniformly from
    /// `[0, nbits - 1)` with `rng` seeded by `master_seed`.
    pub fn generate<G: Generator>(
        k: usize,
        nbits: usize,
        modulus: u64,
        master_seed: u64,
        rng: &mut G,
    ) -> Result<Self> {
        if k == 0 {
            return Err(Error::ZeroParameter("hash count"));
        }
        if nbits < 2 {
            return Err(Error::EmptyCoefficientRange { bits: nbits });
        }
        let high = nbits as u64 - 1;

        rng.seed(master_seed);
        let a: Vec<u64> = (0..k).map(|_| rng.draw_uniform(0, high)).collect();
        let b: Vec<u64> = (0..k).map(|_| rng.draw_uniform(0, high)).collect();
        debug!(
            hashes = k,
            bits = nbits,
            modulus,
            ?a,
            ?b,
            "generated affine-modular hash family"
        );

        Self::new(a, b, modulus, nbits)
    }

    /// The `a` coefficients.
    pub fn a(&self) -> &[u64] {
        &self.a
    }

    /// The `b` coefficients.
    pub fn b(&self) -> &[u64] {
        &self.b
    }

    /// The prime modulus `P`.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    fn index(&self, i: usize, key: u64) -> usize {
        // a * x + b fits in u128 for any u64 inputs.
        let h = (self.a[i] as u128 * key as u128 + self.b[i] as u128) % self.modulus as u128;
        (h % self.nbits as u128) as usize
    }
}

/// A family of `k` hash functions with range `[0, n)`.
#[derive(Clone, Debug)]
pub enum HashFamily<G = StdGenerator> {
    /// Re-seeded generator draws.
    Seeded(SeededHashes<G>),
    /// Affine-modular universal hashing.
    AffineModular(AffineHashes),
}

impl<G: Generator + Clone> HashFamily<G> {
    /// Number of hash functions (`k`).
    pub fn hashes(&self) -> usize {
        match self {
            Self::Seeded(h) => h.seeds.len(),
            Self::AffineModular(h) => h.a.len(),
        }
    }

    /// Size of the output range (`n`).
    pub fn range(&self) -> usize {
        match self {
            Self::Seeded(h) => h.nbits,
            Self::AffineModular(h) => h.nbits,
        }
    }

    /// The `k` indices of `key`, each in `[0, n)`.
    pub fn indices(&self, key: u64) -> impl Iterator<Item = usize> + '_ {
        (0..self.hashes()).map(move |i| match self {
            Self::Seeded(h) => h.index(i, key),
            Self::AffineModular(h) => h.index(i, key),
        })
    }
}

impl<G> From<SeededHashes<G>> for HashFamily<G> {
    fn from(hashes: SeededHashes<G>) -> Self {
        Self::Seeded(hashes)
    }
}

impl<G> From<AffineHashes> for HashFamily<G> {
    fn from(hashes: AffineHashes) -> Self {
        Self::AffineModular(hashes)
    }
}
