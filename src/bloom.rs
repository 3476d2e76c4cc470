// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! A Bloom filter over integer keys, driven by a pluggable [`HashFamily`].

use std::f64;

use tracing::{debug, trace};

use crate::bitarray::BitArray;
use crate::config::Config;
use crate::error::Result;
use crate::generator::{Generator, StdGenerator};
use crate::hash::HashFamily;

/// `ln` squared.
const LN_SQR: f64 = f64::consts::LN_2 * f64::consts::LN_2;

/// Lifecycle of a filter. Keys can't be removed, so a populated filter never
/// goes back to empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Nothing inserted yet.
    Empty,
    /// At least one key inserted.
    Populated,
}

/// A Bloom filter over `u64` keys.
#[derive(Clone, Debug)]
pub struct BloomFilter<G = StdGenerator> {
    bits: BitArray,
    hashes: HashFamily<G>,
    state: State,
}

impl BloomFilter<StdGenerator> {
    /// Build the filter described by `config`, using the default generator.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_generator(config, StdGenerator::default())
    }
}

impl<G: Generator + Clone> BloomFilter<G> {
    /// Return an empty filter whose size matches the range of `hashes`.
    pub fn new(hashes: HashFamily<G>) -> Self {
        let nbits = hashes.range();
        debug!(bits = nbits, hashes = hashes.hashes(), "allocating bloom filter");

        Self {
            bits: BitArray::new(nbits),
            hashes,
            state: State::Empty,
        }
    }

    /// Build the filter described by `config`, with `rng` driving the hash family.
    pub fn with_generator(config: &Config, rng: G) -> Result<Self> {
        Ok(Self::new(config.hash_family(rng)?))
    }

    /// Insert a key. Inserting the same key again leaves the filter unchanged.
    pub fn insert(&mut self, key: u64) {
        trace!(key, "insert");

        for index in self.hashes.indices(key) {
            self.bits.set(index);
        }
        self.state = State::Populated;
    }

    /// Return whether `key` is possibly in the filter. Inserted keys always
    /// return `true`; other keys return `true` only if every one of their bits
    /// was set by other insertions.
    #[doc(alias = "query")]
    pub fn contains(&self, key: u64) -> bool {
        self.hashes.indices(key).all(|index| self.bits.is_set(index))
    }

    /// The `k` bit indices of `key`.
    pub fn indices(&self, key: u64) -> Vec<usize> {
        self.hashes.indices(key).collect()
    }

    /// Return the number of bits in this filter.
    pub fn bits(&self) -> usize {
        self.bits.len()
    }

    /// Number of hashes used (`k` parameter).
    pub fn hashes(&self) -> usize {
        self.hashes.hashes()
    }

    /// The hash family.
    pub fn hash_family(&self) -> &HashFamily<G> {
        &self.hashes
    }

    /// The underlying bit storage.
    pub fn bit_array(&self) -> &BitArray {
        &self.bits
    }

    /// Whether anything was inserted yet.
    pub fn state(&self) -> State {
        self.state
    }

    /// Check whether nothing was inserted yet.
    pub fn is_empty(&self) -> bool {
        self.state == State::Empty
    }

    /// Fraction of bits set.
    pub fn fill_ratio(&self) -> f64 {
        self.bits.count_ones() as f64 / self.bits.len() as f64
    }

    /// Count the approximate number of distinct keys in the filter.
    ///
    /// # Notes
    ///
    /// A filter with every bit set carries no count information; this returns
    /// `usize::MAX` for it.
    pub fn count(&self) -> usize {
        let nbits = self.bits.len() as f64;
        let nhashes = self.hashes() as f64;
        let count = -(nbits / nhashes) * (1. - self.fill_ratio()).ln();

        count.round() as usize
    }
}

/// Return the optimal bit array size for a Bloom filter given an approximate
/// size and a desired false positive rate.
pub fn optimal_bits(capacity: usize, fp_rate: f64) -> usize {
    (-((fp_rate.ln() * (capacity as f64)) / LN_SQR)).ceil() as usize
}

/// Return the optimal number of hash functions for a Bloom filter given a
/// bit array size and an approximate set size.
///
/// Also called `k`.
pub fn optimal_hashes(nbits: usize, capacity: usize) -> usize {
    ((nbits as f64 / capacity as f64) * f64::consts::LN_2).ceil() as usize
}

/// Expected false positive rate after inserting `items` distinct keys into a
/// filter of `nbits` bits with `nhashes` hash functions: `(1 - e^(-k m / n))^k`.
pub fn expected_false_positive_rate(nbits: usize, items: usize, nhashes: usize) -> f64 {
    let k = nhashes as f64;
    let exponent = -k * items as f64 / nbits as f64;

    (1. - exponent.exp()).powf(k)
}
