// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Deterministic pseudo-random generators.
//!
//! Hash families never touch a global generator. A generator value is handed
//! to the family at construction, seeded with the master seed to draw the
//! family's parameters, and then kept as a prototype: the seeded family clones
//! it and re-seeds the clone for every hash it computes.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A re-seedable source of uniform integers.
pub trait Generator {
    /// Reset the generator state from `value`. Two generators seeded with the
    /// same value produce the same draws.
    fn seed(&mut self, value: u64);

    /// Draw an integer uniformly from `[low, high)`.
    ///
    /// # Panics
    ///
    /// Panics if `low >= high`.
    fn draw_uniform(&mut self, low: u64, high: u64) -> u64;
}

/// The default generator, backed by [`StdRng`].
#[derive(Clone, Debug)]
pub struct StdGenerator {
    rng: StdRng,
}

impl StdGenerator {
    /// Create a generator seeded with `value`.
    pub fn new(value: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(value),
        }
    }
}

impl Default for StdGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Generator for StdGenerator {
    fn seed(&mut self, value: u64) {
        self.rng = StdRng::seed_from_u64(value);
    }

    fn draw_uniform(&mut self, low: u64, high: u64) -> u64 {
        self.rng.gen_range(low..high)
    }
}

/// A generator that replays a fixed sequence of values.
///
/// Draw `i` after a call to `seed(s)` returns `low + (values[i] + s) % (high - low)`,
/// cycling through `values`. Useful to pin down hash family construction in tests.
#[derive(Clone, Debug)]
pub struct Sequence {
    values: Vec<u64>,
    offset: u64,
    position: usize,
}

impl Sequence {
    /// Create a sequence generator.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: &[u64]) -> Self {
        assert!(!values.is_empty(), "sequence must not be empty");

        Self {
            values: values.to_vec(),
            offset: 0,
            position: 0,
        }
    }
}

impl Generator for Sequence {
    fn seed(&mut self, value: u64) {
        self.offset = value;
        self.position = 0;
    }

    fn draw_uniform(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "empty range [{}, {})", low, high);

        let value = self.values[self.position % self.values.len()];
        self.position += 1;

        low + value.wrapping_add(self.offset) % (high - low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_generator_is_reproducible() {
        let mut a = StdGenerator::new(7);
        let mut b = StdGenerator::new(99);
        b.seed(7);

        for _ in 0..32 {
            assert_eq!(a.draw_uniform(0, 1000), b.draw_uniform(0, 1000));
        }
    }

    #[test]
    fn std_generator_stays_in_range() {
        let mut rng = StdGenerator::default();

        for _ in 0..1000 {
            let value = rng.draw_uniform(10, 20);
            assert!((10..20).contains(&value));
        }
        assert_eq!(rng.draw_uniform(5, 6), 5);
    }

    #[test]
    fn reseeding_restarts_the_stream() {
        let mut rng = StdGenerator::new(1);
        let first: Vec<u64> = (0..8).map(|_| rng.draw_uniform(0, u64::MAX)).collect();

        rng.seed(1);
        let second: Vec<u64> = (0..8).map(|_| rng.draw_uniform(0, u64::MAX)).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn sequence_replays_values() {
        let mut rng = Sequence::new(&[3, 1, 4]);

        assert_eq!(rng.draw_uniform(0, 10), 3);
        assert_eq!(rng.draw_uniform(0, 10), 1);
        assert_eq!(rng.draw_uniform(0, 10), 4);
        assert_eq!(rng.draw_uniform(0, 10), 3);
        assert_eq!(rng.draw_uniform(0, 2), 1);
        // values[5 % 3] = 4
        assert_eq!(rng.draw_uniform(100, 102), 100);
    }

    #[test]
    fn sequence_offsets_by_seed() {
        let mut rng = Sequence::new(&[3, 1, 4]);
        rng.draw_uniform(0, 10);

        rng.seed(5);
        assert_eq!(rng.draw_uniform(0, 10), 8);
        assert_eq!(rng.draw_uniform(0, 10), 6);
        assert_eq!(rng.draw_uniform(0, 10), 9);
    }

    #[test]
    #[should_panic(expected = "empty range")]
    fn sequence_rejects_empty_range() {
        Sequence::new(&[1]).draw_uniform(0, 0);
    }
}
