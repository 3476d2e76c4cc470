//! A Bloom filter over integer keys, with a choice of two hash families.
//!
//! # Bloom Filters
//!
//! A Bloom filter is a space-efficient probabilistic data structure that is
//! used to test whether an element is a member of a set. It allows for queries
//! to return: "possibly in set" or "definitely not in set". Elements can be
//! added to the set, but not removed; the more elements that are added to the
//! set, the larger the probability of false positives.
//!
//! Each key is mapped to `k` indices of an `n`-bit array. Insertion sets those
//! bits; a query reports membership only if all of them are set.
//!
//! # Hash Families
//!
//! *Seeded* hashing computes the i-th index of `x` by re-seeding a
//! pseudo-random generator with `seed[i] + x` and drawing once from `[0, n)`.
//! The generator is a value owned by the hash family, never a process-wide
//! singleton, so filters can't disturb each other's draws.
//!
//! *Affine-modular* hashing is the classical universal construction:
//!
//! h<sub>i</sub>(x) = ((a<sub>i</sub>x + b<sub>i</sub>) mod P) mod n, where P is
//! the smallest prime no smaller than the key universe `N`.
//!
//! # Example
//!
//! ```
//! use modbloom::{BloomFilter, Config, HashVariant, Parameters};
//!
//! let config = Config::new(
//!     1_000_000,
//!     1_000,
//!     15_000,
//!     7,
//!     HashVariant::AffineModular,
//!     Parameters::Generate { master_seed: 42 },
//! );
//! let mut filter = BloomFilter::from_config(&config).unwrap();
//!
//! filter.insert(10);
//! filter.insert(20);
//!
//! assert!(filter.contains(10));
//! assert!(filter.contains(20));
//! filter.contains(30); // most likely false
//! ```
#![warn(missing_docs)]
#![allow(clippy::bool_assert_comparison)]

pub mod bitarray;
pub mod bloom;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod generator;
pub mod hash;
pub mod prime;

pub use bloom::BloomFilter;
pub use config::{Config, HashVariant, Parameters};
pub use error::{Error, Result};
pub use generator::{Generator, StdGenerator};
pub use hash::HashFamily;
