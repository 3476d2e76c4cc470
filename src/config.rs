// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Filter configuration.
//!
//! A [`Config`] is built once and never mutated by the filter. It derives serde
//! traits so it can be loaded from any format, but this crate never reads files.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::hash::{AffineHashes, HashFamily, SeededHashes, DEFAULT_SEED_DIVISOR};
use crate::prime;

/// Which hash family drives the filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum HashVariant {
    /// Re-seeded generator draws. Type code `1`.
    Seeded,
    /// `((a * x + b) mod P) mod n`. Type code `2`.
    AffineModular,
}

impl HashVariant {
    /// The variant's tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Seeded => "seeded",
            Self::AffineModular => "affine-modular",
        }
    }
}

impl fmt::Display for HashVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "seeded" | "1" => Ok(Self::Seeded),
            "affine-modular" | "2" => Ok(Self::AffineModular),
            other => Err(Error::UnknownVariant(other.to_owned())),
        }
    }
}

impl TryFrom<String> for HashVariant {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl TryFrom<u8> for HashVariant {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Self::Seeded),
            2 => Ok(Self::AffineModular),
            other => Err(Error::UnknownVariant(other.to_string())),
        }
    }
}

/// Where the hash parameters come from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Parameters {
    /// Draw fresh parameters from a generator seeded with `master_seed`.
    Generate {
        /// Seed for parameter generation.
        master_seed: u64,
    },
    /// One seed per hash function, for [`HashVariant::Seeded`].
    Seeds(Vec<u64>),
    /// One `(a, b)` pair per hash function, for [`HashVariant::AffineModular`].
    Coefficients {
        /// Multipliers.
        a: Vec<u64>,
        /// Offsets.
        b: Vec<u64>,
    },
}

fn mismatch(variant: HashVariant) -> Error {
    let expected = match variant {
        HashVariant::Seeded => "seeds",
        HashVariant::AffineModular => "a and b coefficients",
    };
    Error::MissingParameters {
        variant: variant.as_str(),
        expected,
    }
}

fn default_seed_divisor() -> u64 {
    DEFAULT_SEED_DIVISOR
}

/// Filter configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Upper bound on the key space (`N`).
    pub universe_size: u64,
    /// Number of keys the evaluation inserts (`m`).
    pub elements_to_insert: usize,
    /// Number of bits in the filter (`n`).
    pub filter_bits: usize,
    /// Number of hash functions (`k`).
    pub hash_count: usize,
    /// Hash family.
    pub variant: HashVariant,
    /// Hash family parameters.
    pub parameters: Parameters,
    /// Generated seeds are drawn from `[0, filter_bits / seed_divisor)`.
    #[serde(default = "default_seed_divisor")]
    pub seed_divisor: u64,
}

impl Config {
    /// Create a configuration with the default seed divisor.
    pub fn new(
        universe_size: u64,
        elements_to_insert: usize,
        filter_bits: usize,
        hash_count: usize,
        variant: HashVariant,
        parameters: Parameters,
    ) -> Self {
        Self {
            universe_size,
            elements_to_insert,
            filter_bits,
            hash_count,
            variant,
            parameters,
            seed_divisor: DEFAULT_SEED_DIVISOR,
        }
    }

    /// Size the filter at `c` bits per inserted element.
    ///
    /// # Panics
    ///
    /// Panics if `c * elements_to_insert` overflows `usize`.
    pub fn with_bits_per_element(mut self, c: usize) -> Self {
        self.filter_bits = match c.checked_mul(self.elements_to_insert) {
            Some(bits) => bits,
            None => panic!(
                "filter size overflow: {} bits per element for {} elements",
                c, self.elements_to_insert
            ),
        };
        self
    }

    /// Set the number of hash functions.
    pub fn with_hash_count(mut self, k: usize) -> Self {
        self.hash_count = k;
        self
    }

    /// Set the divisor of the generated seed range.
    pub fn with_seed_divisor(mut self, divisor: u64) -> Self {
        self.seed_divisor = divisor;
        self
    }

    /// The affine modulus `P`: the smallest prime no smaller than `N`.
    pub fn modulus(&self) -> Result<u64> {
        prime::next_prime(self.universe_size).ok_or(Error::NoPrime(self.universe_size))
    }

    /// Check sizes and that the parameters fit the variant.
    pub fn validate(&self) -> Result<()> {
        if self.hash_count == 0 {
            return Err(Error::ZeroParameter("hash count"));
        }
        if self.filter_bits == 0 {
            return Err(Error::ZeroParameter("filter bits"));
        }

        match (self.variant, &self.parameters) {
            (_, Parameters::Generate { .. }) => Ok(()),
            (HashVariant::Seeded, Parameters::Seeds(seeds)) => {
                self.check_count("seeds", seeds.len())
            }
            (HashVariant::AffineModular, Parameters::Coefficients { a, b }) => {
                self.check_count("a coefficients", a.len())?;
                self.check_count("b coefficients", b.len())
            }
            (variant, _) => Err(mismatch(variant)),
        }
    }

    /// Build the configured hash family around `rng`.
    pub fn hash_family<G: Generator + Clone>(&self, mut rng: G) -> Result<HashFamily<G>> {
        self.validate()?;

        let family = match (self.variant, &self.parameters) {
            (HashVariant::Seeded, Parameters::Generate { master_seed }) => SeededHashes::generate(
                self.hash_count,
                self.filter_bits,
                self.seed_divisor,
                *master_seed,
                rng,
            )?
            .into(),
            (HashVariant::Seeded, Parameters::Seeds(seeds)) => {
                SeededHashes::new(seeds.clone(), self.filter_bits, rng)?.into()
            }
            (HashVariant::AffineModular, Parameters::Generate { master_seed }) => {
                AffineHashes::generate(
                    self.hash_count,
                    self.filter_bits,
                    self.modulus()?,
                    *master_seed,
                    &mut rng,
                )?
                .into()
            }
            (HashVariant::AffineModular, Parameters::Coefficients { a, b }) => {
                AffineHashes::new(a.clone(), b.clone(), self.modulus()?, self.filter_bits)?.into()
            }
            (variant, _) => return Err(mismatch(variant)),
        };
        Ok(family)
    }

    fn check_count(&self, what: &'static str, found: usize) -> Result<()> {
        if found != self.hash_count {
            return Err(Error::ParameterCount {
                what,
                expected: self.hash_count,
                found,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::StdGenerator;

    fn affine(parameters: Parameters) -> Config {
        Config::new(10, 2, 7, 1, HashVariant::AffineModular, parameters)
    }

    #[test]
    fn variant_tags() {
        assert_eq!("seeded".parse::<HashVariant>(), Ok(HashVariant::Seeded));
        assert_eq!("1".parse::<HashVariant>(), Ok(HashVariant::Seeded));
        assert_eq!("affine-modular".parse::<HashVariant>(), Ok(HashVariant::AffineModular));
        assert_eq!(HashVariant::try_from(2u8), Ok(HashVariant::AffineModular));
        assert_eq!(
            "3".parse::<HashVariant>(),
            Err(Error::UnknownVariant(String::from("3")))
        );
        assert_eq!(
            HashVariant::try_from(0u8),
            Err(Error::UnknownVariant(String::from("0")))
        );
        assert_eq!(HashVariant::AffineModular.to_string(), "affine-modular");
    }

    #[test]
    fn modulus_is_next_prime() {
        assert_eq!(affine(Parameters::Generate { master_seed: 0 }).modulus(), Ok(11));

        let mut config = affine(Parameters::Generate { master_seed: 0 });
        config.universe_size = 11;
        assert_eq!(config.modulus(), Ok(11));
    }

    #[test]
    fn universe_beyond_the_last_prime() {
        let mut config = affine(Parameters::Generate { master_seed: 1 });
        config.universe_size = u64::MAX;
        config.filter_bits = 1_000;

        assert_eq!(config.modulus(), Err(Error::NoPrime(u64::MAX)));
        assert_eq!(
            config.hash_family(StdGenerator::default()).unwrap_err(),
            Error::NoPrime(u64::MAX)
        );

        // The seeded family never needs a modulus.
        config.variant = HashVariant::Seeded;
        config.seed_divisor = 100;
        assert!(config.hash_family(StdGenerator::default()).is_ok());
    }

    #[test]
    fn bits_per_element() {
        let config = Config::new(
            1_000_000,
            1_000,
            1,
            3,
            HashVariant::Seeded,
            Parameters::Generate { master_seed: 1 },
        )
        .with_bits_per_element(15)
        .with_hash_count(5);

        assert_eq!(config.filter_bits, 15_000);
        assert_eq!(config.hash_count, 5);
    }

    #[test]
    #[should_panic(expected = "filter size overflow")]
    fn bits_per_element_overflow() {
        let mut config = affine(Parameters::Generate { master_seed: 0 });
        config.elements_to_insert = usize::MAX / 2;

        config.with_bits_per_element(3);
    }

    #[test]
    fn validate_rejects_zero_sizes() {
        let config = affine(Parameters::Generate { master_seed: 0 });
        assert_eq!(
            config.clone().with_hash_count(0).validate(),
            Err(Error::ZeroParameter("hash count"))
        );

        let mut config = config;
        config.filter_bits = 0;
        assert_eq!(config.validate(), Err(Error::ZeroParameter("filter bits")));
    }

    #[test]
    fn validate_rejects_mismatched_parameters() {
        assert_eq!(
            affine(Parameters::Seeds(vec![1])).validate(),
            Err(Error::MissingParameters {
                variant: "affine-modular",
                expected: "a and b coefficients"
            })
        );

        let mut config = affine(Parameters::Coefficients {
            a: vec![1],
            b: vec![2],
        });
        config.variant = HashVariant::Seeded;
        assert_eq!(
            config.validate(),
            Err(Error::MissingParameters {
                variant: "seeded",
                expected: "seeds"
            })
        );

        assert_eq!(
            affine(Parameters::Coefficients {
                a: vec![1],
                b: vec![2, 3],
            })
            .validate(),
            Err(Error::ParameterCount {
                what: "b coefficients",
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn builds_supplied_affine_family() {
        let family = affine(Parameters::Coefficients {
            a: vec![3],
            b: vec![5],
        })
        .hash_family(StdGenerator::default())
        .unwrap();

        assert_eq!(family.indices(4).collect::<Vec<_>>(), vec![6]);
    }

    #[test]
    fn generated_seeds_need_a_wide_filter() {
        let config = Config::new(
            100,
            10,
            1_000,
            2,
            HashVariant::Seeded,
            Parameters::Generate { master_seed: 9 },
        );
        assert_eq!(
            config.hash_family(StdGenerator::default()).unwrap_err(),
            Error::EmptySeedRange {
                bits: 1_000,
                divisor: 10_000
            }
        );

        let family = config
            .with_seed_divisor(100)
            .hash_family(StdGenerator::default())
            .unwrap();
        match family {
            HashFamily::Seeded(hashes) => assert!(hashes.seeds().iter().all(|s| *s < 10)),
            HashFamily::AffineModular(_) => panic!("expected a seeded family"),
        }
    }

    #[test]
    fn deserialize_from_json() {
        let config: Config = serde_json::from_str(
            r#"{
                "universe_size": 1000000,
                "elements_to_insert": 1000,
                "filter_bits": 20000,
                "hash_count": 2,
                "variant": "seeded",
                "parameters": { "seeds": [11, 42] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.variant, HashVariant::Seeded);
        assert_eq!(config.parameters, Parameters::Seeds(vec![11, 42]));
        assert_eq!(config.seed_divisor, DEFAULT_SEED_DIVISOR);
        assert!(config.validate().is_ok());

        let err = serde_json::from_str::<Config>(
            r#"{
                "universe_size": 1, "elements_to_insert": 1, "filter_bits": 1, "hash_count": 1,
                "variant": "cuckoo", "parameters": { "generate": { "master_seed": 1 } }
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown hash variant"));
    }
}
