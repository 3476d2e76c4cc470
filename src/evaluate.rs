// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! False positive accounting.
//!
//! The filter itself never remembers which keys it was given. [`TrackedFilter`]
//! wraps a filter and keeps that record on the side, so queries can be checked
//! against ground truth.
use std::collections::HashSet;

use tracing::info;

use crate::bloom::{self, BloomFilter};
use crate::config::Config;
use crate::error::Result;
use crate::generator::{Generator, StdGenerator};

/// How a query compares to ground truth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Inserted, reported present.
    TruePositive,
    /// Not inserted, reported absent.
    TrueNegative,
    /// Not inserted, reported present.
    FalsePositive,
    /// Inserted, reported absent. Never happens with a correct filter.
    FalseNegative,
}

/// A filter paired with the set of keys inserted into it.
#[derive(Clone, Debug)]
pub struct TrackedFilter<G = StdGenerator> {
    filter: BloomFilter<G>,
    members: HashSet<u64>,
}

impl<G: Generator + Clone> TrackedFilter<G> {
    /// Start tracking `filter`. Keys inserted before this call are not recorded.
    pub fn new(filter: BloomFilter<G>) -> Self {
        Self {
            filter,
            members: HashSet::new(),
        }
    }

    /// Insert a key into the filter and the record.
    pub fn insert(&mut self, key: u64) {
        self.filter.insert(key);
        self.members.insert(key);
    }

    /// Query the filter.
    pub fn contains(&self, key: u64) -> bool {
        self.filter.contains(key)
    }

    /// Whether `key` was actually inserted.
    pub fn is_member(&self, key: u64) -> bool {
        self.members.contains(&key)
    }

    /// Query the filter and classify the answer.
    pub fn check(&self, key: u64) -> Outcome {
        match (self.is_member(key), self.contains(key)) {
            (true, true) => Outcome::TruePositive,
            (true, false) => Outcome::FalseNegative,
            (false, true) => Outcome::FalsePositive,
            (false, false) => Outcome::TrueNegative,
        }
    }

    /// Number of distinct keys inserted.
    pub fn members(&self) -> usize {
        self.members.len()
    }

    /// The wrapped filter.
    pub fn filter(&self) -> &BloomFilter<G> {
        &self.filter
    }

    /// Stop tracking and return the filter.
    pub fn into_inner(self) -> BloomFilter<G> {
        self.filter
    }
}

/// Summary of an insert-then-query run.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Query result for every key of the data set, in order.
    pub results: Vec<bool>,
    /// Distinct keys inserted.
    pub inserted: usize,
    /// Queries whose key was never inserted.
    pub negatives: usize,
    /// Queries reporting a key that was never inserted.
    pub false_positives: usize,
    /// Queries missing an inserted key.
    pub false_negatives: usize,
    /// `(1 - e^(-k m / n))^k` for this filter and number of insertions.
    pub expected_false_positive_rate: f64,
}

impl Evaluation {
    /// Observed false positive rate over the queries of non-inserted keys.
    pub fn false_positive_rate(&self) -> f64 {
        if self.negatives == 0 {
            return 0.;
        }
        self.false_positives as f64 / self.negatives as f64
    }
}

/// Insert the first `m` keys of `data` into `filter`, then query every key of
/// `data` and tally the answers against the keys actually inserted.
pub fn evaluate<G: Generator + Clone>(filter: BloomFilter<G>, data: &[u64], m: usize) -> Evaluation {
    let mut tracked = TrackedFilter::new(filter);
    for key in data.iter().take(m) {
        tracked.insert(*key);
    }

    let mut evaluation = Evaluation {
        results: Vec::with_capacity(data.len()),
        inserted: tracked.members(),
        negatives: 0,
        false_positives: 0,
        false_negatives: 0,
        expected_false_positive_rate: bloom::expected_false_positive_rate(
            tracked.filter().bits(),
            tracked.members(),
            tracked.filter().hashes(),
        ),
    };

    for key in data {
        let outcome = tracked.check(*key);
        match outcome {
            Outcome::FalsePositive => {
                evaluation.negatives += 1;
                evaluation.false_positives += 1;
            }
            Outcome::TrueNegative => evaluation.negatives += 1,
            Outcome::FalseNegative => evaluation.false_negatives += 1,
            Outcome::TruePositive => {}
        }
        evaluation.results.push(matches!(
            outcome,
            Outcome::TruePositive | Outcome::FalsePositive
        ));
    }

    info!(
        bits = tracked.filter().bits(),
        hashes = tracked.filter().hashes(),
        inserted = evaluation.inserted,
        queried = data.len(),
        false_positives = evaluation.false_positives,
        false_negatives = evaluation.false_negatives,
        observed = evaluation.false_positive_rate(),
        expected = evaluation.expected_false_positive_rate,
        "evaluation complete"
    );
    evaluation
}

/// Evaluate `config` once per hash count, inserting the first
/// `config.elements_to_insert` keys of `data` each time.
pub fn sweep<I>(config: &Config, data: &[u64], hash_counts: I) -> Result<Vec<(usize, Evaluation)>>
where
    I: IntoIterator<Item = usize>,
{
    hash_counts
        .into_iter()
        .map(|k| {
            let config = config.clone().with_hash_count(k);
            let filter = BloomFilter::from_config(&config)?;

            Ok((k, evaluate(filter, data, config.elements_to_insert)))
        })
        .collect()
}
