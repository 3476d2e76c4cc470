// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Errors raised while configuring a filter.
use thiserror::Error;

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A configuration error. Filters are never built from an invalid
/// configuration; nothing here is transient or worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The hash variant tag is not recognized.
    #[error("unknown hash variant: {0:?}")]
    UnknownVariant(String),
    /// The parameters don't match the hash variant.
    #[error("{variant} hashing requires {expected}")]
    MissingParameters {
        /// The configured variant.
        variant: &'static str,
        /// What the variant needs instead.
        expected: &'static str,
    },
    /// A size parameter was zero.
    #[error("{0} must be at least 1")]
    ZeroParameter(&'static str),
    /// A supplied parameter list has the wrong length.
    #[error("expected {expected} {what}, found {found}")]
    ParameterCount {
        /// Which list.
        what: &'static str,
        /// Number of hash functions.
        expected: usize,
        /// Length of the supplied list.
        found: usize,
    },
    /// The seed range `[0, bits / divisor)` is empty, so seeds cannot be drawn.
    #[error("seed range [0, {bits}/{divisor}) is empty; supply seeds or use a smaller divisor")]
    EmptySeedRange {
        /// Filter size.
        bits: usize,
        /// Seed range divisor.
        divisor: u64,
    },
    /// The coefficient range `[0, bits - 1)` is empty.
    #[error("coefficient range [0, {bits} - 1) is empty")]
    EmptyCoefficientRange {
        /// Filter size.
        bits: usize,
    },
    /// The affine modulus is not prime.
    #[error("modulus {0} is not prime")]
    NotPrime(u64),
    /// No 64-bit prime is at least as large as the universe size.
    #[error("no 64-bit prime is greater than or equal to the universe size {0}")]
    NoPrime(u64),
}
