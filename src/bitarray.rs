// Copyright (c) 2020 Helge Wrede, Alexander Schultheiß, Lukas Simon
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Fixed-size bit storage.
use std::fmt::Debug;

const WORD_BITS: usize = u64::BITS as usize;

/// A fixed-length array of bits, all initially zero.
///
/// The length is set at construction and never changes. Bits can be set but
/// not cleared.
#[derive(Clone, PartialEq, Eq)]
pub struct BitArray {
    words: Vec<u64>,
    nbits: usize,
}

impl BitArray {
    /// Create a new bit array holding `nbits` zero bits.
    pub fn new(nbits: usize) -> Self {
        Self {
            words: vec![0; nbits.div_ceil(WORD_BITS)],
            nbits,
        }
    }

    /// Get the length in bits of the array.
    pub fn len(&self) -> usize {
        self.nbits
    }

    /// Check whether this array has a length of zero.
    pub fn is_empty(&self) -> bool {
        self.nbits == 0
    }

    /// Set a single bit to `1`. Setting a bit twice has no further effect.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than the length.
    pub fn set(&mut self, index: usize) {
        let (word, mask) = self.locate(index);
        self.words[word] |= mask;
    }

    /// Check whether a bit is set.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than the length.
    #[doc(alias = "test")]
    pub fn is_set(&self, index: usize) -> bool {
        let (word, mask) = self.locate(index);
        self.words[word] & mask != 0
    }

    /// Count the number of `1` bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Count the number of `0` bits.
    pub fn count_zeros(&self) -> usize {
        self.len() - self.count_ones()
    }

    /// Iterate over the indices of the `1` bits, in increasing order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nbits).filter(move |i| self.is_set(*i))
    }

    fn locate(&self, index: usize) -> (usize, u64) {
        if index >= self.nbits {
            panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.nbits, index,
            )
        }
        (index / WORD_BITS, 1 << (index % WORD_BITS))
    }
}

impl Debug for BitArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits: String = (0..self.nbits)
            .map(|i| if self.is_set(i) { '1' } else { '0' })
            .collect();
        write!(f, "BitArray({})", bits)
    }
}
