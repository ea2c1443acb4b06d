use crate::algorithm::constraints::WordId;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over the word ids of one length bucket
///
/// Tracks which words of a given length are already used on the board.
/// Provides O(1) membership testing and cheap snapshots for backtracking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordBitset {
    bits: BitVec,
}

impl WordBitset {
    /// Create a bitset with no words present
    pub fn new(word_count: usize) -> Self {
        Self {
            bits: bitvec![0; word_count],
        }
    }

    /// Insert a word id, ignoring ids outside the bucket
    pub fn insert(&mut self, word: WordId) {
        let index = word as usize;
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Copy of this set with one more word present
    #[must_use]
    pub fn with(&self, word: WordId) -> Self {
        let mut result = self.clone();
        result.insert(word);
        result
    }

    /// Test word membership
    pub fn contains(&self, word: WordId) -> bool {
        self.bits.get(word as usize).as_deref() == Some(&true)
    }

    /// Test if no words are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count words in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Size of the bucket this set ranges over
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Extract all word ids as a vector, ascending
    pub fn to_vec(&self) -> Vec<WordId> {
        self.bits.iter_ones().map(|index| index as WordId).collect()
    }
}

impl fmt::Display for WordBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WordBitset({} words: {:?})", self.count(), self.to_vec())
    }
}
