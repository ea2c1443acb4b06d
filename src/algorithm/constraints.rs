//! Constraint keys and the per-length constraint index
//!
//! A constraint key pairs a subset of letter positions with the letters seen
//! at those positions. The index maps every key derivable from every word of
//! one length to the words that satisfy it, so a partially filled slot can
//! look up its candidates in one hash probe.

use crate::io::configuration::MAX_INDEXED_WORD_LENGTH;
use crate::io::error::{CrosswordError, Result, invalid_parameter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

/// Dense identifier of a word within one constraint index
pub type WordId = u32;

/// A set of letter positions and the letters required there
///
/// Positions are stored as a bitmask, so the ordered position tuple is
/// recovered by walking the set bits from least significant upward.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConstraintKey {
    mask: u32,
    letters: String,
}

impl ConstraintKey {
    /// Build a key from `(position, letter)` pairs
    ///
    /// Returns `None` when no pairs are given or a position does not fit the mask.
    pub fn from_pairs<I>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (usize, char)>,
    {
        let mut pairs: Vec<(usize, char)> = pairs.into_iter().collect();
        if pairs.is_empty() || pairs.iter().any(|&(pos, _)| pos >= MAX_INDEXED_WORD_LENGTH) {
            return None;
        }
        pairs.sort_unstable_by_key(|&(pos, _)| pos);
        pairs.dedup_by_key(|&mut (pos, _)| pos);

        let mask = pairs.iter().fold(0u32, |mask, &(pos, _)| mask | (1 << pos));
        let letters = pairs.iter().map(|&(_, letter)| letter).collect();
        Some(Self { mask, letters })
    }

    /// Build the key for a word restricted to the positions in `mask`
    pub fn for_word(chars: &[char], mask: u32) -> Self {
        let letters = chars
            .iter()
            .enumerate()
            .filter(|&(pos, _)| mask & (1 << pos) != 0)
            .map(|(_, &letter)| letter)
            .collect();
        Self { mask, letters }
    }

    /// Build a key from the letters already placed along a slot
    ///
    /// Cells without a letter contribute nothing. Returns `None` when the
    /// slot is still blank.
    pub fn from_placed<I>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<char>>,
    {
        Self::from_pairs(
            cells
                .into_iter()
                .enumerate()
                .filter_map(|(pos, letter)| letter.map(|letter| (pos, letter))),
        )
    }

    /// Constrained positions, ascending
    pub fn positions(&self) -> Vec<usize> {
        (0..MAX_INDEXED_WORD_LENGTH)
            .filter(|&pos| self.mask & (1 << pos) != 0)
            .collect()
    }

    /// Letters at the constrained positions, in position order
    pub fn letters(&self) -> &str {
        &self.letters
    }

    /// Position bitmask
    pub const fn mask(&self) -> u32 {
        self.mask
    }

    /// Test whether a word satisfies this key
    pub fn is_satisfied_by(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        self.positions()
            .into_iter()
            .zip(self.letters.chars())
            .all(|(pos, letter)| chars.get(pos) == Some(&letter))
    }
}

/// Lookup from constraint key to the words of one length satisfying it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintIndex {
    word_length: usize,
    words: Vec<String>,
    entries: HashMap<ConstraintKey, Vec<WordId>>,
    indexed: bool,
}

impl ConstraintIndex {
    /// Reassemble an index from its serialized parts
    ///
    /// # Errors
    ///
    /// Returns an error if any word has the wrong length or an entry names a
    /// word id outside the word list
    pub fn from_parts(
        word_length: usize,
        words: Vec<String>,
        entries: Vec<(ConstraintKey, Vec<WordId>)>,
    ) -> Result<Self> {
        if let Some(word) = words.iter().find(|w| w.chars().count() != word_length) {
            return Err(CrosswordError::MixedWordLengths {
                expected: word_length,
                found: word.chars().count(),
                word: word.clone(),
            });
        }
        let word_count = words.len();
        if entries
            .iter()
            .flat_map(|(_, ids)| ids)
            .any(|&id| id as usize >= word_count)
        {
            return Err(CrosswordError::InvalidSourceData {
                reason: format!("index entry refers past {word_count} words"),
            });
        }

        Ok(Self {
            word_length,
            words,
            entries: entries.into_iter().collect(),
            indexed: true,
        })
    }

    /// Wrap a word bucket without precomputing any keys
    ///
    /// Lookups on an unindexed bucket scan every word, which is how lengths
    /// too long to index are still searchable.
    ///
    /// # Errors
    ///
    /// Returns an error if the words are empty or do not share one length
    pub fn unindexed<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (word_length, words) = prepare_words(words)?;
        Ok(Self {
            word_length,
            words,
            entries: HashMap::new(),
            indexed: false,
        })
    }

    /// Candidate word ids for a slot, ascending
    ///
    /// With no key (a blank slot) every word is a candidate.
    pub fn candidates(&self, key: Option<&ConstraintKey>) -> Vec<WordId> {
        match key {
            None => self.all_ids(),
            Some(key) if self.indexed => self.matches(key).to_vec(),
            Some(key) => self
                .words
                .iter()
                .enumerate()
                .filter(|(_, word)| key.is_satisfied_by(word))
                .map(|(id, _)| id as WordId)
                .collect(),
        }
    }

    /// Whether constraint keys were precomputed
    pub const fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Word ids satisfying the key, ascending; empty when nothing matches
    pub fn matches(&self, key: &ConstraintKey) -> &[WordId] {
        self.entries.get(key).map_or(&[][..], Vec::as_slice)
    }

    /// Look up a word by id
    pub fn word(&self, id: WordId) -> Option<&str> {
        self.words.get(id as usize).map(String::as_str)
    }

    /// Look up the id of a word
    pub fn word_id(&self, word: &str) -> Option<WordId> {
        self.words
            .binary_search_by(|probe| probe.as_str().cmp(word))
            .ok()
            .map(|id| id as WordId)
    }

    /// All words in id order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Every word id, used when a slot has no placed letters yet
    pub fn all_ids(&self) -> Vec<WordId> {
        (0..self.words.len()).map(|id| id as WordId).collect()
    }

    /// Number of words in the index
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    /// Test if the index holds no words
    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Length shared by every indexed word
    pub const fn word_length(&self) -> usize {
        self.word_length
    }

    /// Number of distinct constraint keys
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Entries sorted by key, for stable serialization
    pub fn sorted_entries(&self) -> Vec<(ConstraintKey, Vec<WordId>)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(key, ids)| (key.clone(), ids.clone()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

/// Build the constraint index for a set of same-length words
///
/// Every non-empty subset of positions of every word is enumerated, which is
/// `2^n - 1` keys per word of length `n`.
///
/// # Errors
///
/// Returns an error if:
/// - No words are given, or a word is empty
/// - The words do not all share one length
/// - The shared length exceeds [`MAX_INDEXED_WORD_LENGTH`]
pub fn build_constraint_index<I, S>(words: I) -> Result<ConstraintIndex>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (word_length, words) = prepare_words(words)?;
    if word_length > MAX_INDEXED_WORD_LENGTH {
        return Err(invalid_parameter(
            "word_length",
            &word_length,
            &format!("indexing is limited to {MAX_INDEXED_WORD_LENGTH} letters"),
        ));
    }

    let start = Instant::now();
    let full_mask: u32 = (1u32 << word_length) - 1;
    let mut entries: HashMap<ConstraintKey, Vec<WordId>> = HashMap::new();

    for (id, word) in words.iter().enumerate() {
        let chars: Vec<char> = word.chars().collect();
        for mask in 1..=full_mask {
            // Ids are visited in ascending order, so every list stays sorted
            entries
                .entry(ConstraintKey::for_word(&chars, mask))
                .or_default()
                .push(id as WordId);
        }
    }

    log::info!(
        "Indexed {} words of length {word_length} into {} keys in {:.2?}",
        words.len(),
        entries.len(),
        start.elapsed()
    );

    Ok(ConstraintIndex {
        word_length,
        words,
        entries,
        indexed: true,
    })
}

/// Sort and dedup a word bucket, checking every word shares one non-zero length
fn prepare_words<I, S>(words: I) -> Result<(usize, Vec<String>)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut words: Vec<String> = words.into_iter().map(|w| w.as_ref().to_owned()).collect();
    words.sort_unstable();
    words.dedup();

    let word_length = words
        .first()
        .map(|w| w.chars().count())
        .ok_or_else(|| CrosswordError::InvalidSourceData {
            reason: "cannot index an empty word set".to_string(),
        })?;
    if word_length == 0 {
        return Err(CrosswordError::InvalidSourceData {
            reason: "cannot index the empty word".to_string(),
        });
    }
    if let Some(word) = words.iter().find(|w| w.chars().count() != word_length) {
        return Err(CrosswordError::MixedWordLengths {
            expected: word_length,
            found: word.chars().count(),
            word: word.clone(),
        });
    }

    Ok((word_length, words))
}
