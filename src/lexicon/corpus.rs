//! Word list loading and length bucketing

use crate::io::error::{Result, WithPath};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Words bucketed by length
///
/// Immutable once built. Buckets and the words inside them iterate in
/// sorted order so everything derived from a corpus is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordCorpus {
    buckets: BTreeMap<usize, BTreeSet<String>>,
    source: Option<PathBuf>,
}

impl WordCorpus {
    /// Build a corpus from an iterator of words
    ///
    /// Words are trimmed and lowercased; blank entries are dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut corpus = Self::default();
        for word in words {
            corpus.insert(word.as_ref());
        }
        corpus
    }

    fn insert(&mut self, raw: &str) {
        let word = raw.trim().to_lowercase();
        if word.is_empty() {
            return;
        }
        self.buckets
            .entry(word.chars().count())
            .or_default()
            .insert(word);
    }

    /// Words of the given length, if any
    pub fn words_of_length(&self, length: usize) -> Option<&BTreeSet<String>> {
        self.buckets.get(&length)
    }

    /// Number of words of the given length
    pub fn frequency(&self, length: usize) -> usize {
        self.buckets.get(&length).map_or(0, BTreeSet::len)
    }

    /// Word lengths present in the corpus, ascending
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.keys().copied()
    }

    /// Iterate `(length, words)` buckets in ascending length order
    pub fn buckets(&self) -> impl Iterator<Item = (usize, &BTreeSet<String>)> + '_ {
        self.buckets.iter().map(|(&length, words)| (length, words))
    }

    /// Total number of distinct words
    pub fn total_words(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).sum()
    }

    /// Test whether a word is in the corpus
    pub fn contains(&self, word: &str) -> bool {
        self.buckets
            .get(&word.chars().count())
            .is_some_and(|bucket| bucket.contains(word))
    }

    /// Test if the corpus holds no words
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Path the corpus was loaded from, if it came from a file
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Load a newline-delimited word list, bucketing words by length
///
/// When `max_words` is set, only that many lines are scanned.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read
pub fn load_words(path: &Path, max_words: Option<usize>) -> Result<WordCorpus> {
    let file = File::open(path).with_path(path, "open word list")?;
    let reader = BufReader::new(file);

    let mut corpus = WordCorpus {
        source: Some(path.to_path_buf()),
        ..WordCorpus::default()
    };

    for line in reader.lines().take(max_words.unwrap_or(usize::MAX)) {
        let line = line.with_path(path, "read word list")?;
        corpus.insert(&line);
    }

    log::info!(
        "Loaded {} words from '{}'",
        corpus.total_words(),
        path.display()
    );
    for (length, words) in corpus.buckets() {
        log::debug!("  length {length}: {} words", words.len());
    }

    Ok(corpus)
}
