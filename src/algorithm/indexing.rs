//! Per-length constraint indices for a whole corpus, built in parallel

use crate::algorithm::cache::{CacheStats, IndexCache};
use crate::algorithm::constraints::{ConstraintIndex, build_constraint_index};
use crate::io::configuration::{DEFAULT_MAX_INDEX_LENGTH, DEFAULT_WORKERS};
use crate::io::error::{CrosswordError, Result, invalid_parameter};
use crate::lexicon::WordCorpus;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

/// Settings for building a corpus's indices
#[derive(Clone, Debug)]
pub struct IndexOptions {
    /// Lengths up to this are indexed; longer buckets are scanned
    pub max_index_length: usize,
    /// Size of the worker pool
    pub workers: usize,
    /// Restrict work to these lengths; `None` covers the whole corpus
    pub lengths: Option<BTreeSet<usize>>,
    /// Disk cache; `None` always rebuilds
    pub cache: Option<IndexCache>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            max_index_length: DEFAULT_MAX_INDEX_LENGTH,
            workers: DEFAULT_WORKERS,
            lengths: None,
            cache: None,
        }
    }
}

/// Constraint indices keyed by word length
#[derive(Debug, Default, Clone)]
pub struct IndexSet {
    by_length: BTreeMap<usize, ConstraintIndex>,
    /// Disk cache outcomes from building this set
    pub stats: CacheStats,
}

impl IndexSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap every corpus bucket without precomputing keys
    ///
    /// # Errors
    ///
    /// Returns an error if a bucket cannot be wrapped
    pub fn unindexed(corpus: &WordCorpus) -> Result<Self> {
        let mut set = Self::new();
        for (_, words) in corpus.buckets() {
            set.insert(ConstraintIndex::unindexed(words)?);
        }
        Ok(set)
    }

    /// Add or replace the index for its word length
    pub fn insert(&mut self, index: ConstraintIndex) {
        self.by_length.insert(index.word_length(), index);
    }

    /// Index for a word length, if any
    pub fn get(&self, word_length: usize) -> Option<&ConstraintIndex> {
        self.by_length.get(&word_length)
    }

    /// Word lengths covered, ascending
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_length.keys().copied()
    }

    /// Number of lengths covered
    pub fn len(&self) -> usize {
        self.by_length.len()
    }

    /// Test if no lengths are covered
    pub fn is_empty(&self) -> bool {
        self.by_length.is_empty()
    }
}

/// Build or load the index for each corpus length on a fixed-size worker pool
///
/// One job runs per word length, since each build is independent and CPU
/// bound. Lengths above `max_index_length` are wrapped unindexed.
///
/// # Errors
///
/// Returns an error if:
/// - `workers` is zero or the pool cannot be created
/// - Any index build or cache write fails
pub fn build_indices(corpus: &WordCorpus, options: &IndexOptions) -> Result<IndexSet> {
    if options.workers == 0 {
        return Err(invalid_parameter(
            "workers",
            &options.workers,
            &"at least one worker is required",
        ));
    }

    let wanted = |length: &usize| {
        options
            .lengths
            .as_ref()
            .is_none_or(|lengths| lengths.contains(length))
    };
    let (indexed, scanned): (Vec<_>, Vec<_>) = corpus
        .buckets()
        .filter(|(length, _)| wanted(length))
        .partition(|&(length, _)| length <= options.max_index_length);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers)
        .build()
        .map_err(|e| CrosswordError::WorkerPool {
            reason: e.to_string(),
        })?;

    let start = Instant::now();
    let built: Vec<_> = pool.install(|| {
        indexed
            .par_iter()
            .map(|&(length, words)| {
                log::info!("Preparing index for length {length} ({} words)", words.len());
                match &options.cache {
                    Some(cache) => cache
                        .get_or_build(words)
                        .map(|(index, lookup)| (index, Some(lookup))),
                    None => build_constraint_index(words).map(|index| (index, None)),
                }
            })
            .collect::<Result<Vec<_>>>()
    })?;

    let mut set = IndexSet::new();
    for (index, lookup) in built {
        if let Some(lookup) = lookup {
            set.stats.record(lookup);
        }
        set.insert(index);
    }
    for (_, words) in scanned {
        set.insert(ConstraintIndex::unindexed(words)?);
    }

    log::info!(
        "Prepared {} word lengths in {:.2?} (cache: {} hits, {} misses, {} stale)",
        set.len(),
        start.elapsed(),
        set.stats.hits,
        set.stats.misses,
        set.stats.stale
    );

    Ok(set)
}
