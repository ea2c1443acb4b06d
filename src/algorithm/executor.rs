use crate::algorithm::bitset::WordBitset;
use crate::algorithm::constraints::{ConstraintKey, WordId};
use crate::algorithm::indexing::IndexSet;
use crate::io::configuration::{GeneratorConfig, MAX_INDEXED_WORD_LENGTH};
use crate::io::error::{CrosswordError, Result, invalid_parameter};
use crate::io::visualization::GifRecorder;
use crate::spatial::board::{Board, BoardInfo};
use crate::spatial::grid::Grid;
use crate::spatial::slots::SlotMap;
use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Result of one search attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Every slot was filled
    Solved(Board),
    /// Every candidate ordering failed; no fill exists for this corpus
    Exhausted,
    /// The attempt ran past its wall-clock budget
    TimedOut,
}

/// Counters describing the work done by a search
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Attempts started, including the successful one
    pub attempts: usize,
    /// Attempts abandoned for exceeding the budget
    pub timeouts: usize,
    /// Words tentatively placed
    pub placements: u64,
    /// Slots that ran out of candidates
    pub backtracks: u64,
    /// Wall time across all attempts
    pub elapsed: Duration,
}

/// Words already used on the board, one bitset per word length
///
/// Each recursion level gets its own snapshot, so nothing needs undoing
/// when a branch fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenWords {
    by_length: BTreeMap<usize, WordBitset>,
}

impl SeenWords {
    /// Test whether a word id of the given length is used
    pub fn contains(&self, word_length: usize, word: WordId) -> bool {
        self.by_length
            .get(&word_length)
            .is_some_and(|seen| seen.contains(word))
    }

    /// Copy of this set with one more word
    #[must_use]
    pub fn with(&self, word_length: usize, bucket_size: usize, word: WordId) -> Self {
        let mut next = self.clone();
        next.by_length
            .entry(word_length)
            .or_insert_with(|| WordBitset::new(bucket_size))
            .insert(word);
        next
    }

    /// Number of words used
    pub fn count(&self) -> usize {
        self.by_length.values().map(WordBitset::count).sum()
    }
}

/// Seeded random selector for reproducible candidate orders
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Shuffle candidates in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Backtracking crossword filler
///
/// Fills slots in the order given by the slot map. For each slot the letters
/// already on the board form a constraint key; the index turns that key into
/// candidate words, which are shuffled and tried in turn on a copy of the
/// board. A wall-clock budget abandons hopeless attempts so the driver can
/// restart with a fresh ordering.
pub struct PlacementEngine<'a> {
    slot_map: &'a SlotMap,
    indices: &'a IndexSet,
    /// Budget and attempt limits, read afresh by every attempt
    pub config: GeneratorConfig,
    /// Random number generator for candidate shuffling
    pub random_selector: RandomSelector,
    /// Work counters across all attempts
    pub statistics: SearchStatistics,
    /// Optional capture of intermediate boards
    pub visualization: Option<GifRecorder>,
}

impl<'a> PlacementEngine<'a> {
    /// Create an engine for a slot map and its word indices
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `max_attempts` is zero
    /// - A slot is longer than [`MAX_INDEXED_WORD_LENGTH`]
    pub fn new(
        slot_map: &'a SlotMap,
        indices: &'a IndexSet,
        config: GeneratorConfig,
    ) -> Result<Self> {
        if config.max_attempts == Some(0) {
            return Err(invalid_parameter(
                "max_attempts",
                &0,
                &"at least one attempt is required",
            ));
        }
        if let Some(slot) = slot_map.iter().find(|slot| slot.len() > MAX_INDEXED_WORD_LENGTH) {
            return Err(invalid_parameter(
                "grid",
                &slot,
                &format!("slots are limited to {MAX_INDEXED_WORD_LENGTH} cells"),
            ));
        }
        for length in slot_map.lengths() {
            if indices.get(length).is_none() {
                log::warn!("No words of length {length}; the grid cannot be filled");
            }
        }

        Ok(Self {
            slot_map,
            indices,
            config,
            random_selector: RandomSelector::new(config.seed),
            statistics: SearchStatistics::default(),
            visualization: None,
        })
    }

    /// Record intermediate boards, keeping one in every `record_every` placements
    pub fn enable_visualization(&mut self, grid: &Grid, record_every: usize) {
        self.visualization = Some(GifRecorder::new(grid.clone(), record_every));
    }

    /// Run one search attempt from an empty board
    pub fn attempt(&mut self) -> SearchOutcome {
        let started = Instant::now();
        let outcome = self.place(0, &Board::new(), &SeenWords::default(), started);
        self.statistics.elapsed += started.elapsed();
        outcome
    }

    fn place(
        &mut self,
        depth: usize,
        board: &Board,
        seen: &SeenWords,
        started: Instant,
    ) -> SearchOutcome {
        if self
            .config
            .abort_after
            .is_some_and(|limit| started.elapsed() >= limit)
        {
            return SearchOutcome::TimedOut;
        }

        let (slot_map, indices) = (self.slot_map, self.indices);
        let Some(slot) = slot_map.slots().get(depth) else {
            return SearchOutcome::Solved(board.clone());
        };
        let Some(index) = indices.get(slot.len()) else {
            self.statistics.backtracks += 1;
            return SearchOutcome::Exhausted;
        };

        let key = ConstraintKey::from_placed(board.letters_along(&slot.cells));
        let mut candidates = index.candidates(key.as_ref());
        candidates.retain(|&id| !seen.contains(slot.len(), id));
        self.random_selector.shuffle(&mut candidates);

        for id in candidates {
            let Some(word) = index.word(id) else {
                continue;
            };
            let next_board = board.with_word(&slot.cells, word);
            self.statistics.placements += 1;
            if let Some(recorder) = self.visualization.as_mut() {
                recorder.record(&next_board);
            }

            let next_seen = seen.with(slot.len(), index.len(), id);
            match self.place(depth + 1, &next_board, &next_seen, started) {
                SearchOutcome::Exhausted => {}
                outcome => return outcome,
            }
        }

        self.statistics.backtracks += 1;
        SearchOutcome::Exhausted
    }

    /// Search until a fill is found, the space is exhausted, or attempts run out
    ///
    /// Timed-out attempts restart from an empty board. The random selector is
    /// not reseeded, so every restart explores a different candidate order.
    ///
    /// # Errors
    ///
    /// Returns an error if every permitted attempt timed out, or the solved
    /// board does not cover every slot
    pub fn run(&mut self) -> Result<Option<BoardInfo>> {
        loop {
            let attempts = self.statistics.attempts;
            if self.config.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(CrosswordError::AttemptsExhausted { attempts });
            }
            self.statistics.attempts += 1;

            match self.attempt() {
                SearchOutcome::Solved(board) => {
                    log::debug!("Solved: {:?}", self.statistics);
                    return BoardInfo::from_board(self.slot_map, board).map(Some);
                }
                SearchOutcome::Exhausted => {
                    log::debug!("Exhausted: {:?}", self.statistics);
                    return Ok(None);
                }
                SearchOutcome::TimedOut => {
                    self.statistics.timeouts += 1;
                    log::warn!(
                        "Attempt {} exceeded {:.2?}; retrying with a fresh candidate order",
                        self.statistics.attempts,
                        self.config.abort_after.unwrap_or_default()
                    );
                }
            }
        }
    }
}

/// Fill a slot map using the given indices
///
/// Returns `Ok(None)` when no fill exists for this grid and corpus.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or every permitted
/// attempt timed out
pub fn generate(
    slot_map: &SlotMap,
    indices: &IndexSet,
    config: GeneratorConfig,
) -> Result<Option<BoardInfo>> {
    PlacementEngine::new(slot_map, indices, config)?.run()
}
