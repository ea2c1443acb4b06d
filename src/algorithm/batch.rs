//! Parallel generation of independent puzzles

use crate::algorithm::executor::{PlacementEngine, SearchStatistics};
use crate::algorithm::indexing::IndexSet;
use crate::io::configuration::{DEFAULT_PUZZLE_COUNT, DEFAULT_WORKERS, GeneratorConfig};
use crate::io::error::{CrosswordError, Result, invalid_parameter};
use crate::io::visualization::GifRecorder;
use crate::spatial::board::BoardInfo;
use crate::spatial::grid::Grid;
use crate::spatial::slots::SlotMap;
use rayon::prelude::*;

/// Settings for a batch of puzzles
#[derive(Clone, Copy, Debug)]
pub struct BatchOptions<'g> {
    /// Number of puzzles to generate
    pub count: usize,
    /// Size of the worker pool
    pub workers: usize,
    /// Grid and sampling interval for recording each search
    pub visualize: Option<(&'g Grid, usize)>,
}

impl Default for BatchOptions<'_> {
    fn default() -> Self {
        Self {
            count: DEFAULT_PUZZLE_COUNT,
            workers: DEFAULT_WORKERS,
            visualize: None,
        }
    }
}

/// Outcome of one puzzle in a batch
pub struct PuzzleResult {
    /// Position of the puzzle in the batch
    pub puzzle: usize,
    /// Seed the puzzle was searched with
    pub seed: u64,
    /// Filled board, `None` when no fill exists, or the search error
    pub outcome: Result<Option<BoardInfo>>,
    /// Work done by the search
    pub statistics: SearchStatistics,
    /// Captured frames, when recording was requested
    pub recorder: Option<GifRecorder>,
}

/// Seed for the `puzzle`-th member of a batch
pub const fn puzzle_seed(base_seed: u64, puzzle: usize) -> u64 {
    base_seed.wrapping_add(puzzle as u64)
}

/// Generate several puzzles for the same slot map on a fixed-size worker pool
///
/// Puzzles share the read-only slot map and indices and differ only in seed.
/// Results come back ordered by puzzle number; `on_complete` is called from
/// the worker as each puzzle finishes.
///
/// # Errors
///
/// Returns an error if `count` or `workers` is zero or the pool cannot be
/// created. Per-puzzle failures are reported in each [`PuzzleResult`].
pub fn generate_batch<F>(
    slot_map: &SlotMap,
    indices: &IndexSet,
    config: GeneratorConfig,
    options: BatchOptions<'_>,
    on_complete: F,
) -> Result<Vec<PuzzleResult>>
where
    F: Fn(&PuzzleResult) + Sync,
{
    if options.count == 0 {
        return Err(invalid_parameter(
            "count",
            &options.count,
            &"at least one puzzle is required",
        ));
    }
    if options.workers == 0 {
        return Err(invalid_parameter(
            "workers",
            &options.workers,
            &"at least one worker is required",
        ));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers)
        .build()
        .map_err(|e| CrosswordError::WorkerPool {
            reason: e.to_string(),
        })?;

    let results = pool.install(|| {
        (0..options.count)
            .into_par_iter()
            .map(|puzzle| {
                let result = solve_one(slot_map, indices, config, options, puzzle);
                on_complete(&result);
                result
            })
            .collect::<Vec<_>>()
    });

    Ok(results)
}

fn solve_one(
    slot_map: &SlotMap,
    indices: &IndexSet,
    config: GeneratorConfig,
    options: BatchOptions<'_>,
    puzzle: usize,
) -> PuzzleResult {
    let seed = puzzle_seed(config.seed, puzzle);
    let mut engine = match PlacementEngine::new(slot_map, indices, config.with_seed(seed)) {
        Ok(engine) => engine,
        Err(e) => {
            return PuzzleResult {
                puzzle,
                seed,
                outcome: Err(e),
                statistics: SearchStatistics::default(),
                recorder: None,
            };
        }
    };
    if let Some((grid, record_every)) = options.visualize {
        engine.enable_visualization(grid, record_every);
    }

    let outcome = engine.run();
    match &outcome {
        Ok(Some(_)) => log::info!("Puzzle {puzzle} (seed {seed}) filled: {:?}", engine.statistics),
        Ok(None) => log::info!("Puzzle {puzzle} (seed {seed}) has no fill"),
        Err(e) => log::warn!("Puzzle {puzzle} (seed {seed}) failed: {e}"),
    }

    PuzzleResult {
        puzzle,
        seed,
        outcome,
        statistics: engine.statistics,
        recorder: engine.visualization.take(),
    }
}
