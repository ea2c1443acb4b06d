//! Command-line interface for filling crossword grids from a word list

use crate::algorithm::batch::{BatchOptions, PuzzleResult, generate_batch};
use crate::algorithm::cache::IndexCache;
use crate::algorithm::indexing::{IndexOptions, build_indices};
use crate::io::configuration::{
    DEFAULT_ABORT_AFTER_SECS, DEFAULT_CACHE_DIR, DEFAULT_MAX_INDEX_LENGTH, DEFAULT_PUZZLE_COUNT,
    DEFAULT_RECORD_EVERY, DEFAULT_SEED, DEFAULT_WORKERS, GIF_FRAME_DELAY_MS, GeneratorConfig,
    SlotOrdering,
};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::render::{render_html, render_text};
use crate::lexicon::corpus::{WordCorpus, load_words};
use crate::spatial::board::validate_board;
use crate::spatial::grid::Grid;
use crate::spatial::slots::{SlotMap, map_grid_to_slots_with};
use clap::Parser;
use indicatif::MultiProgress;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "crossfill")]
#[command(
    author,
    version,
    about = "Fill crossword grids from a word list by randomized backtracking"
)]
/// Command-line arguments for the crossword generator
// Independent switches for output, caching and verbosity
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Word list, one word per line
    #[arg(value_name = "WORDS")]
    pub words: PathBuf,

    /// Grid file: one row per line, `1`/`.` fillable, `0`/`#` blocked
    #[arg(value_name = "GRID")]
    pub grid: PathBuf,

    /// Number of puzzles to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_PUZZLE_COUNT)]
    pub count: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Seconds before an attempt is abandoned and restarted (0 never aborts)
    #[arg(short, long, default_value_t = DEFAULT_ABORT_AFTER_SECS)]
    pub abort_after: f64,

    /// Give up after this many attempts
    #[arg(short, long)]
    pub max_attempts: Option<usize>,

    /// Longest word length given a constraint index
    #[arg(long, default_value_t = DEFAULT_MAX_INDEX_LENGTH)]
    pub max_index_len: usize,

    /// Only read this many lines of the word list
    #[arg(long)]
    pub max_words: Option<usize>,

    /// Directory for cached constraint indices
    #[arg(long, default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// Build indices in memory without reading or writing the cache
    #[arg(long)]
    pub no_cache: bool,

    /// Worker threads for index builds and batches
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Attempt slots in grid order instead of rarest length first
    #[arg(long)]
    pub discovery_order: bool,

    /// Write each puzzle as HTML to this path
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Record the search as an animated GIF at this path
    #[arg(long, value_name = "PATH")]
    pub visualize: Option<PathBuf>,

    /// Capture one GIF frame every this many placements
    #[arg(long, default_value_t = DEFAULT_RECORD_EVERY)]
    pub record_every: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Slot ordering selected on the command line
    pub const fn slot_ordering(&self) -> SlotOrdering {
        if self.discovery_order {
            SlotOrdering::DiscoveryOrder
        } else {
            SlotOrdering::RarestLengthFirst
        }
    }

    /// Search configuration selected on the command line
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::default()
            .with_seed(self.seed)
            .with_abort_after_secs(self.abort_after)
            .with_max_attempts(self.max_attempts)
    }

    /// Index settings for the lengths used by `slot_map`
    pub fn index_options(&self, slot_map: &SlotMap) -> IndexOptions {
        IndexOptions {
            max_index_length: self.max_index_len,
            workers: self.workers,
            lengths: Some(slot_map.lengths()),
            cache: (!self.no_cache)
                .then(|| IndexCache::new(&self.cache_dir, Some(self.words.as_path()))),
        }
    }
}

/// Runs the load, index, generate and render pipeline for one invocation
pub struct PuzzleProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl PuzzleProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Progress display to pause while logging, absent with `--quiet`
    pub fn multi_progress(&self) -> Option<&MultiProgress> {
        self.progress_manager
            .as_ref()
            .map(ProgressManager::multi_progress)
    }

    /// Generate and write every requested puzzle
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be read, a parameter is invalid,
    /// a puzzle search fails, or an output cannot be written. A grid with no
    /// possible fill is reported but is not an error.
    pub fn process(&mut self) -> Result<()> {
        validate_cli(&self.cli)?;
        let corpus = load_words(&self.cli.words, self.cli.max_words)?;
        let grid = Grid::load(&self.cli.grid)?;
        let slot_map = map_grid_to_slots_with(&corpus, &grid, self.cli.slot_ordering());
        for slot in &slot_map {
            log::debug!("Slot {slot}");
        }

        let stage = self
            .progress_manager
            .as_ref()
            .map(|pm| pm.stage("building constraint indices"));
        let indices = build_indices(&corpus, &self.cli.index_options(&slot_map))?;
        if let Some(stage) = stage {
            stage.finish_with_message(format!(
                "indexed {} lengths ({} cached)",
                indices.len(),
                indices.stats.hits
            ));
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.count);
        }

        let options = BatchOptions {
            count: self.cli.count,
            workers: self.cli.workers,
            visualize: self
                .cli
                .visualize
                .as_ref()
                .map(|_| (&grid, self.cli.record_every)),
        };
        let progress = self.progress_manager.as_ref();
        let results = generate_batch(
            &slot_map,
            &indices,
            self.cli.generator_config(),
            options,
            |result| {
                if let Some(pm) = progress {
                    pm.complete_puzzle(result);
                }
            },
        )?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        let mut first_error = None;
        for result in results {
            if let Err(e) = self.write_result(result, &slot_map, &grid, &corpus) {
                log::error!("{e}");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    // Allow print for the puzzle itself, which is the program's output
    #[allow(clippy::print_stdout)]
    fn write_result(
        &self,
        result: PuzzleResult,
        slot_map: &SlotMap,
        grid: &Grid,
        corpus: &WordCorpus,
    ) -> Result<()> {
        let PuzzleResult {
            puzzle,
            seed,
            outcome,
            recorder,
            ..
        } = result;

        if let (Some(path), Some(recorder)) = (&self.cli.visualize, recorder)
            && recorder.frame_count() > 0
        {
            let path = Self::numbered_path(path, puzzle, self.cli.count);
            recorder.export_gif(&path, GIF_FRAME_DELAY_MS)?;
        }

        let Some(info) = outcome? else {
            println!("Puzzle {puzzle} (seed {seed}): no fill exists for this grid and word list\n");
            return Ok(());
        };
        validate_board(slot_map, &info.board, corpus)?;

        println!("Puzzle {puzzle} (seed {seed})");
        println!("{}", render_text(&info, grid));

        if let Some(ref path) = self.cli.html {
            let path = Self::numbered_path(path, puzzle, self.cli.count);
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
            }
            std::fs::write(&path, render_html(&info, grid)).with_path(&path, "write file")?;
            log::info!("Wrote '{}'", path.display());
        }

        Ok(())
    }

    /// Output path for one puzzle, numbered when the batch has several
    pub fn numbered_path(path: &Path, puzzle: usize, count: usize) -> PathBuf {
        if count <= 1 {
            return path.to_path_buf();
        }

        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        let name = path.extension().map_or_else(
            || format!("{stem}_{puzzle}"),
            |extension| format!("{stem}_{puzzle}.{}", extension.to_string_lossy()),
        );

        path.parent()
            .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
    }
}

/// Reject argument combinations clap cannot express
///
/// # Errors
///
/// Returns an error for a zero count, worker count or frame interval
pub fn validate_cli(cli: &Cli) -> Result<()> {
    for (parameter, value) in [
        ("count", cli.count),
        ("workers", cli.workers),
        ("record_every", cli.record_every),
    ] {
        if value == 0 {
            return Err(invalid_parameter(parameter, &value, &"must be at least 1"));
        }
    }
    Ok(())
}
