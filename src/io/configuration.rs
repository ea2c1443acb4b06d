//! Generator constants and runtime configuration defaults

use std::time::Duration;

// Constraint index settings
/// Longest word length indexed by default (longer slots fall back to scanning)
pub const DEFAULT_MAX_INDEX_LENGTH: usize = 9;

// Position subsets are stored as a `u32` bitmask
/// Hard upper bound on indexed word length
pub const MAX_INDEXED_WORD_LENGTH: usize = 31;

/// Directory holding serialized constraint indices
pub const DEFAULT_CACHE_DIR: &str = ".crossfill_cache";

/// Number of hex digits of the content hash used in cache file names
pub const CACHE_HASH_PREFIX_LEN: usize = 16;

/// Extension of serialized constraint index files
pub const CACHE_EXTENSION: &str = "json";

// Worker pool settings
/// Default number of worker threads for index builds and batch generation
pub const DEFAULT_WORKERS: usize = 4;

// Search settings
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default wall-clock budget per attempt in seconds (0 disables aborts)
pub const DEFAULT_ABORT_AFTER_SECS: f64 = 0.0;

/// Default number of puzzles generated per run
pub const DEFAULT_PUZZLE_COUNT: usize = 1;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Animation settings
/// Pixel size of one grid cell in recorded frames
pub const GIF_CELL_PIXELS: u32 = 12;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 240;
/// Record one frame every this many placements
pub const DEFAULT_RECORD_EVERY: usize = 1;
// Bounds memory held by long searches
/// Maximum number of frames captured per puzzle
pub const GIF_MAX_FRAMES: usize = 2_000;

/// Order in which word slots are attempted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotOrdering {
    /// Slots whose word length has the fewest corpus words go first
    #[default]
    RarestLengthFirst,
    /// Slots are attempted in row-major discovery order
    DiscoveryOrder,
}

/// Parameters controlling a generation run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Seed for candidate shuffling
    pub seed: u64,
    /// Wall-clock budget per attempt; `None` never aborts
    pub abort_after: Option<Duration>,
    /// Upper bound on attempts; `None` retries until a fill or exhaustion
    pub max_attempts: Option<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            abort_after: None,
            max_attempts: None,
        }
    }
}

impl GeneratorConfig {
    /// Set the per-attempt budget from seconds, where zero or less means no abort
    #[must_use]
    pub fn with_abort_after_secs(mut self, secs: f64) -> Self {
        self.abort_after = if secs > 0.0 {
            Duration::try_from_secs_f64(secs).ok()
        } else {
            None
        };
        self
    }

    /// Set the random seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the attempt limit
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: Option<usize>) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}
