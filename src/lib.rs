//! Crossword grid filling by randomized backtracking over precomputed constraint indices
//!
//! A word list is bucketed by length, and every word is indexed under every
//! subset of its letter positions so that any partially filled slot maps to
//! its candidate words in one lookup. Slots are discovered from a 0/1 grid,
//! ordered rarest length first, and filled depth-first with shuffled
//! candidates; attempts that exceed their time budget restart with a fresh
//! ordering.

#![forbid(unsafe_code)]

/// Constraint indexing, caching and the placement search
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Word list loading and length buckets
pub mod lexicon;
/// Grid, word slot and board structures
pub mod spatial;

pub use algorithm::batch::generate_batch;
pub use algorithm::constraints::build_constraint_index;
pub use algorithm::executor::generate;
pub use algorithm::indexing::build_indices;
pub use io::error::{CrosswordError, Result};
pub use lexicon::load_words;
pub use spatial::map_grid_to_slots;

use indicatif::MultiProgress;
use crate::io::progress::ProgressLogger;
use log::LevelFilter;

/// Build the env_logger backend
///
/// Logs at `Info`, or `Debug` when `verbose` is set. `RUST_LOG`, when
/// present, overrides both.
pub fn build_logger(verbose: bool) -> env_logger::Logger {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.build()
}

/// Install the process-wide logger
///
/// When `progress` is given, records are written with its bars suspended.
/// Calling this twice keeps the first logger.
pub fn init_logger(verbose: bool, progress: Option<&MultiProgress>) {
    let logger = build_logger(verbose);
    let max_level = logger.filter();

    let installed = match progress {
        Some(multi_progress) => log::set_boxed_logger(Box::new(ProgressLogger::new(
            logger,
            multi_progress.clone(),
        ))),
        None => log::set_boxed_logger(Box::new(logger)),
    };

    if installed.is_ok() {
        log::set_max_level(max_level);
        log::debug!("Logger initialized at {max_level:?} level");
    }
}
