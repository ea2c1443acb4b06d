//! Progress display for index builds and puzzle batches

use crate::algorithm::batch::PuzzleResult;
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::Log;
use std::sync::LazyLock;
use std::time::Duration;

/// Coordinates progress display for a generation run
///
/// Small batches get one spinner per puzzle; larger batches collapse into a
/// single counting bar. Methods take `&self` so worker threads can report
/// completions directly.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    puzzle_bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner} {prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Puzzles: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            puzzle_bars: Vec::new(),
        }
    }

    /// Show a spinner while a setup stage runs, returning it for later completion
    pub fn stage(&self, message: &str) -> ProgressBar {
        let spinner = self.multi_progress.add(ProgressBar::new_spinner());
        spinner.set_style(SPINNER_STYLE.clone());
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    /// Display shared by every bar, used to pause bars while logging
    pub const fn multi_progress(&self) -> &MultiProgress {
        &self.multi_progress
    }

    /// Create bars for a batch of `puzzle_count` puzzles
    pub fn initialize(&mut self, puzzle_count: usize) {
        // Switch to batch mode for large batches to avoid terminal spam
        if puzzle_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(puzzle_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
            return;
        }

        for puzzle in 0..puzzle_count {
            let bar = self.multi_progress.add(ProgressBar::new_spinner());
            bar.set_style(SPINNER_STYLE.clone());
            bar.set_prefix(format!("puzzle {puzzle}"));
            bar.set_message("searching");
            bar.enable_steady_tick(Duration::from_millis(100));
            self.puzzle_bars.push(bar);
        }
    }

    /// Returns true when a single counting bar is shown instead of one per puzzle
    pub const fn is_batch_mode(&self) -> bool {
        self.batch_bar.is_some()
    }

    /// Report a finished puzzle
    pub fn complete_puzzle(&self, result: &PuzzleResult) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
            return;
        }

        if let Some(bar) = self.puzzle_bars.get(result.puzzle) {
            bar.finish_with_message(Self::summary(result));
        }
    }

    /// Short status line for a finished puzzle
    pub fn summary(result: &PuzzleResult) -> String {
        let stats = &result.statistics;
        match &result.outcome {
            Ok(Some(_)) => format!(
                "✓ filled in {:.2?} ({} placements, {} attempts)",
                stats.elapsed, stats.placements, stats.attempts
            ),
            Ok(None) => format!("✗ no fill exists ({} placements)", stats.placements),
            Err(e) => format!("! {e}"),
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("all puzzles processed");
        }
        let _ = self.multi_progress.clear();
    }
}

/// Logger that hides progress bars while each record is written
///
/// Without this, log lines written to stderr interleave with the redraws of
/// active spinners and leave fragments of both on screen.
pub struct ProgressLogger {
    inner: env_logger::Logger,
    multi_progress: MultiProgress,
}

impl ProgressLogger {
    /// Wrap `inner` so its output is written between redraws of `multi_progress`
    pub const fn new(inner: env_logger::Logger, multi_progress: MultiProgress) -> Self {
        Self {
            inner,
            multi_progress,
        }
    }

    /// Most verbose level the wrapped logger accepts
    pub fn filter(&self) -> log::LevelFilter {
        self.inner.filter()
    }
}

impl Log for ProgressLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.inner.matches(record) {
            self.multi_progress.suspend(|| self.inner.log(record));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}
