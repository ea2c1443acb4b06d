//! Tests for progress display bookkeeping

#[cfg(test)]
mod tests {
    use crossfill::CrosswordError;
    use crossfill::algorithm::batch::PuzzleResult;
    use crossfill::algorithm::executor::SearchStatistics;
    use crossfill::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use crossfill::build_logger;
    use crossfill::io::progress::{ProgressLogger, ProgressManager};
    use crossfill::spatial::BoardInfo;
    use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
    use log::{Level, Log, Metadata, Record};

    fn result(puzzle: usize, outcome: crossfill::Result<Option<BoardInfo>>) -> PuzzleResult {
        PuzzleResult {
            puzzle,
            seed: puzzle as u64,
            outcome,
            statistics: SearchStatistics {
                attempts: 1,
                placements: 12,
                ..SearchStatistics::default()
            },
            recorder: None,
        }
    }

    // Tests small batches get one bar per puzzle
    // Verified by inverting the batch threshold comparison
    #[test]
    fn test_individual_mode() {
        let mut pm = ProgressManager::new();
        pm.initialize(MAX_INDIVIDUAL_PROGRESS_BARS);
        assert!(!pm.is_batch_mode());
        pm.complete_puzzle(&result(0, Ok(None)));
        pm.finish();
    }

    // Tests large batches collapse to one counting bar
    // Verified by never creating the batch bar
    #[test]
    fn test_batch_mode() {
        let mut pm = ProgressManager::default();
        pm.initialize(MAX_INDIVIDUAL_PROGRESS_BARS + 1);
        assert!(pm.is_batch_mode());
        pm.complete_puzzle(&result(3, Ok(None)));
        pm.finish();
    }

    // Tests completions for unknown puzzles are ignored
    // Verified by indexing bars without a bounds check
    #[test]
    fn test_complete_unknown_puzzle() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);
        pm.complete_puzzle(&result(7, Ok(None)));
        let stage = pm.stage("indexing");
        stage.finish_with_message("done");
        pm.finish();
    }

    // Tests status lines distinguish no fill from failures
    // Verified by reporting every outcome as filled
    #[test]
    fn test_summary_lines() {
        let none = ProgressManager::summary(&result(0, Ok(None)));
        assert!(none.contains("no fill"));
        assert!(none.contains("12 placements"));

        let failed = ProgressManager::summary(&result(
            1,
            Err(CrosswordError::AttemptsExhausted { attempts: 2 }),
        ));
        assert!(failed.starts_with('!'));
        assert!(failed.contains("2 attempts"));
    }

    // Tests the bar-suspending logger filters exactly like the logger it wraps
    // Verified by enabling every level in the wrapper
    #[test]
    fn test_progress_logger_keeps_filter() {
        let reference = build_logger(false);
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let logger = ProgressLogger::new(build_logger(false), multi_progress);

        assert_eq!(logger.filter(), reference.filter());
        for level in [Level::Error, Level::Info, Level::Debug, Level::Trace] {
            let metadata = Metadata::builder().level(level).target("crossfill").build();
            assert_eq!(logger.enabled(&metadata), reference.enabled(&metadata));
        }
    }

    // Tests records are written while bars are active without disturbing them
    // Verified by holding the bar lock while logging
    #[test]
    fn test_progress_logger_logs_over_bars() {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let bar = multi_progress.add(ProgressBar::new(3));
        let logger = ProgressLogger::new(build_logger(false), multi_progress);

        bar.inc(1);
        logger.log(
            &Record::builder()
                .args(format_args!("searching"))
                .level(Level::Trace)
                .target("crossfill")
                .build(),
        );
        logger.flush();
        bar.inc(1);

        assert_eq!(bar.position(), 2);
        bar.finish();
    }
}
