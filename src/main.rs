//! CLI entry point for the crossword generator

use clap::Parser;
use crossfill::io::cli::{Cli, PuzzleProcessor};

fn main() -> crossfill::Result<()> {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    let mut processor = PuzzleProcessor::new(cli);
    crossfill::init_logger(verbose, processor.multi_progress());
    processor.process()
}
