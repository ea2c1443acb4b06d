/// Command-line interface and run orchestration
pub mod cli;
/// Generator constants and runtime configuration
pub mod configuration;
/// Error types and context management
pub mod error;
/// Progress display for index builds and puzzle batches
pub mod progress;
/// Text and HTML rendering of finished puzzles
pub mod render;
/// Frame capture and GIF export of the search
pub mod visualization;
