//! Spatial data structures for puzzle layout
//!
//! This module contains spatial-related functionality including:
//! - The fillable/blocked cell grid
//! - Word slot discovery and ordering
//! - Board placement state and finished results

/// Board placement state and finished puzzle results
pub mod board;
/// Fillable/blocked cell grid
pub mod grid;
/// Word slot discovery and ordering
pub mod slots;

pub use board::{Board, BoardInfo, validate_board};
pub use grid::{Coord, Grid};
pub use slots::{Direction, SlotMap, WordSlot, map_grid_to_slots};
