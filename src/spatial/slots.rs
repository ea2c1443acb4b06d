//! Discovery and ordering of word slots
//!
//! A word slot is a maximal straight run of two or more fillable cells.
//! Slots are numbered per direction in row-major discovery order and then
//! reordered so that slots needing the rarest word lengths are filled first.

use crate::io::configuration::SlotOrdering;
use crate::lexicon::WordCorpus;
use crate::spatial::grid::{Coord, Grid};
use ndarray::Array2;
use std::collections::BTreeSet;
use std::fmt;

/// Direction that a slot is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Left to right along a row
    Across,
    /// Top to bottom along a column
    Down,
}

impl Direction {
    /// Lowercase name used in clue listings
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Across => "across",
            Self::Down => "down",
        }
    }

    /// Coordinates of the cell `offset` steps from `start`
    const fn step(self, (row, col): Coord, offset: usize) -> Coord {
        match self {
            Self::Across => (row, col + offset),
            Self::Down => (row + offset, col),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One run of fillable cells to be filled with a single word
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordSlot {
    /// First cell of the run
    pub start: Coord,
    /// Direction of the run
    pub direction: Direction,
    /// Clue number, counted separately for each direction from 1
    pub clue_number: u32,
    /// Covered cells in reading order
    pub cells: Vec<Coord>,
}

impl WordSlot {
    /// Word length this slot requires
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Test if the slot covers no cells
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl fmt::Display for WordSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at ({}, {}) len {}",
            self.clue_number,
            self.direction,
            self.start.0,
            self.start.1,
            self.len()
        )
    }
}

/// Word slots of a grid in the order they should be filled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotMap {
    slots: Vec<WordSlot>,
}

impl SlotMap {
    /// Slots in fill order
    pub fn slots(&self) -> &[WordSlot] {
        &self.slots
    }

    /// Iterate slots in fill order
    pub fn iter(&self) -> std::slice::Iter<'_, WordSlot> {
        self.slots.iter()
    }

    /// Number of slots
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Test if the grid produced no slots
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Every cell covered by at least one slot
    pub fn covered_cells(&self) -> BTreeSet<Coord> {
        self.slots
            .iter()
            .flat_map(|slot| slot.cells.iter().copied())
            .collect()
    }

    /// Distinct word lengths required by the slots
    pub fn lengths(&self) -> BTreeSet<usize> {
        self.slots.iter().map(WordSlot::len).collect()
    }
}

impl<'a> IntoIterator for &'a SlotMap {
    type Item = &'a WordSlot;
    type IntoIter = std::slice::Iter<'a, WordSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

/// Find every slot in the grid, ordered rarest word length first
pub fn map_grid_to_slots(corpus: &WordCorpus, grid: &Grid) -> SlotMap {
    map_grid_to_slots_with(corpus, grid, SlotOrdering::default())
}

/// Find every slot in the grid using the given ordering policy
pub fn map_grid_to_slots_with(
    corpus: &WordCorpus,
    grid: &Grid,
    ordering: SlotOrdering,
) -> SlotMap {
    let mut slots = discover_slots(grid);

    if ordering == SlotOrdering::RarestLengthFirst {
        // Stable: equal frequencies keep shorter-first, then discovery order
        slots.sort_by_key(|slot| (corpus.frequency(slot.len()), slot.len()));
    }

    for slot in &slots {
        log::debug!(
            "slot {slot} ({} candidate words)",
            corpus.frequency(slot.len())
        );
    }

    SlotMap { slots }
}

fn discover_slots(grid: &Grid) -> Vec<WordSlot> {
    let mut claimed_across = Array2::from_elem((grid.rows(), grid.cols()), false);
    let mut claimed_down = Array2::from_elem((grid.rows(), grid.cols()), false);
    let mut next_across = 1;
    let mut next_down = 1;
    let mut slots = Vec::new();

    for cell in grid.fillable_cells() {
        for (direction, claimed, counter) in [
            (Direction::Across, &mut claimed_across, &mut next_across),
            (Direction::Down, &mut claimed_down, &mut next_down),
        ] {
            if claimed.get(cell).copied().unwrap_or(true)
                || !grid.is_fillable(direction.step(cell, 1))
            {
                continue;
            }

            let cells: Vec<Coord> = (0..grid.rows().max(grid.cols()))
                .map(|offset| direction.step(cell, offset))
                .take_while(|&coord| grid.is_fillable(coord))
                .collect();
            for &coord in &cells {
                if let Some(flag) = claimed.get_mut(coord) {
                    *flag = true;
                }
            }

            slots.push(WordSlot {
                start: cell,
                direction,
                clue_number: *counter,
                cells,
            });
            *counter += 1;
        }
    }

    slots
}
