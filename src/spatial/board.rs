//! Placement state and finished puzzle results

use crate::io::error::{Result, invalid_board};
use crate::lexicon::WordCorpus;
use crate::spatial::grid::Coord;
use crate::spatial::slots::{Direction, SlotMap, WordSlot};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Letters placed so far, keyed by cell
///
/// Boards are copied rather than mutated during search, so backtracking is
/// simply dropping the copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: HashMap<Coord, char>,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Letter at a cell, if placed
    pub fn get(&self, coord: Coord) -> Option<char> {
        self.cells.get(&coord).copied()
    }

    /// Letters (or gaps) along a run of cells
    pub fn letters_along<'a>(
        &'a self,
        cells: &'a [Coord],
    ) -> impl Iterator<Item = Option<char>> + 'a {
        cells.iter().map(|&coord| self.get(coord))
    }

    /// The word spelled along a run of cells, if every cell is filled
    pub fn word_along(&self, cells: &[Coord]) -> Option<String> {
        self.letters_along(cells).collect()
    }

    /// Copy of this board with a word written along a run of cells
    #[must_use]
    pub fn with_word(&self, cells: &[Coord], word: &str) -> Self {
        let mut board = self.clone();
        board.cells.extend(cells.iter().copied().zip(word.chars()));
        board
    }

    /// Number of filled cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Test if no letters are placed
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate placed letters in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, char)> + '_ {
        self.cells.iter().map(|(&coord, &letter)| (coord, letter))
    }
}

/// A finished board together with its clue-number to word listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardInfo {
    /// Completed letter placement
    pub board: Board,
    /// Words by direction, then by ascending clue number
    pub clues: BTreeMap<Direction, BTreeMap<u32, String>>,
}

impl BoardInfo {
    /// Derive the clue listing for a completed board
    ///
    /// # Errors
    ///
    /// Returns an error if any slot is not completely filled
    pub fn from_board(slot_map: &SlotMap, board: Board) -> Result<Self> {
        let mut clues: BTreeMap<Direction, BTreeMap<u32, String>> = BTreeMap::new();

        for slot in slot_map {
            let word = read_slot(&board, slot)?;
            clues
                .entry(slot.direction)
                .or_default()
                .insert(slot.clue_number, word);
        }

        Ok(Self { board, clues })
    }

    /// Word for a clue, if present
    pub fn word(&self, direction: Direction, clue_number: u32) -> Option<&str> {
        self.clues
            .get(&direction)
            .and_then(|clues| clues.get(&clue_number))
            .map(String::as_str)
    }

    /// All placed words in direction then clue order
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.clues
            .values()
            .flat_map(|clues| clues.values().map(String::as_str))
    }
}

fn read_slot(board: &Board, slot: &WordSlot) -> Result<String> {
    board
        .word_along(&slot.cells)
        .ok_or_else(|| invalid_board(&format!("slot {slot} is not completely filled")))
}

/// Check that a board is a valid fill of the slots
///
/// Every slot must read as a corpus word of the right length and no word may
/// appear in more than one slot. Crossing agreement follows from the board
/// holding a single letter per cell.
///
/// # Errors
///
/// Returns an error describing the first violation found
pub fn validate_board(slot_map: &SlotMap, board: &Board, corpus: &WordCorpus) -> Result<()> {
    let mut used: HashSet<String> = HashSet::with_capacity(slot_map.len());

    for slot in slot_map {
        let word = read_slot(board, slot)?;
        if word.chars().count() != slot.len() {
            return Err(invalid_board(&format!(
                "slot {slot} holds '{word}' of the wrong length"
            )));
        }
        if !corpus.contains(&word) {
            return Err(invalid_board(&format!(
                "slot {slot} holds '{word}', which is not in the word list"
            )));
        }
        if !used.insert(word.clone()) {
            return Err(invalid_board(&format!("word '{word}' is used twice")));
        }
    }

    Ok(())
}
