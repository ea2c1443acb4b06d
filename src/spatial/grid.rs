//! Fillable/blocked cell layout of a puzzle
//!
//! A grid is a rectangular array of 0/1 cells where 1 marks a cell that can
//! hold a letter and 0 marks a block. Grids are read-only input to slot
//! mapping and rendering.

use crate::io::error::{Result, WithPath, malformed_grid};
use ndarray::Array2;
use std::path::Path;

/// Zero-indexed `(row, col)` coordinates, with row 0 at the top
pub type Coord = (usize, usize);

/// Value of a cell that can hold a letter
pub const FILLABLE: u8 = 1;
/// Value of a blocked cell
pub const BLOCKED: u8 = 0;

/// Rectangular layout of fillable and blocked cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<u8>,
}

impl Grid {
    /// Create a grid from rows of 0/1 values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are no rows, or the first row is empty
    /// - Rows differ in length
    /// - A cell holds anything other than 0 or 1
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if height == 0 || width == 0 {
            return Err(malformed_grid(&"grid has no cells"));
        }

        let mut flat = Vec::with_capacity(height * width);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(malformed_grid(&format!(
                    "row {r} has {} cells, expected {width}",
                    row.len()
                )));
            }
            if let Some((c, value)) = row
                .iter()
                .enumerate()
                .find(|&(_, &value)| value != FILLABLE && value != BLOCKED)
            {
                return Err(malformed_grid(&format!(
                    "cell ({r}, {c}) has value {value}, expected 0 or 1"
                )));
            }
            flat.extend_from_slice(row);
        }

        let cells = Array2::from_shape_vec((height, width), flat)
            .map_err(|e| malformed_grid(&e))?;
        Ok(Self { cells })
    }

    /// Parse a text grid, one row per line
    ///
    /// `1` or `.` marks a fillable cell and `0` or `#` a block. Spaces, tabs
    /// and commas are ignored and blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a line contains any other character or the rows
    /// do not form a rectangle
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<u8>> = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let mut row = Vec::new();
            for ch in line.chars() {
                match ch {
                    '1' | '.' => row.push(FILLABLE),
                    '0' | '#' => row.push(BLOCKED),
                    ' ' | '\t' | ',' => {}
                    other => {
                        return Err(malformed_grid(&format!(
                            "unexpected character '{other}' on line {}",
                            line_no + 1
                        )));
                    }
                }
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }

        Self::from_rows(&rows)
    }

    /// Read and parse a text grid file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_path(path, "read grid")?;
        Self::parse(&text)
    }

    /// Get the number of rows in the grid
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Get the number of columns in the grid
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Test whether a cell can hold a letter; out-of-bounds cells cannot
    pub fn is_fillable(&self, (row, col): Coord) -> bool {
        self.cells.get((row, col)).copied() == Some(FILLABLE)
    }

    /// All fillable coordinates in row-major order
    pub fn fillable_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .indexed_iter()
            .filter(|&(_, &value)| value == FILLABLE)
            .map(|(coord, _)| coord)
    }
}
