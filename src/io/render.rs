//! Plain text and HTML rendering of finished puzzles

use crate::spatial::board::BoardInfo;
use crate::spatial::grid::Grid;
use std::fmt::Write;

/// Character drawn for blocked cells
pub const BLOCK_GLYPH: char = '#';
/// Character drawn for fillable cells left empty
pub const EMPTY_GLYPH: char = '.';

/// Render the board as rows of letters followed by the clue lists
pub fn render_text(info: &BoardInfo, grid: &Grid) -> String {
    let mut out = String::new();

    for row in 0..grid.rows() {
        let line: Vec<String> = (0..grid.cols())
            .map(|col| cell_glyph(info, grid, (row, col)).to_string())
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }

    for (direction, clues) in &info.clues {
        let _ = write!(out, "\n{}\n", direction.as_str().to_uppercase());
        for (number, word) in clues {
            let _ = writeln!(out, "{number:>3}  {word}");
        }
    }

    out
}

/// Render the board and clue lists as a standalone HTML fragment
pub fn render_html(info: &BoardInfo, grid: &Grid) -> String {
    let mut out = String::from("<div class=\"crossword\">\n<table class=\"grid\">\n");

    for row in 0..grid.rows() {
        out.push_str("  <tr>");
        for col in 0..grid.cols() {
            if grid.is_fillable((row, col)) {
                let letter = info.board.get((row, col)).unwrap_or(' ');
                let _ = write!(out, "<td>{}</td>", escape_html(letter));
            } else {
                out.push_str("<td class=\"block\"></td>");
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");

    for (direction, clues) in &info.clues {
        let _ = writeln!(
            out,
            "<table class=\"clues\">\n  <tr><th colspan=\"2\">{direction}</th></tr>"
        );
        for (number, word) in clues {
            let escaped: String = word.chars().map(escape_html).collect();
            let _ = writeln!(out, "  <tr><td>{number}</td><td>{escaped}</td></tr>");
        }
        out.push_str("</table>\n");
    }

    out.push_str("</div>\n");
    out
}

fn cell_glyph(info: &BoardInfo, grid: &Grid, coord: (usize, usize)) -> char {
    if grid.is_fillable(coord) {
        info.board.get(coord).unwrap_or(EMPTY_GLYPH)
    } else {
        BLOCK_GLYPH
    }
}

fn escape_html(ch: char) -> String {
    match ch {
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        '&' => "&amp;".to_string(),
        '"' => "&quot;".to_string(),
        other => other.to_string(),
    }
}
