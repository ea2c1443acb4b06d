//! Tests for text and HTML rendering of finished puzzles

#[cfg(test)]
mod tests {
    use crossfill::io::render::{BLOCK_GLYPH, render_html, render_text};
    use crossfill::lexicon::WordCorpus;
    use crossfill::spatial::{Board, BoardInfo, Direction, Grid, SlotMap, map_grid_to_slots};

    fn corner() -> (Grid, SlotMap, BoardInfo) {
        let corpus = WordCorpus::from_words(["cat", "cap"]);
        let grid = Grid::parse("111\n1##\n1##\n").expect("Failed to parse grid");
        let slot_map = map_grid_to_slots(&corpus, &grid);
        let mut board = Board::new();
        for slot in &slot_map {
            let word = match slot.direction {
                Direction::Across => "cat",
                Direction::Down => "cap",
            };
            board = board.with_word(&slot.cells, word);
        }
        let info = BoardInfo::from_board(&slot_map, board).expect("Board is complete");
        (grid, slot_map, info)
    }

    // Tests rows, blocks and clue sections appear in the text rendering
    // Verified by swapping row and column in the cell lookup
    #[test]
    fn test_render_text() {
        let (grid, _, info) = corner();
        let text = render_text(&info, &grid);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.first(), Some(&"c a t"));
        assert_eq!(lines.get(1), Some(&format!("a {BLOCK_GLYPH} {BLOCK_GLYPH}").as_str()));
        assert_eq!(lines.get(2), Some(&"p # #"));
        assert!(text.contains("ACROSS\n  1  cat"));
        assert!(text.contains("DOWN\n  1  cap"));
    }

    // Tests HTML marks blocks and lists clues
    // Verified by emitting blocks as empty letter cells
    #[test]
    fn test_render_html() {
        let (grid, _, info) = corner();
        let html = render_html(&info, &grid);

        assert_eq!(html.matches("<td class=\"block\"></td>").count(), 4);
        assert!(html.contains("<td>c</td>"));
        assert!(html.contains("<tr><td>1</td><td>cap</td></tr>"));
        assert!(html.starts_with("<div class=\"crossword\">"));
    }

    // Tests special characters in words are escaped
    // Verified by writing words without escaping
    #[test]
    fn test_render_html_escapes() {
        let grid = Grid::parse("11\n").expect("Failed to parse grid");
        let corpus = WordCorpus::from_words(["<&"]);
        let slot_map = map_grid_to_slots(&corpus, &grid);
        let cells = slot_map.slots().first().map(|slot| slot.cells.clone()).unwrap_or_default();
        let board = Board::new().with_word(&cells, "<&");
        let info = BoardInfo::from_board(&slot_map, board).expect("Board is complete");

        let html = render_html(&info, &grid);
        assert!(html.contains("&lt;&amp;"));
        assert!(!html.contains("<&"));
    }
}
