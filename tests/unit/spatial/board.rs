//! Tests for board placement, clue listings and fill validation

#[cfg(test)]
mod tests {
    use crossfill::CrosswordError;
    use crossfill::lexicon::WordCorpus;
    use crossfill::spatial::{
        Board, BoardInfo, Direction, Grid, SlotMap, map_grid_to_slots, validate_board,
    };

    fn ring(corpus: &WordCorpus) -> SlotMap {
        let grid = Grid::parse("111\n1#1\n111\n").expect("Failed to parse grid");
        map_grid_to_slots(corpus, &grid)
    }

    fn fill(slot_map: &SlotMap, words: &[(Direction, u32, &str)]) -> Board {
        let mut board = Board::new();
        for &(direction, number, word) in words {
            if let Some(slot) = slot_map
                .iter()
                .find(|slot| slot.direction == direction && slot.clue_number == number)
            {
                board = board.with_word(&slot.cells, word);
            }
        }
        board
    }

    const RING_FILL: [(Direction, u32, &str); 4] = [
        (Direction::Across, 1, "tap"),
        (Direction::Down, 1, "tar"),
        (Direction::Down, 2, "pat"),
        (Direction::Across, 2, "rat"),
    ];

    // Tests writing a word returns a new board and leaves the old one alone
    // Verified by mutating the receiver in with_word
    #[test]
    fn test_with_word_copies() {
        let empty = Board::new();
        let placed = empty.with_word(&[(0, 0), (0, 1)], "hi");

        assert!(empty.is_empty());
        assert_eq!(placed.len(), 2);
        assert_eq!(placed.get((0, 1)), Some('i'));
        assert_eq!(placed.word_along(&[(0, 0), (0, 1)]), Some("hi".to_string()));
        assert_eq!(placed.word_along(&[(0, 0), (1, 0)]), None);
    }

    // Tests letters along a run report gaps as None
    // Verified by skipping empty cells
    #[test]
    fn test_letters_along() {
        let board = Board::new().with_word(&[(0, 0)], "x");
        let letters: Vec<Option<char>> = board.letters_along(&[(0, 0), (0, 1)]).collect();
        assert_eq!(letters, vec![Some('x'), None]);
    }

    // Tests the clue listing reads each slot's word
    // Verified by keying clues by slot index
    #[test]
    fn test_board_info_clues() {
        let corpus = WordCorpus::from_words(["tap", "tar", "pat", "rat"]);
        let slot_map = ring(&corpus);
        let info = BoardInfo::from_board(&slot_map, fill(&slot_map, &RING_FILL))
            .expect("Board is complete");

        assert_eq!(info.word(Direction::Across, 2), Some("rat"));
        assert_eq!(info.word(Direction::Down, 2), Some("pat"));
        assert_eq!(info.words().collect::<Vec<_>>(), vec!["tap", "rat", "tar", "pat"]);
    }

    // Tests an incomplete board cannot produce a clue listing
    // Verified by skipping unfilled slots
    #[test]
    fn test_board_info_incomplete() {
        let corpus = WordCorpus::from_words(["tap"]);
        let slot_map = ring(&corpus);
        let board = fill(&slot_map, &RING_FILL[..1]);
        assert!(matches!(
            BoardInfo::from_board(&slot_map, board),
            Err(CrosswordError::InvalidBoard { .. })
        ));
    }

    // Tests a correct fill validates
    // Verified by rejecting every board
    #[test]
    fn test_validate_accepts_fill() {
        let corpus = WordCorpus::from_words(["tap", "tar", "pat", "rat"]);
        let slot_map = ring(&corpus);
        assert!(validate_board(&slot_map, &fill(&slot_map, &RING_FILL), &corpus).is_ok());
    }

    // Tests words outside the corpus are rejected
    // Verified by removing the corpus membership check
    #[test]
    fn test_validate_rejects_unknown_word() {
        let corpus = WordCorpus::from_words(["tap", "tar", "pat"]);
        let slot_map = ring(&corpus);
        let err = validate_board(&slot_map, &fill(&slot_map, &RING_FILL), &corpus)
            .expect_err("rat is not in the corpus");
        assert!(err.to_string().contains("'rat'"));
    }

    // Tests a word used twice is rejected
    // Verified by removing the reuse check
    #[test]
    fn test_validate_rejects_reuse() {
        let corpus = WordCorpus::from_words(["aba"]);
        let grid = Grid::parse("111\n1#1\n111\n").expect("Failed to parse grid");
        let slot_map = map_grid_to_slots(&corpus, &grid);
        let board = fill(
            &slot_map,
            &[
                (Direction::Across, 1, "aba"),
                (Direction::Down, 1, "aba"),
                (Direction::Down, 2, "aba"),
                (Direction::Across, 2, "aba"),
            ],
        );

        let err = validate_board(&slot_map, &board, &corpus).expect_err("Reuse must fail");
        assert!(err.to_string().contains("used twice"));
    }
}
