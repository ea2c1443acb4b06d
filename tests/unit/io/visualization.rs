//! Tests for frame capture and GIF export

#[cfg(test)]
mod tests {
    use crossfill::io::configuration::{GIF_CELL_PIXELS, GIF_FRAME_DELAY_MS, GIF_MAX_FRAMES};
    use crossfill::io::visualization::{GifRecorder, letter_color};
    use crossfill::spatial::{Board, Grid};

    fn grid() -> Grid {
        Grid::parse("11\n10\n").expect("Failed to parse grid")
    }

    // Tests only every n-th offered board is kept
    // Verified by recording every board regardless of interval
    #[test]
    fn test_record_every() {
        let mut recorder = GifRecorder::new(grid(), 3);
        for _ in 0..7 {
            recorder.record(&Board::new());
        }
        assert_eq!(recorder.frame_count(), 3);
    }

    // Tests the frame count is capped
    // Verified by removing the frame limit
    #[test]
    fn test_frame_cap() {
        let mut recorder = GifRecorder::new(grid(), 0);
        for _ in 0..GIF_MAX_FRAMES + 10 {
            recorder.record(&Board::new());
        }
        assert_eq!(recorder.frame_count(), GIF_MAX_FRAMES);
    }

    // Tests frames are scaled and coloured per cell state
    // Verified by drawing blocks with the empty colour
    #[test]
    fn test_render_frame_colors() {
        let recorder = GifRecorder::new(grid(), 1);
        let board = Board::new().with_word(&[(0, 0), (0, 1)], "ab");
        let frame = recorder.render_frame(&board, GIF_FRAME_DELAY_MS);
        let image = frame.buffer();

        assert_eq!(image.width(), 2 * GIF_CELL_PIXELS);
        assert_eq!(image.height(), 2 * GIF_CELL_PIXELS);
        assert_eq!(image.get_pixel(0, 0).0, letter_color('a'));
        assert_eq!(image.get_pixel(GIF_CELL_PIXELS, 0).0, letter_color('b'));
        assert_ne!(
            image.get_pixel(0, GIF_CELL_PIXELS).0,
            image.get_pixel(GIF_CELL_PIXELS, GIF_CELL_PIXELS).0
        );
    }

    // Tests distinct letters get distinct colours
    // Verified by mapping every letter to one colour
    #[test]
    fn test_letter_colors_distinct() {
        let colors: std::collections::HashSet<[u8; 4]> =
            ('a'..='z').map(letter_color).collect();
        assert_eq!(colors.len(), 26);
    }

    // Tests export writes a GIF and refuses an empty capture
    // Verified by exporting an empty animation
    #[test]
    fn test_export_gif() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("search.gif");

        let empty = GifRecorder::new(grid(), 1);
        assert!(empty.export_gif(&path, GIF_FRAME_DELAY_MS).is_err());

        let mut recorder = GifRecorder::new(grid(), 1);
        recorder.record(&Board::new());
        recorder.record(&Board::new().with_word(&[(0, 0), (1, 0)], "hi"));
        recorder
            .export_gif(&path, GIF_FRAME_DELAY_MS)
            .expect("Failed to export GIF");

        let bytes = std::fs::read(&path).expect("GIF should exist");
        assert!(bytes.starts_with(b"GIF89a"));
    }
}
