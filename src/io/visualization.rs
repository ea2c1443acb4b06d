//! Frame capture and GIF generation for search visualization

use crate::io::configuration::{GIF_CELL_PIXELS, GIF_MAX_FRAMES};
use crate::io::error::{CrosswordError, Result, WithPath};
use crate::spatial::board::Board;
use crate::spatial::grid::Grid;
use image::{Delay, Frame, Rgba, RgbaImage};
use std::path::Path;

const BLOCKED_COLOR: [u8; 4] = [24, 24, 24, 255];
const EMPTY_COLOR: [u8; 4] = [228, 228, 228, 255];

/// Colour used for a placed letter
///
/// Letters map to fixed, well-separated colours so the same word looks the
/// same in every frame.
pub fn letter_color(letter: char) -> [u8; 4] {
    let index = u32::from(letter).wrapping_sub(u32::from('a')) % 26;
    [
        (60 + (index * 37) % 180) as u8,
        (60 + (index * 71) % 180) as u8,
        (60 + (index * 113) % 180) as u8,
        255,
    ]
}

/// Captures intermediate boards during search
///
/// Every `record_every`-th recorded board becomes one animation frame, up to
/// a fixed frame limit.
pub struct GifRecorder {
    grid: Grid,
    record_every: usize,
    record_calls: usize,
    frames: Vec<Board>,
}

impl GifRecorder {
    /// Create a recorder for boards laid out on `grid`
    pub fn new(grid: Grid, record_every: usize) -> Self {
        Self {
            grid,
            record_every: record_every.max(1),
            record_calls: 0,
            frames: Vec::new(),
        }
    }

    /// Offer a board for capture
    pub fn record(&mut self, board: &Board) {
        let call = self.record_calls;
        self.record_calls += 1;
        if call % self.record_every != 0 || self.frames.len() >= GIF_MAX_FRAMES {
            return;
        }
        self.frames.push(board.clone());
    }

    /// Returns the number of captured frames
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as an animated GIF
    ///
    /// The last frame is held ten times longer so the finished board is
    /// readable before the animation loops.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No boards were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(CrosswordError::InvalidSourceData {
                reason: "No boards captured for visualization".to_string(),
            });
        }

        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .map(|board| self.render_frame(board, frame_delay_ms))
            .collect();
        if let Some(last) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last,
                0,
                0,
                Delay::from_numer_denom_ms(frame_delay_ms * 10, 1),
            ));
        }

        if let Some(parent) = output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
        }

        let file = std::fs::File::create(output_path).with_path(output_path, "create file")?;
        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| CrosswordError::GifExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        log::info!(
            "Wrote {} frames to '{}'",
            self.frames.len(),
            output_path.display()
        );
        Ok(())
    }

    /// Draw one board as a frame, one solid square per cell
    pub fn render_frame(&self, board: &Board, delay_ms: u32) -> Frame {
        let width = self.grid.cols() as u32 * GIF_CELL_PIXELS;
        let height = self.grid.rows() as u32 * GIF_CELL_PIXELS;

        let img = RgbaImage::from_fn(width, height, |x, y| {
            let coord = ((y / GIF_CELL_PIXELS) as usize, (x / GIF_CELL_PIXELS) as usize);
            let color = match board.get(coord) {
                Some(letter) => letter_color(letter),
                None if self.grid.is_fillable(coord) => EMPTY_COLOR,
                None => BLOCKED_COLOR,
            };
            Rgba(color)
        });

        Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1))
    }
}
