/// ASCII canvas for terminal rendering
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use donut_core::{Canvas, Stroke};
use nalgebra::Point2;
use std::io::Write;

/// Canvas pixels covered by one character cell
pub const CELL_WIDTH: f32 = 5.0;
pub const CELL_HEIGHT: f32 = 10.0;

const POINT_CHAR: char = 'o';
const EDGE_CHAR: char = '*';
const PREVIEW_CHAR: char = '.';

/// Lines running far off screen are sampled, not walked cell by cell
const MAX_LINE_STEPS: i64 = 4096;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

/// Character grid that receives the editor's draw commands
pub struct AsciiCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl AsciiCanvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols * rows],
        }
    }

    /// Canvas size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.cols as f32 * CELL_WIDTH) as u32,
            (self.rows as f32 * CELL_HEIGHT) as u32,
        )
    }

    /// Pixel position at the centre of a terminal cell
    pub fn cell_center(column: u16, row: u16) -> Point2<f32> {
        Point2::new(
            (column as f32 + 0.5) * CELL_WIDTH,
            (row as f32 + 0.5) * CELL_HEIGHT,
        )
    }

    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col].ch)
    }

    fn cell_of(&self, at: Point2<f32>) -> Option<(usize, usize)> {
        let col = (at.x / CELL_WIDTH).floor();
        let row = (at.y / CELL_HEIGHT).floor();
        if !(col >= 0.0 && row >= 0.0) || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        Some((col as usize, row as usize))
    }

    fn put(&mut self, col: usize, row: usize, ch: char, color: Color) {
        self.cells[row * self.cols + col] = Cell { ch, color };
    }

    fn plot(&mut self, col: i64, row: i64, ch: char, color: Color) {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        // Lines never cover points
        if self.cells[row * self.cols + col].ch != POINT_CHAR {
            self.put(col, row, ch, color);
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for (y, row) in self.cells.chunks(self.cols.max(1)).enumerate() {
            writer.queue(MoveTo(0, y as u16))?;
            for cell in row {
                writer.queue(SetForegroundColor(cell.color))?;
                writer.queue(Print(cell.ch))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Canvas for AsciiCanvas {
    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn draw_point(&mut self, at: Point2<f32>) {
        if let Some((col, row)) = self.cell_of(at) {
            self.put(col, row, POINT_CHAR, Color::White);
        }
    }

    fn draw_label(&mut self, at: Point2<f32>, text: &str) {
        let Some((col, row)) = self.cell_of(at) else {
            return;
        };
        for (offset, ch) in text.chars().enumerate() {
            if col + offset >= self.cols {
                break;
            }
            // Labels never cover points
            if self.cells[row * self.cols + col + offset].ch != POINT_CHAR {
                self.put(col + offset, row, ch, Color::DarkGrey);
            }
        }
    }

    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, stroke: Stroke) {
        let (ch, color) = match stroke {
            Stroke::Edge => (EDGE_CHAR, Color::Cyan),
            Stroke::Preview => (PREVIEW_CHAR, Color::Grey),
        };

        if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
            return;
        }

        // Walk the line in cell space, one step per cell on the longer axis
        let (x0, y0) = (from.x / CELL_WIDTH, from.y / CELL_HEIGHT);
        let (x1, y1) = (to.x / CELL_WIDTH, to.y / CELL_HEIGHT);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil();
        let steps = (steps as i64).clamp(1, MAX_LINE_STEPS);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.plot(x.floor() as i64, y.floor() as i64, ch, color);
        }
    }
}
