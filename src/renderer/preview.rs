//! Terminal preview renderer.
//!
//! A [`PlatformRenderer`] that paints each [`HeaderFrame`] as a block of
//! colored terminal cells. Useful for demos and for eyeballing RTL mirroring
//! without a real platform view layer.
//!
//! One cell covers [`POINTS_PER_COLUMN`] x [`POINTS_PER_ROW`] points. Element
//! opacity is approximated by blending the element color into the header
//! background. Text whose first strong character is right-to-left is written
//! in reversed (visual) order; mixed-direction runs are not reordered.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

use crate::chrome::ChromeElement;
use crate::layout::{grapheme_units, text_units};
use crate::pipeline::{HeaderFrame, PlatformRenderer};
use crate::types::Rgba;

pub const POINTS_PER_COLUMN: f32 = 8.0;
pub const POINTS_PER_ROW: f32 = 16.0;

/// Upper bound on grid columns and rows.
pub const MAX_GRID_CELLS: usize = u16::MAX as usize;

/// Back chevron in LTR. Mirrored it points the other way.
const CHEVRON: &str = "‹";
const CHEVRON_MIRRORED: &str = "›";

/// Placeholder for the second column of a wide grapheme.
const CONTINUATION: &str = "";

// =============================================================================
// Cell grid
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// One grapheme cluster, empty in the trailing column of a wide one.
    pub symbol: String,
    pub fg: Rgba,
    pub bg: Rgba,
}

/// A rasterized header frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewGrid {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl PreviewGrid {
    fn new(columns: usize, rows: usize, bg: Rgba) -> Self {
        Self {
            columns,
            rows,
            cells: vec![
                Cell {
                    symbol: " ".to_string(),
                    fg: bg,
                    bg,
                };
                columns * rows
            ],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Cell> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.columns + column)
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = (row * self.columns).min(self.cells.len());
        let end = (start + self.columns).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Visible characters of one row, trailing blanks trimmed.
    pub fn row_text(&self, row: usize) -> String {
        let text: String = self.row(row).iter().map(|cell| cell.symbol.as_str()).collect();
        text.trim_end().to_string()
    }

    fn put(&mut self, column: i32, row: i32, symbol: &str, fg: Rgba) {
        if column < 0 || row < 0 {
            return;
        }
        let (column, row) = (column as usize, row as usize);
        if column >= self.columns || row >= self.rows {
            return;
        }
        let cell = &mut self.cells[row * self.columns + column];
        cell.symbol.clear();
        cell.symbol.push_str(symbol);
        cell.fg = fg;
    }

    /// Write `text` starting at `column`. Returns the column after it.
    fn put_str(&mut self, column: i32, row: i32, text: &str, fg: Rgba) -> i32 {
        let mut x = column;
        for grapheme in visual_order(text).graphemes(true) {
            match grapheme_units(grapheme) {
                0 => continue,
                2 => {
                    self.put(x, row, grapheme, fg);
                    self.put(x + 1, row, CONTINUATION, fg);
                    x += 2;
                }
                _ => {
                    self.put(x, row, grapheme, fg);
                    x += 1;
                }
            }
        }
        x
    }
}

fn is_rtl_char(c: char) -> bool {
    matches!(c as u32,
        0x0590..=0x08FF     // Hebrew, Arabic, Syriac, Thaana, NKo, Samaritan
        | 0xFB1D..=0xFDFF   // Hebrew + Arabic presentation forms A
        | 0xFE70..=0xFEFF)  // Arabic presentation forms B
}

/// Reverse strings that start right-to-left so they read correctly when
/// written cell by cell from the left. Marks stay after their base letter.
fn visual_order(text: &str) -> String {
    let first_strong = text.chars().find(|c| c.is_alphabetic());
    match first_strong {
        Some(c) if is_rtl_char(c) => text.graphemes(true).rev().collect(),
        _ => text.to_string(),
    }
}

fn to_cells(points: f32, per_cell: f32) -> i32 {
    (points / per_cell).round() as i32
}

fn blend(element: &ChromeElement, bg: Rgba) -> Rgba {
    Rgba::lerp(bg, element.color, element.opacity)
}

fn draw_text(grid: &mut PreviewGrid, element: &ChromeElement, bg: Rgba) {
    if !element.is_visible() || element.lines.is_empty() {
        return;
    }
    let fg = blend(element, bg);
    let line_height = element.frame.height / element.lines.len() as f32;
    for (i, line) in element.lines.iter().enumerate() {
        let center_y = element.frame.y + line_height * (i as f32 + 0.5);
        let row = (center_y / POINTS_PER_ROW).floor() as i32;
        grid.put_str(to_cells(element.frame.x, POINTS_PER_COLUMN), row, line, fg);
    }
}

fn draw_back_button(grid: &mut PreviewGrid, back: &ChromeElement, bg: Rgba) {
    let fg = blend(back, bg);
    let row = ((back.frame.y + back.frame.height / 2.0) / POINTS_PER_ROW).floor() as i32;
    let label = back.lines.first().map(String::as_str).unwrap_or_default();

    if back.mirrored_glyph {
        // Chevron on the right, label running leftwards from it
        let chevron = to_cells(back.frame.right(), POINTS_PER_COLUMN) - 1;
        grid.put(chevron, row, CHEVRON_MIRRORED, fg);
        if !label.is_empty() {
            grid.put_str(chevron - 1 - text_units(label) as i32, row, label, fg);
        }
    } else {
        let chevron = to_cells(back.frame.x, POINTS_PER_COLUMN);
        grid.put(chevron, row, CHEVRON, fg);
        if !label.is_empty() {
            grid.put_str(chevron + 2, row, label, fg);
        }
    }
}

fn cells_for(points: f32, per_cell: f32) -> usize {
    ((points / per_cell).ceil().max(0.0) as usize).min(MAX_GRID_CELLS)
}

/// Rasterize a frame into terminal cells. Each axis is capped at
/// [`MAX_GRID_CELLS`]; anything past it is clipped.
pub fn rasterize(frame: &HeaderFrame) -> PreviewGrid {
    let chrome = &frame.chrome;
    let bg = chrome.background.color;
    let columns = cells_for(chrome.background.frame.width, POINTS_PER_COLUMN);
    let rows = cells_for(chrome.height(), POINTS_PER_ROW);

    let mut grid = PreviewGrid::new(columns, rows, bg);
    draw_text(&mut grid, &chrome.large_title, bg);
    if let Some(compact) = &chrome.compact_title {
        draw_text(&mut grid, compact, bg);
    }
    if let Some(back) = &chrome.back_button {
        draw_back_button(&mut grid, back, bg);
    }
    grid
}

// =============================================================================
// TerminalPreview
// =============================================================================

fn color(c: Rgba) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

/// Writes rasterized frames to any `Write` sink, one block per frame.
pub struct TerminalPreview<W: Write> {
    out: W,
    frames: u64,
    last_error: Option<io::Error>,
}

impl TerminalPreview<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPreview<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frames: 0,
            last_error: None,
        }
    }

    /// Frames written successfully.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The most recent write error, if any. Presenting never fails.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.last_error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, frame: &HeaderFrame) -> io::Result<()> {
        let grid = rasterize(frame);
        queue!(
            self.out,
            Print(format!(
                "[{} p={:.2} cfg={} tick={}]\r\n",
                frame.chrome.direction,
                frame.progress.value(),
                frame.config_version,
                frame.progress_version
            ))
        )?;

        for row in 0..grid.rows() {
            for cell in grid.row(row) {
                if cell.symbol.is_empty() {
                    continue;
                }
                queue!(
                    self.out,
                    SetForegroundColor(color(cell.fg)),
                    SetBackgroundColor(color(cell.bg)),
                    Print(&cell.symbol)
                )?;
            }
            queue!(self.out, ResetColor, Print("\r\n"))?;
        }
        self.out.flush()
    }
}

impl<W: Write> PlatformRenderer for TerminalPreview<W> {
    fn present(&mut self, frame: &HeaderFrame) {
        match self.write_frame(frame) {
            Ok(()) => self.frames += 1,
            Err(err) => {
                warn!(error = %err, "preview write failed");
                self.last_error = Some(err);
            }
        }
    }
}
