//! A [`Surface`] that rasterises onto a grid of terminal cells.
//!
//! One cell covers `cell_px × cell_px` surface pixels. Colours are blended
//! per cell, so a translucent black fill dims everything a little each frame
//! and leaves trails behind the falling symbols.

use std::collections::HashSet;

use pixelrain_core::{FillStyle, Font, Rect, Rgba, Shadow, Surface, SurfaceError, TextAlign};
use pixelrain_fonts::{GLYPH_HEIGHT, build_text_art, text_art_width};
use ratatui::{
    Frame,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::color::{is_visible, rgb_to_color};

/// Character used for block-letter pixels.
const BLOCK_CHAR: char = '█';

/// Font size, in cells, above which text switches to block letters.
const BLOCK_FONT_MIN_CELLS: f32 = 1.5;

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub rgb: [f32; 3],
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        rgb: [0.0; 3],
    };

    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

#[derive(Debug, Clone)]
struct DrawState {
    fill: FillStyle,
    font: Font,
    align: TextAlign,
    shadow: Option<Shadow>,
    clip: Rect,
}

/// Terminal-cell drawing surface.
#[derive(Debug, Clone)]
pub struct CellCanvas {
    cols: u16,
    rows: u16,
    cell_px: f32,
    cells: Vec<Cell>,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl CellCanvas {
    pub fn new(cols: u16, rows: u16, cell_px: f32) -> Self {
        let mut canvas = Self {
            cols: 0,
            rows: 0,
            cell_px,
            cells: Vec::new(),
            state: DrawState {
                fill: FillStyle::default(),
                font: Font::monospace(cell_px),
                align: TextAlign::Left,
                shadow: None,
                clip: Rect::new(0.0, 0.0, 0.0, 0.0),
            },
            stack: Vec::new(),
        };
        canvas.resize(cols, rows);
        canvas
    }

    /// Reallocate for a new terminal size. Content and saved states are
    /// discarded.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::BLANK; cols as usize * rows as usize];
        self.stack.clear();
        self.state.clip = self.full_rect();
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell(&self, col: i32, row: i32) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    /// Characters of one row, for inspection.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols as i32)
            .filter_map(|col| self.cell(col, row as i32))
            .map(|cell| cell.ch)
            .collect()
    }

    fn full_rect(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.cols as f32 * self.cell_px,
            self.rows as f32 * self.cell_px,
        )
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    /// Whether the centre of a cell lies inside the active clip.
    fn clip_allows(&self, col: i32, row: i32) -> bool {
        let half = self.cell_px / 2.0;
        self.state.clip.contains(
            col as f32 * self.cell_px + half,
            row as f32 * self.cell_px + half,
        )
    }

    /// Blend `color` into a cell; `glyph` replaces its character when given.
    fn blend(&mut self, col: i32, row: i32, color: Rgba, glyph: Option<char>) -> bool {
        if !self.clip_allows(col, row) {
            return false;
        }
        let Some(i) = self.index(col, row) else {
            return false;
        };
        let cell = &mut self.cells[i];
        cell.rgb = color.over(cell.rgb);
        if let Some(ch) = glyph {
            cell.ch = ch;
        }
        if !is_visible(cell.rgb) {
            *cell = Cell::BLANK;
        }
        true
    }

    /// Fonts up to one and a half cells print one glyph per cell; anything
    /// larger renders with the block-letter face.
    fn uses_block_font(&self) -> bool {
        self.state.font.size > BLOCK_FONT_MIN_CELLS * self.cell_px
    }

    /// Cell column holding a glyph whose left edge is at pixel `x`.
    fn col_at(&self, x: f32) -> i32 {
        (x / self.cell_px + 0.5).floor() as i32
    }

    /// Lay `text` out as `(col, row, char)` triples with the current font.
    fn layout_text(&self, text: &str, x: f32, y: f32) -> Vec<(i32, i32, char)> {
        let width = self.measure_text(text);
        let left = match self.state.align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
        };
        let first_col = self.col_at(left);

        if self.uses_block_font() {
            // Bottom art row sits in the cell just above the baseline.
            let bottom = ((y - self.cell_px / 2.0) / self.cell_px).floor() as i32;
            let top = bottom - (GLYPH_HEIGHT as i32 - 1);
            build_text_art(text)
                .iter()
                .enumerate()
                .flat_map(|(r, line)| {
                    line.chars()
                        .enumerate()
                        .filter(|(_, ch)| *ch != ' ')
                        .map(move |(c, _)| (first_col + c as i32, top + r as i32, BLOCK_CHAR))
                })
                .collect()
        } else {
            // Single row: the cell containing the glyph's vertical middle.
            let row = ((y - self.state.font.size / 2.0) / self.cell_px).floor() as i32;
            text.chars()
                .enumerate()
                .filter(|(_, ch)| !ch.is_whitespace())
                .map(|(c, ch)| (first_col + c as i32, row, ch))
                .collect()
        }
    }

    fn paint_shadow(&mut self, shadow: Shadow, painted: &HashSet<(i32, i32)>) {
        if shadow.blur <= 0.0 || shadow.color.a <= 0.0 {
            return;
        }
        let radius = (shadow.blur / self.cell_px).ceil() as i32;
        let mut halo = HashSet::new();
        for &(col, row) in painted {
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let cell = (col + dx, row + dy);
                    if !painted.contains(&cell) {
                        halo.insert(cell);
                    }
                }
            }
        }
        for (col, row) in halo {
            self.blend(col, row, shadow.color, None);
        }
    }

    /// Draw the grid into a frame.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let lines: Vec<Line> = (0..self.rows as i32)
            .map(|row| {
                let spans: Vec<Span> = (0..self.cols as i32)
                    .filter_map(|col| self.cell(col, row))
                    .map(|cell| {
                        if cell.is_blank() {
                            Span::raw(" ")
                        } else {
                            Span::styled(
                                cell.ch.to_string(),
                                Style::new().fg(rgb_to_color(cell.rgb)),
                            )
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn check_finite(values: &[f32]) -> Result<(), SurfaceError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SurfaceError::NonFiniteCoordinate)
    }
}

impl Surface for CellCanvas {
    fn width(&self) -> f32 {
        self.cols as f32 * self.cell_px
    }

    fn height(&self) -> f32 {
        self.rows as f32 * self.cell_px
    }

    fn set_fill_style(&mut self, style: FillStyle) {
        self.state.fill = style;
    }

    fn set_font(&mut self, font: Font) {
        self.state.font = font;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.state.shadow = shadow;
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<(), SurfaceError> {
        check_finite(&[rect.x, rect.y, rect.width, rect.height])?;
        let area = rect.intersect(&self.state.clip);
        if area.is_empty() || color.a <= 0.0 {
            return Ok(());
        }
        let first_col = (area.x / self.cell_px).floor() as i32;
        let last_col = (area.right() / self.cell_px).ceil() as i32;
        let first_row = (area.y / self.cell_px).floor() as i32;
        let last_row = (area.bottom() / self.cell_px).ceil() as i32;
        for row in first_row..last_row {
            for col in first_col..last_col {
                let half = self.cell_px / 2.0;
                let (cx, cy) = (
                    col as f32 * self.cell_px + half,
                    row as f32 * self.cell_px + half,
                );
                if rect.contains(cx, cy) {
                    self.blend(col, row, color, None);
                }
            }
        }
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<(), SurfaceError> {
        check_finite(&[x, y])?;
        let color = self.state.fill.color_at(x, y);
        if color.a <= 0.0 {
            return Ok(());
        }

        let mut painted = HashSet::new();
        for (col, row, ch) in self.layout_text(text, x, y) {
            if self.blend(col, row, color, Some(ch)) {
                painted.insert((col, row));
            }
        }
        if let Some(shadow) = self.state.shadow {
            self.paint_shadow(shadow, &painted);
        }
        Ok(())
    }

    fn measure_text(&self, text: &str) -> f32 {
        let cells = if self.uses_block_font() {
            text_art_width(text)
        } else {
            text.chars().count()
        };
        cells as f32 * self.cell_px
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn clip(&mut self, rect: Rect) {
        self.state.clip = self.state.clip.intersect(&rect);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }
}
