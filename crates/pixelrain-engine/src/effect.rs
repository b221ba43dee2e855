//! The grid of falling symbols.

use crate::symbol::Symbol;

/// One [`Symbol`] per column of the surface.
#[derive(Debug, Clone)]
pub struct Effect {
    width: f32,
    height: f32,
    unit_size: f32,
    symbols: Vec<Symbol>,
}

/// Number of whole columns of `unit_size` that fit in `width`.
pub fn column_count(width: f32, unit_size: f32) -> usize {
    if unit_size <= 0.0 {
        return 0;
    }
    // Float-to-int casts saturate, so NaN and negative widths give zero.
    (width / unit_size).floor() as usize
}

impl Effect {
    /// Build a grid for a surface of the given pixel size.
    pub fn new(width: f32, height: f32, unit_size: f32) -> Self {
        let mut effect = Self {
            width,
            height,
            unit_size,
            symbols: Vec::new(),
        };
        effect.build();
        effect
    }

    fn build(&mut self) {
        let columns = column_count(self.width, self.unit_size);
        self.symbols = (0..columns)
            .map(|column| Symbol::new(column, self.unit_size))
            .collect();
        log::debug!(
            "built {} columns for {}x{} surface",
            columns,
            self.width,
            self.height
        );
    }

    /// Discard every symbol and rebuild for a new surface size. Falling
    /// positions are not carried over.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.build();
    }

    /// Whether the grid was built for this surface size.
    pub fn matches(&self, width: f32, height: f32) -> bool {
        self.width == width && self.height == height
    }

    pub fn column_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut [Symbol] {
        &mut self.symbols
    }
}
