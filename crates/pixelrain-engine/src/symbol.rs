//! A single falling character stream.

use pixelrain_core::{Surface, SurfaceError, TextBounds};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::tracker::IlluminationTracker;

/// Shared inputs for advancing every symbol of one frame.
pub struct StepContext<'a, R: Rng + ?Sized> {
    pub rng: &'a mut R,
    pub tracker: &'a mut IlluminationTracker,
    /// Overlay bounds; `None` until the overlay has been laid out, or when
    /// it is disabled.
    pub text_bounds: Option<&'a TextBounds>,
    /// Frame timestamp in milliseconds.
    pub now_ms: u64,
    pub surface_height: f32,
    pub charset: &'a [char],
    pub respawn_probability: f64,
}

/// Head of one column of rain.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// Column index.
    column: usize,
    /// Row in units; `row * unit_size` is the pixel y of the baseline.
    row: u32,
    /// Glyph drawn last frame.
    glyph: char,
    unit_size: f32,
}

impl Symbol {
    pub fn new(column: usize, unit_size: f32) -> Self {
        Self {
            column,
            row: 0,
            glyph: ' ',
            unit_size,
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    /// Pixel x of the column.
    pub fn x(&self) -> f32 {
        self.column as f32 * self.unit_size
    }

    /// Pixel y of the current row.
    pub fn y(&self) -> f32 {
        self.row as f32 * self.unit_size
    }

    /// Draw one frame of this symbol and move it down.
    ///
    /// Picks a new glyph, records an illumination event when the symbol is
    /// inside the overlay band, paints the glyph with the surface's current
    /// style, then either respawns at the top (only once below the bottom
    /// edge, and only with `respawn_probability`) or moves down one row.
    /// The symbol moves even when painting fails.
    pub fn advance<S, R>(
        &mut self,
        surface: &mut S,
        ctx: &mut StepContext<'_, R>,
    ) -> Result<(), SurfaceError>
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        self.glyph = ctx.charset.choose(ctx.rng).copied().unwrap_or(' ');

        let y = self.y();
        if let Some(bounds) = ctx.text_bounds
            && bounds.contains_row(y)
        {
            ctx.tracker.record(self.column, ctx.now_ms);
        }

        let mut buf = [0u8; 4];
        let painted = surface.fill_text(self.glyph.encode_utf8(&mut buf), self.x(), y);

        if y > ctx.surface_height && ctx.rng.random_bool(ctx.respawn_probability) {
            self.row = 0;
        } else {
            self.row = self.row.saturating_add(1);
        }

        painted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Op, RecordingSurface};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const CHARSET: &[char] = &['A', 'B', 'C'];

    struct Fixture {
        rng: StdRng,
        tracker: IlluminationTracker,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                rng: StdRng::seed_from_u64(7),
                tracker: IlluminationTracker::new(300, 5),
            }
        }

        fn ctx<'a>(
            &'a mut self,
            bounds: Option<&'a TextBounds>,
            now_ms: u64,
            respawn_probability: f64,
        ) -> StepContext<'a, StdRng> {
            StepContext {
                rng: &mut self.rng,
                tracker: &mut self.tracker,
                text_bounds: bounds,
                now_ms,
                surface_height: 60.0,
                charset: CHARSET,
                respawn_probability,
            }
        }
    }

    #[test]
    fn test_advance_paints_at_pixel_position_and_moves_down() {
        let mut fx = Fixture::new();
        let mut surface = RecordingSurface::new(150.0, 60.0);
        let mut symbol = Symbol::new(4, 15.0);
        symbol.row = 2;

        symbol.advance(&mut surface, &mut fx.ctx(None, 0, 0.0)).unwrap();

        assert_eq!(symbol.row(), 3);
        assert!(CHARSET.contains(&symbol.glyph()));
        match &surface.ops[..] {
            [Op::FillText { text, x, y, .. }] => {
                assert_eq!(text, &symbol.glyph().to_string());
                assert_eq!(*x, 60.0);
                assert_eq!(*y, 30.0);
            }
            other => panic!("unexpected ops {other:?}"),
        }
    }

    #[test]
    fn test_glyph_changes_come_from_charset() {
        let mut fx = Fixture::new();
        let mut surface = RecordingSurface::new(150.0, 60.0);
        let mut symbol = Symbol::new(0, 15.0);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            symbol.advance(&mut surface, &mut fx.ctx(None, 0, 0.0)).unwrap();
            seen.insert(symbol.glyph());
        }
        assert!(seen.iter().all(|c| CHARSET.contains(c)));
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_records_illumination_inside_band_only() {
        let bounds = TextBounds {
            x: 0.0,
            y: 45.0,
            width: 100.0,
            height: 15.0,
            font_size: 15.0,
        };
        let mut fx = Fixture::new();
        let mut surface = RecordingSurface::new(150.0, 600.0);
        let mut symbol = Symbol::new(2, 15.0);

        // Rows 0..=5 are y = 0, 15, 30, 45, 60, 75; band is [30, 60].
        for frame in 0..6u64 {
            symbol
                .advance(&mut surface, &mut fx.ctx(Some(&bounds), frame * 10, 0.0))
                .unwrap();
        }
        assert_eq!(fx.tracker.recent_count(2, 50), 3);
        assert_eq!(fx.tracker.recent_count(1, 50), 0);
    }

    #[test]
    fn test_no_bounds_means_no_illumination() {
        let mut fx = Fixture::new();
        let mut surface = RecordingSurface::new(150.0, 60.0);
        let mut symbol = Symbol::new(1, 15.0);
        for _ in 0..10 {
            symbol.advance(&mut surface, &mut fx.ctx(None, 0, 0.0)).unwrap();
        }
        assert_eq!(fx.tracker.stored_events(), 0);
    }

    #[test]
    fn test_resets_only_past_bottom_edge() {
        let mut fx = Fixture::new();
        let mut surface = RecordingSurface::new(150.0, 60.0);
        let mut symbol = Symbol::new(0, 15.0);

        // Certain respawn: rows climb to height / unit + 1 and then wrap.
        let mut max_row = 0;
        for _ in 0..20 {
            symbol.advance(&mut surface, &mut fx.ctx(None, 0, 1.0)).unwrap();
            max_row = max_row.max(symbol.row());
        }
        assert_eq!(max_row, 5);

        // Never respawn: keeps falling.
        let mut symbol = Symbol::new(0, 15.0);
        for _ in 0..20 {
            symbol.advance(&mut surface, &mut fx.ctx(None, 0, 0.0)).unwrap();
        }
        assert_eq!(symbol.row(), 20);
    }

    #[test]
    fn test_moves_even_when_paint_fails() {
        let mut fx = Fixture::new();
        let mut surface = RecordingSurface::new(150.0, 60.0);
        surface.fail_text = Some(String::new());
        let mut symbol = Symbol::new(0, 15.0);

        let result = symbol.advance(&mut surface, &mut fx.ctx(None, 0, 0.0));
        assert!(result.is_err());
        assert_eq!(symbol.row(), 1);
    }
}
