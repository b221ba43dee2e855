//! Glowing text overlay lit column by column by the rain.

use pixelrain_core::{
    ClipScope, FillStyle, Font, RainConfig, Rgba, Shadow, Surface, SurfaceError, TextAlign,
    TextBounds,
};

use crate::tracker::IlluminationTracker;

/// Look of the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub color: Rgba,
    pub base_alpha: f32,
    pub alpha_range: f32,
    pub glow_blur: f32,
    pub glow_alpha_factor: f32,
    pub max_font_size: f32,
    pub font_divisor: f32,
}

impl OverlayStyle {
    pub fn from_config(config: &RainConfig) -> Self {
        Self {
            color: config.overlay_color,
            base_alpha: config.overlay_base_alpha,
            alpha_range: config.overlay_alpha_range,
            glow_blur: config.glow_blur,
            glow_alpha_factor: config.glow_alpha_factor,
            max_font_size: config.overlay_max_font_size,
            font_divisor: config.overlay_font_divisor,
        }
    }

    /// Text alpha for a column intensity.
    pub fn alpha_for(&self, intensity: f32) -> f32 {
        self.base_alpha + intensity.clamp(0.0, 1.0) * self.alpha_range
    }
}

/// One painted slice of the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnGlow {
    pub column: usize,
    pub alpha: f32,
}

/// The overlay string and its layout on the current surface.
#[derive(Debug, Clone)]
pub struct TextOverlay {
    text: String,
    style: OverlayStyle,
    bounds: Option<TextBounds>,
}

impl TextOverlay {
    pub fn new(text: impl Into<String>, style: OverlayStyle) -> Self {
        Self {
            text: text.into(),
            style,
            bounds: None,
        }
    }

    pub fn from_config(config: &RainConfig) -> Self {
        Self::new(config.overlay_text.clone(), OverlayStyle::from_config(config))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Current layout, `None` until [`layout`](Self::layout) has run.
    pub fn bounds(&self) -> Option<&TextBounds> {
        self.bounds.as_ref()
    }

    fn font(&self, size: f32) -> Font {
        Font::bold_monospace(size)
    }

    /// Compute the text bounds for the surface's current size: centred
    /// horizontally, baseline a third of the font size below the middle.
    pub fn layout<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let width = surface.width();
        let height = surface.height();
        let font_size = (width / self.style.font_divisor).min(self.style.max_font_size);

        surface.save();
        surface.set_font(self.font(font_size));
        let text_width = surface.measure_text(&self.text);
        surface.restore();

        let bounds = TextBounds {
            x: (width - text_width) / 2.0,
            y: height / 2.0 + (font_size / 3.0).round(),
            width: text_width,
            height: font_size,
            font_size,
        };
        log::debug!("overlay {:?} laid out at {:?}", self.text, bounds);
        self.bounds = Some(bounds);
    }

    /// Paint a slice of the text for every recently lit column.
    ///
    /// Each slice is clipped to one column and to the band
    /// `[y - height, y + height]`, with an alpha that grows with the
    /// column's intensity. Stale events are pruned from `tracker` as a side
    /// effect. Returns the painted slices in column order; nothing is
    /// painted before the overlay has been laid out.
    pub fn paint<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        tracker: &mut IlluminationTracker,
        now_ms: u64,
        unit_size: f32,
    ) -> Result<Vec<ColumnGlow>, SurfaceError> {
        let Some(bounds) = self.bounds else {
            return Ok(Vec::new());
        };

        surface.set_font(self.font(bounds.font_size));
        surface.set_text_align(TextAlign::Left);

        let mut glows = Vec::new();
        for (column, count) in tracker.lit_columns(now_ms) {
            let alpha = self.style.alpha_for(tracker.intensity_for(count));
            let column_x = column as f32 * unit_size;
            if !bounds.overlaps_column(column_x, unit_size) {
                continue;
            }

            let mut scope = ClipScope::new(&mut *surface, bounds.column_slice(column_x, unit_size));
            scope.set_shadow(Some(Shadow {
                color: self
                    .style
                    .color
                    .with_alpha(alpha * self.style.glow_alpha_factor),
                blur: self.style.glow_blur,
            }));
            scope.set_fill_style(FillStyle::Solid(self.style.color.with_alpha(alpha)));
            scope.fill_text(&self.text, bounds.x, bounds.y)?;
            drop(scope);

            glows.push(ColumnGlow { column, alpha });
        }
        Ok(glows)
    }
}
