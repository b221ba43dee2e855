//! The refresh-driven animation loop.

use pixelrain_core::{
    ConfigError, FillStyle, Font, RadialGradient, RainConfig, Rect, Rgba, Surface, SurfaceError,
    TextAlign,
};
use rand::Rng;

use crate::clock::{FrameClock, FrameState};
use crate::effect::Effect;
use crate::overlay::{ColumnGlow, TextOverlay};
use crate::symbol::StepContext;
use crate::tracker::IlluminationTracker;

/// Inner and outer radius of the rain gradient, in pixels.
const GRADIENT_RADII: (f32, f32) = (100.0, 200.0);

/// Owns the symbol grid, the illumination tracker and the overlay, and
/// renders a frame whenever the frame clock allows.
///
/// Call [`tick`](Self::tick) once per display refresh and
/// [`resize`](Self::resize) whenever the surface changes size.
#[derive(Debug)]
pub struct AnimationLoop<R> {
    config: RainConfig,
    charset: Vec<char>,
    effect: Effect,
    tracker: IlluminationTracker,
    overlay: Option<TextOverlay>,
    clock: FrameClock,
    rng: R,
    frames_rendered: u64,
    last_glows: Vec<ColumnGlow>,
}

impl<R: Rng> AnimationLoop<R> {
    /// Validate `config` and build the grid and overlay for `surface`.
    pub fn new<S: Surface + ?Sized>(
        config: RainConfig,
        surface: &mut S,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let overlay = config
            .overlay_enabled
            .then(|| TextOverlay::from_config(&config));
        let mut animation = Self {
            charset: config.charset_chars(),
            effect: Effect::new(surface.width(), surface.height(), config.unit_size),
            tracker: IlluminationTracker::from_config(&config),
            overlay,
            clock: FrameClock::new(config.frame_interval_ms()),
            rng,
            frames_rendered: 0,
            last_glows: Vec::new(),
            config,
        };
        if let Some(overlay) = animation.overlay.as_mut() {
            overlay.layout(surface);
        }
        Ok(animation)
    }

    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    pub fn tracker(&self) -> &IlluminationTracker {
        &self.tracker
    }

    pub fn overlay(&self) -> Option<&TextOverlay> {
        self.overlay.as_ref()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Overlay slices painted by the most recent frame.
    pub fn last_glows(&self) -> &[ColumnGlow] {
        &self.last_glows
    }

    /// Rebuild the grid and re-lay out the overlay for the surface's
    /// current size.
    pub fn resize<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        log::debug!("resize to {}x{}", surface.width(), surface.height());
        self.effect.resize(surface.width(), surface.height());
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.layout(surface);
        }
    }

    /// Advance the loop to `timestamp_ms`, rendering a frame if enough time
    /// has accumulated since the last one.
    pub fn tick<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        timestamp_ms: u64,
    ) -> Result<FrameState, SurfaceError> {
        // Never draw a grid built for another size.
        if !self.effect.matches(surface.width(), surface.height()) {
            self.resize(surface);
        }

        let state = self.clock.tick(timestamp_ms);
        if state == FrameState::Rendering {
            self.render_frame(surface, timestamp_ms)?;
        }
        Ok(state)
    }

    fn rain_fill(&self, width: f32, height: f32) -> FillStyle {
        match self.config.rain_edge_color {
            Some(edge) => FillStyle::Radial(RadialGradient {
                center: (width / 2.0, height / 2.0),
                inner_radius: GRADIENT_RADII.0,
                outer_radius: GRADIENT_RADII.1,
                inner: self.config.rain_color,
                outer: edge,
            }),
            None => FillStyle::Solid(self.config.rain_color),
        }
    }

    fn render_frame<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        now_ms: u64,
    ) -> Result<(), SurfaceError> {
        let width = surface.width();
        let height = surface.height();

        surface.fill_rect(
            Rect::new(0.0, 0.0, width, height),
            Rgba::BLACK.with_alpha(self.config.fade_alpha),
        )?;

        surface.set_shadow(None);
        surface.set_text_align(TextAlign::Center);
        surface.set_fill_style(self.rain_fill(width, height));
        surface.set_font(Font::monospace(self.config.unit_size));

        let mut ctx = StepContext {
            rng: &mut self.rng,
            tracker: &mut self.tracker,
            text_bounds: self.overlay.as_ref().and_then(TextOverlay::bounds),
            now_ms,
            surface_height: height,
            charset: &self.charset,
            respawn_probability: self.config.respawn_probability,
        };
        // Every symbol moves each frame; report the first paint failure.
        let mut symbol_error = None;
        for symbol in self.effect.symbols_mut() {
            if let Err(err) = symbol.advance(surface, &mut ctx) {
                symbol_error.get_or_insert(err);
            }
        }

        let glows = match &self.overlay {
            Some(overlay) => {
                overlay.paint(surface, &mut self.tracker, now_ms, self.config.unit_size)
            }
            None => Ok(Vec::new()),
        };
        self.frames_rendered += 1;
        if let Some(err) = symbol_error {
            return Err(err);
        }
        self.last_glows = glows?;
        Ok(())
    }
}
