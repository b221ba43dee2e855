//! The 2D drawing surface the animation paints onto.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::color::Rgba;
use crate::geometry::Rect;

/// Horizontal anchoring of text relative to the x coordinate passed to
/// [`Surface::fill_text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Monospace font selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Font size in pixels.
    pub size: f32,
    pub bold: bool,
}

impl Font {
    pub const fn monospace(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub const fn bold_monospace(size: f32) -> Self {
        Self { size, bold: true }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::monospace(10.0)
    }
}

/// Soft glow painted around text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    /// Blur radius in pixels.
    pub blur: f32,
}

/// Two-stop radial gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub center: (f32, f32),
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub inner: Rgba,
    pub outer: Rgba,
}

impl RadialGradient {
    /// Colour of the gradient at a pixel position.
    pub fn color_at(&self, x: f32, y: f32) -> Rgba {
        let dist = (x - self.center.0).hypot(y - self.center.1);
        let span = self.outer_radius - self.inner_radius;
        let t = if span <= 0.0 {
            if dist < self.inner_radius { 0.0 } else { 1.0 }
        } else {
            (dist - self.inner_radius) / span
        };
        self.inner.lerp(self.outer, t)
    }
}

/// How filled shapes and text are coloured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillStyle {
    Solid(Rgba),
    Radial(RadialGradient),
}

impl FillStyle {
    /// Resolve the style to a concrete colour at a pixel position.
    pub fn color_at(&self, x: f32, y: f32) -> Rgba {
        match self {
            FillStyle::Solid(c) => *c,
            FillStyle::Radial(g) => g.color_at(x, y),
        }
    }
}

impl Default for FillStyle {
    fn default() -> Self {
        FillStyle::Solid(Rgba::BLACK)
    }
}

/// Failure of a paint operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// A coordinate passed to a paint call was NaN or infinite.
    NonFiniteCoordinate,
    /// Backend-specific failure.
    Backend(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::NonFiniteCoordinate => write!(f, "non-finite coordinate"),
            SurfaceError::Backend(msg) => write!(f, "surface backend error: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A 2D drawing context.
///
/// Style setters and [`clip`](Surface::clip) change the current drawing
/// state; [`save`](Surface::save) pushes that state and
/// [`restore`](Surface::restore) pops it, undoing every change made since.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> f32;

    /// Height in pixels.
    fn height(&self) -> f32;

    fn set_fill_style(&mut self, style: FillStyle);

    fn set_font(&mut self, font: Font);

    fn set_text_align(&mut self, align: TextAlign);

    fn set_shadow(&mut self, shadow: Option<Shadow>);

    /// Fill a rectangle, alpha-blending `color` over what is already there.
    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<(), SurfaceError>;

    /// Draw `text` with the current fill style, font, alignment and shadow.
    /// `y` is the baseline.
    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<(), SurfaceError>;

    /// Advance width of `text` in the current font.
    fn measure_text(&self, text: &str) -> f32;

    fn save(&mut self);

    /// Intersect the current clip region with `rect`.
    fn clip(&mut self, rect: Rect);

    /// Pop the state pushed by the matching [`save`](Surface::save).
    /// A restore without a matching save does nothing.
    fn restore(&mut self);
}

/// A clipped drawing scope.
///
/// Creating the scope saves the surface state and clips to a rectangle;
/// dropping it restores the state, whichever way the scope is left.
pub struct ClipScope<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> ClipScope<'a, S> {
    pub fn new(surface: &'a mut S, rect: Rect) -> Self {
        surface.save();
        surface.clip(rect);
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for ClipScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for ClipScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for ClipScope<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
