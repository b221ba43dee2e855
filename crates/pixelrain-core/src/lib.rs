//! Core types for the pixelrain falling-characters effect.
//!
//! Everything here is backend-agnostic: colours, pixel geometry, the
//! [`Surface`] drawing contract, and the [`RainConfig`] settings shared by
//! the engine, the config loader and the binary.

mod color;
mod config;
mod geometry;
mod surface;

pub use color::{ParseColorError, Rgba};
pub use config::{
    ConfigError, DEFAULT_CHARSET, DEFAULT_FADE_ALPHA, DEFAULT_FULL_INTENSITY_EVENTS,
    DEFAULT_ILLUMINATION_WINDOW_MS, DEFAULT_OVERLAY_TEXT, DEFAULT_RAIN_COLOR,
    DEFAULT_RESPAWN_PROBABILITY, DEFAULT_TARGET_FPS, DEFAULT_UNIT_SIZE, RainConfig,
};
pub use geometry::{Rect, TextBounds};
pub use surface::{
    ClipScope, FillStyle, Font, RadialGradient, Shadow, Surface, SurfaceError, TextAlign,
};
