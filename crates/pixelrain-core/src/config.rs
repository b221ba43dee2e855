//! Tunable parameters of the falling-characters effect.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Pixel size of one character cell, also the column pitch.
pub const DEFAULT_UNIT_SIZE: f32 = 15.0;

/// Frames per second the animation aims for.
pub const DEFAULT_TARGET_FPS: f32 = 40.0;

/// How long an illumination event counts towards a column's intensity.
pub const DEFAULT_ILLUMINATION_WINDOW_MS: u64 = 300;

/// Number of recent events at which a column glows at full intensity.
pub const DEFAULT_FULL_INTENSITY_EVENTS: usize = 5;

/// Text painted over the rain.
pub const DEFAULT_OVERLAY_TEXT: &str = "LOAD OF PIXELS";

/// Alpha of the black rectangle laid over every frame (trail length).
pub const DEFAULT_FADE_ALPHA: f32 = 0.05;

/// Chance per frame that a symbol below the bottom edge restarts at the top.
pub const DEFAULT_RESPAWN_PROBABILITY: f64 = 0.02;

/// Rain colour: translucent grey, drawn over the faded trails.
pub const DEFAULT_RAIN_COLOR: Rgba = Rgba::rgba(150, 150, 150, 0.6);

/// Characters symbols pick from.
pub const DEFAULT_CHARSET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!\"£$%^&*()";

/// All settings of the effect. Missing fields in a config file fall back to
/// the defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    pub unit_size: f32,
    pub target_fps: f32,
    pub illumination_window_ms: u64,
    pub full_intensity_events: usize,
    /// Paint the glowing text overlay. The rain runs either way.
    pub overlay_enabled: bool,
    pub overlay_text: String,
    pub fade_alpha: f32,
    pub respawn_probability: f64,
    /// Overlay alpha of a lit column with zero intensity.
    pub overlay_base_alpha: f32,
    /// Extra overlay alpha at full intensity.
    pub overlay_alpha_range: f32,
    /// Glow blur radius in pixels.
    pub glow_blur: f32,
    /// Glow alpha as a fraction of the overlay alpha.
    pub glow_alpha_factor: f32,
    pub overlay_max_font_size: f32,
    /// Overlay font size is the surface width divided by this.
    pub overlay_font_divisor: f32,
    pub rain_color: Rgba,
    /// When set, rain fades from `rain_color` inside a 100 px radius around
    /// the centre to this colour beyond 200 px.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_edge_color: Option<Rgba>,
    pub overlay_color: Rgba,
    pub charset: String,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            unit_size: DEFAULT_UNIT_SIZE,
            target_fps: DEFAULT_TARGET_FPS,
            illumination_window_ms: DEFAULT_ILLUMINATION_WINDOW_MS,
            full_intensity_events: DEFAULT_FULL_INTENSITY_EVENTS,
            overlay_enabled: true,
            overlay_text: DEFAULT_OVERLAY_TEXT.to_string(),
            fade_alpha: DEFAULT_FADE_ALPHA,
            respawn_probability: DEFAULT_RESPAWN_PROBABILITY,
            overlay_base_alpha: 0.1,
            overlay_alpha_range: 0.15,
            glow_blur: 4.0,
            glow_alpha_factor: 0.3,
            overlay_max_font_size: 80.0,
            overlay_font_divisor: 12.0,
            rain_color: DEFAULT_RAIN_COLOR,
            rain_edge_color: None,
            overlay_color: Rgba::WHITE,
            charset: DEFAULT_CHARSET.to_string(),
        }
    }
}

impl RainConfig {
    /// Minimum time between two rendered frames.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.target_fps as f64
    }

    /// Characters of [`charset`](Self::charset) as a vector.
    pub fn charset_chars(&self) -> Vec<char> {
        self.charset.chars().collect()
    }

    /// Reject settings the animation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.unit_size.is_finite() && self.unit_size > 0.0) {
            return Err(ConfigError::NonPositive("unit_size"));
        }
        if !(self.target_fps.is_finite() && self.target_fps > 0.0) {
            return Err(ConfigError::NonPositive("target_fps"));
        }
        if self.illumination_window_ms == 0 {
            return Err(ConfigError::NonPositive("illumination_window_ms"));
        }
        if self.full_intensity_events == 0 {
            return Err(ConfigError::NonPositive("full_intensity_events"));
        }
        if !(self.overlay_max_font_size > 0.0) {
            return Err(ConfigError::NonPositive("overlay_max_font_size"));
        }
        if !(self.overlay_font_divisor > 0.0) {
            return Err(ConfigError::NonPositive("overlay_font_divisor"));
        }
        if !(0.0..=1.0).contains(&self.respawn_probability) {
            return Err(ConfigError::OutOfRange("respawn_probability"));
        }
        for (name, value) in [
            ("fade_alpha", self.fade_alpha),
            ("overlay_base_alpha", self.overlay_base_alpha),
            ("overlay_alpha_range", self.overlay_alpha_range),
            ("glow_alpha_factor", self.glow_alpha_factor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange(name));
            }
        }
        if self.glow_blur < 0.0 || !self.glow_blur.is_finite() {
            return Err(ConfigError::OutOfRange("glow_blur"));
        }
        if self.charset.is_empty() {
            return Err(ConfigError::EmptyCharset);
        }
        Ok(())
    }
}

/// Why a [`RainConfig`] was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The named field must be greater than zero.
    NonPositive(&'static str),
    /// The named field must lie in `0.0..=1.0` (or be non-negative for blur).
    OutOfRange(&'static str),
    EmptyCharset,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive(field) => write!(f, "{field} must be greater than zero"),
            ConfigError::OutOfRange(field) => write!(f, "{field} is out of range"),
            ConfigError::EmptyCharset => write!(f, "charset must contain at least one character"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = RainConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.frame_interval_ms(), 25.0);
        assert_eq!(cfg.rain_color.to_string(), "#96969699");
        assert_eq!(cfg.charset_chars().len(), 72);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cfg = RainConfig {
            unit_size: 0.0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NonPositive("unit_size")));

        let cfg = RainConfig {
            respawn_probability: 1.5,
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::OutOfRange("respawn_probability"))
        );

        let cfg = RainConfig {
            charset: String::new(),
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyCharset));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let cfg: RainConfig = toml::from_str(
            r##"
            target_fps = 30.0
            rain_color = "#00ff00"
            rain_edge_color = "#96969699"
            "##,
        )
        .unwrap();
        assert_eq!(cfg.target_fps, 30.0);
        assert_eq!(cfg.rain_color, Rgba::rgb(0, 255, 0));
        assert_eq!(cfg.rain_edge_color.map(|c| c.r), Some(150));
        assert_eq!(cfg.unit_size, DEFAULT_UNIT_SIZE);
        assert_eq!(cfg.overlay_text, DEFAULT_OVERLAY_TEXT);
    }
}
