//! RGBA colour values with alpha blending.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// An sRGB colour with a straight (non-premultiplied) alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    /// Opaque colour from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Colour from its channels and alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with a different alpha, clamped to `0.0..=1.0`.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear interpolation between two colours, `t` clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Paint `self` over an opaque `base` colour using source-over compositing.
    pub fn over(self, base: [f32; 3]) -> [f32; 3] {
        let a = self.a.clamp(0.0, 1.0);
        [
            base[0] + (self.r as f32 - base[0]) * a,
            base[1] + (self.g as f32 - base[1]) * a,
            base[2] + (self.b as f32 - base[2]) * a,
        ]
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// Error returned when a colour string is not `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid colour {:?}, expected #rrggbb or #rrggbbaa", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let a = if hex.len() == 8 {
            channel(6)? as f32 / 255.0
        } else {
            1.0
        };
        Ok(Rgba {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a,
        })
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, a)
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        c.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!("#0aff0a".parse::<Rgba>(), Ok(Rgba::rgb(10, 255, 10)));
        let c: Rgba = "#ffffff80".parse().unwrap();
        assert_eq!((c.r, c.g, c.b), (255, 255, 255));
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert!("0aff0a".parse::<Rgba>().is_err());
        assert!("#0aff".parse::<Rgba>().is_err());
        assert!("#zzzzzz".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Rgba::rgb(10, 255, 10).to_string(), "#0aff0a");
        assert_eq!(Rgba::rgba(0, 0, 0, 0.0).to_string(), "#00000000");
    }

    #[test]
    fn test_over_blends_by_alpha() {
        let out = Rgba::BLACK.with_alpha(0.05).over([200.0, 100.0, 0.0]);
        assert!((out[0] - 190.0).abs() < 1e-4);
        assert!((out[1] - 95.0).abs() < 1e-4);
        assert_eq!(out[2], 0.0);

        let opaque = Rgba::WHITE.over([0.0, 0.0, 0.0]);
        assert_eq!(opaque, [255.0, 255.0, 255.0]);
    }

    #[test]
    fn test_into_terminal_color_drops_alpha() {
        let color: Color = Rgba::rgba(10, 20, 30, 0.5).into();
        assert_eq!(color, Color::Rgb(10, 20, 30));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgba::rgb(0, 0, 0);
        let b = Rgba::rgb(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgba::rgb(100, 50, 25));
    }
}
