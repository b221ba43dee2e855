//! Colour helpers for the cell canvas.

use pixelrain_core::Rgba;
use ratatui::style::Color;

/// Channel value below which a cell is considered faded out.
pub const VISIBILITY_FLOOR: f32 = 24.0;

/// Convert a blended cell colour to a terminal colour.
pub fn rgb_to_color(rgb: [f32; 3]) -> Color {
    let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    Rgba::rgb(channel(rgb[0]), channel(rgb[1]), channel(rgb[2])).into()
}

/// Whether a cell colour is still bright enough to be drawn.
pub fn is_visible(rgb: [f32; 3]) -> bool {
    rgb.iter().any(|&c| c >= VISIBILITY_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_color_rounds_and_clamps() {
        assert_eq!(rgb_to_color([10.4, 254.6, -3.0]), Color::Rgb(10, 255, 0));
        assert_eq!(rgb_to_color([300.0, 0.0, 0.0]), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_visibility_floor() {
        assert!(is_visible([0.0, VISIBILITY_FLOOR, 0.0]));
        assert!(!is_visible([23.9, 10.0, 0.0]));
    }
}
