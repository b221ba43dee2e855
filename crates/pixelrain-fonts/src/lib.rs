//! Block-letter font for the pixelrain text overlay.
//!
//! Every glyph is [`GLYPH_HEIGHT`] lines tall and [`GLYPH_WIDTH`] cells wide,
//! except the space which is [`SPACE_WIDTH`] wide.

/// Rows per glyph.
pub const GLYPH_HEIGHT: usize = 5;

/// Cells per glyph.
pub const GLYPH_WIDTH: usize = 5;

/// Cells taken by a space.
pub const SPACE_WIDTH: usize = 3;

/// Blank cells between two glyphs.
pub const GLYPH_SPACING: usize = 1;

/// Letters A-Z (5 lines tall, 5 chars wide)
pub const LETTERS: [[&str; GLYPH_HEIGHT]; 26] = [
    // A
    [" ███ ", "█   █", "█████", "█   █", "█   █"],
    // B
    ["████ ", "█   █", "████ ", "█   █", "████ "],
    // C
    [" ████", "█    ", "█    ", "█    ", " ████"],
    // D
    ["████ ", "█   █", "█   █", "█   █", "████ "],
    // E
    ["█████", "█    ", "████ ", "█    ", "█████"],
    // F
    ["█████", "█    ", "████ ", "█    ", "█    "],
    // G
    [" ████", "█    ", "█  ██", "█   █", " ████"],
    // H
    ["█   █", "█   █", "█████", "█   █", "█   █"],
    // I
    ["█████", "  █  ", "  █  ", "  █  ", "█████"],
    // J
    ["█████", "   █ ", "   █ ", "█  █ ", " ██  "],
    // K
    ["█   █", "█  █ ", "███  ", "█  █ ", "█   █"],
    // L
    ["█    ", "█    ", "█    ", "█    ", "█████"],
    // M
    ["█   █", "██ ██", "█ █ █", "█   █", "█   █"],
    // N
    ["█   █", "██  █", "█ █ █", "█  ██", "█   █"],
    // O
    [" ███ ", "█   █", "█   █", "█   █", " ███ "],
    // P
    ["████ ", "█   █", "████ ", "█    ", "█    "],
    // Q
    [" ███ ", "█   █", "█ █ █", "█  █ ", " ██ █"],
    // R
    ["████ ", "█   █", "████ ", "█  █ ", "█   █"],
    // S
    [" ████", "█    ", " ███ ", "    █", "████ "],
    // T
    ["█████", "  █  ", "  █  ", "  █  ", "  █  "],
    // U
    ["█   █", "█   █", "█   █", "█   █", " ███ "],
    // V
    ["█   █", "█   █", "█   █", " █ █ ", "  █  "],
    // W
    ["█   █", "█   █", "█ █ █", "██ ██", "█   █"],
    // X
    ["█   █", " █ █ ", "  █  ", " █ █ ", "█   █"],
    // Y
    ["█   █", " █ █ ", "  █  ", "  █  ", "  █  "],
    // Z
    ["█████", "   █ ", "  █  ", " █   ", "█████"],
];

/// Digits 0-9 (5 lines tall, 5 chars wide)
pub const DIGITS: [[&str; GLYPH_HEIGHT]; 10] = [
    // 0
    [" ███ ", "█  ██", "█ █ █", "██  █", " ███ "],
    // 1
    ["  █  ", " ██  ", "  █  ", "  █  ", " ███ "],
    // 2
    ["████ ", "    █", " ███ ", "█    ", "█████"],
    // 3
    ["████ ", "    █", " ███ ", "    █", "████ "],
    // 4
    ["█   █", "█   █", "█████", "    █", "    █"],
    // 5
    ["█████", "█    ", "████ ", "    █", "████ "],
    // 6
    [" ███ ", "█    ", "████ ", "█   █", " ███ "],
    // 7
    ["█████", "    █", "   █ ", "  █  ", "  █  "],
    // 8
    [" ███ ", "█   █", " ███ ", "█   █", " ███ "],
    // 9
    [" ███ ", "█   █", " ████", "    █", " ███ "],
];

/// Exclamation mark
pub const EXCLAMATION: [&str; GLYPH_HEIGHT] = ["  █  ", "  █  ", "  █  ", "     ", "  █  "];

/// Full stop
pub const PERIOD: [&str; GLYPH_HEIGHT] = ["     ", "     ", "     ", "     ", "  █  "];

/// Hyphen
pub const HYPHEN: [&str; GLYPH_HEIGHT] = ["     ", "     ", " ███ ", "     ", "     "];

const SPACE: [&str; GLYPH_HEIGHT] = ["   "; GLYPH_HEIGHT];

const BLANK: [&str; GLYPH_HEIGHT] = ["     "; GLYPH_HEIGHT];

/// Look up the glyph for a character. Lowercase letters use the uppercase
/// glyph; characters without a glyph render blank.
pub fn glyph(ch: char) -> &'static [&'static str; GLYPH_HEIGHT] {
    match ch.to_ascii_uppercase() {
        c @ 'A'..='Z' => &LETTERS[(c as u8 - b'A') as usize],
        c @ '0'..='9' => &DIGITS[(c as u8 - b'0') as usize],
        ' ' => &SPACE,
        '!' => &EXCLAMATION,
        '.' => &PERIOD,
        '-' => &HYPHEN,
        _ => &BLANK,
    }
}

/// Width in cells of the art [`build_text_art`] produces for `text`.
pub fn text_art_width(text: &str) -> usize {
    let glyphs: usize = text
        .chars()
        .map(|ch| if ch == ' ' { SPACE_WIDTH } else { GLYPH_WIDTH })
        .sum();
    let gaps = text.chars().count().saturating_sub(1) * GLYPH_SPACING;
    glyphs + gaps
}

/// Build block-letter art for a string.
///
/// # Returns
/// A vector of [`GLYPH_HEIGHT`] strings, one per line, each
/// [`text_art_width`] characters long.
pub fn build_text_art(text: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(GLYPH_HEIGHT);

    for row in 0..GLYPH_HEIGHT {
        let mut line = String::new();
        for (i, ch) in text.chars().enumerate() {
            if i > 0 {
                line.push_str(&" ".repeat(GLYPH_SPACING));
            }
            line.push_str(glyph(ch)[row]);
        }
        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_dimensions() {
        for g in LETTERS.iter().chain(DIGITS.iter()) {
            for line in g {
                assert_eq!(line.chars().count(), GLYPH_WIDTH, "{g:?}");
            }
        }
        for g in [EXCLAMATION, PERIOD, HYPHEN] {
            for line in g {
                assert_eq!(line.chars().count(), GLYPH_WIDTH);
            }
        }
    }

    #[test]
    fn test_text_art_width_matches_lines() {
        for text in ["LOAD OF PIXELS", "a", "", "Hi 42!", "£$"] {
            let art = build_text_art(text);
            assert_eq!(art.len(), GLYPH_HEIGHT);
            for line in &art {
                assert_eq!(line.chars().count(), text_art_width(text), "{text:?}");
            }
        }
    }

    #[test]
    fn test_lowercase_folds_to_uppercase() {
        assert_eq!(build_text_art("pixel"), build_text_art("PIXEL"));
    }

    #[test]
    fn test_overlay_text_width() {
        // 12 letters, 2 spaces, 13 gaps
        assert_eq!(text_art_width("LOAD OF PIXELS"), 12 * 5 + 2 * 3 + 13);
    }
}
