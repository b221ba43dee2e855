//! Pixel-space geometry.

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether a point lies inside, left/top edges inclusive.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap of two rectangles; an empty rectangle when they are disjoint.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Bounding box of the overlay string.
///
/// `y` is the text baseline; the illumination band extends one `height`
/// above and below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
}

impl TextBounds {
    /// Whether a pixel row falls inside `[y - height, y + height]`.
    pub fn contains_row(&self, row_y: f32) -> bool {
        row_y >= self.y - self.height && row_y <= self.y + self.height
    }

    /// Whether a column starting at `column_x` can show any of the text,
    /// allowing one column of slack on either side.
    pub fn overlaps_column(&self, column_x: f32, column_width: f32) -> bool {
        column_x >= self.x - column_width && column_x <= self.x + self.width + column_width
    }

    /// Clip rectangle for one column slice of the text.
    pub fn column_slice(&self, column_x: f32, column_width: f32) -> Rect {
        Rect::new(
            column_x,
            self.y - self.height,
            column_width,
            self.height * 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> TextBounds {
        TextBounds {
            x: 100.0,
            y: 300.0,
            width: 400.0,
            height: 60.0,
            font_size: 60.0,
        }
    }

    #[test]
    fn test_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Rect::new(5.0, 5.0, 5.0, 5.0));

        let far = Rect::new(50.0, 50.0, 1.0, 1.0);
        assert!(a.intersect(&far).is_empty());
    }

    #[test]
    fn test_contains_row_band_is_inclusive() {
        let b = bounds();
        assert!(b.contains_row(240.0));
        assert!(b.contains_row(360.0));
        assert!(b.contains_row(300.0));
        assert!(!b.contains_row(239.0));
        assert!(!b.contains_row(361.0));
    }

    #[test]
    fn test_overlaps_column_with_slack() {
        let b = bounds();
        assert!(b.overlaps_column(85.0, 15.0));
        assert!(b.overlaps_column(515.0, 15.0));
        assert!(!b.overlaps_column(84.0, 15.0));
        assert!(!b.overlaps_column(516.0, 15.0));
    }

    #[test]
    fn test_column_slice_is_centered_on_baseline() {
        let slice = bounds().column_slice(150.0, 15.0);
        assert_eq!(slice, Rect::new(150.0, 240.0, 15.0, 120.0));
    }
}
