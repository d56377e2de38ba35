use serde::{Deserialize, Serialize};

/// Pixel size of the attached drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Pixel rectangle of the plotting area, exclusive of axis-label margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ContentRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    /// Returns `true` when the rectangle has a positive finite area.
    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|value| value.is_finite())
            && self.width() > 0.0
            && self.height() > 0.0
    }

    /// Grows (`dx`/`dy` > 0) or shrinks (< 0) the rectangle on every side.
    #[must_use]
    pub fn outset(self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.left - dx,
            self.top - dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Horizontal containment with one pixel of tolerance on both edges, so
    /// ticks landing exactly on a rounded edge are not dropped.
    #[must_use]
    pub fn contains_x(self, x: f64) -> bool {
        x.is_finite() && x + 1.0 >= self.left && x - 1.0 <= self.right
    }

    #[must_use]
    pub fn contains_y(self, y: f64) -> bool {
        y.is_finite() && y + 1.0 >= self.top && y - 1.0 <= self.bottom
    }
}

/// Fixed extra offsets between the surface edges and the chart area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartOffsets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ChartOffsets {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ContentRect;

    #[test]
    fn contains_x_tolerates_one_pixel_overshoot() {
        let rect = ContentRect::new(10.0, 0.0, 110.0, 50.0);
        assert!(rect.contains_x(9.2));
        assert!(rect.contains_x(110.8));
        assert!(!rect.contains_x(8.5));
        assert!(!rect.contains_x(f64::NAN));
    }

    #[test]
    fn degenerate_rect_is_invalid() {
        assert!(!ContentRect::new(10.0, 0.0, 10.0, 50.0).is_valid());
        assert!(ContentRect::new(0.0, 0.0, 1.0, 1.0).is_valid());
    }
}
