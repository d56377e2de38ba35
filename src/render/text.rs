//! Text measurement used by viewport layout and edge-label clamping.

/// Pixel extent of one rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

impl TextMetrics {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Measures label strings in the same pixel space the renderer draws into.
///
/// Implementations must return zero width for an empty string.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextMetrics;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font_size_px: f64) -> TextMetrics {
        (**self).measure(text, font_size_px)
    }
}

/// Deterministic per-glyph width table for headless layout and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::new(0.0, font_size_px);
        }
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                _ => 0.58,
            }
        });
        TextMetrics::new(units * font_size_px, font_size_px)
    }
}

#[cfg(test)]
mod tests {
    use super::{EstimatedTextMeasurer, TextMeasurer};

    #[test]
    fn empty_text_has_zero_width() {
        assert_eq!(EstimatedTextMeasurer.measure("", 12.0).width, 0.0);
    }

    #[test]
    fn wider_strings_measure_wider() {
        let short = EstimatedTextMeasurer.measure("10", 10.0).width;
        let long = EstimatedTextMeasurer.measure("10.25", 10.0).width;
        assert!(long > short);
    }
}
