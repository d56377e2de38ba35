use crate::core::types::ContentRect;
use crate::error::{ChartError, ChartResult};

/// Pixel interval a domain is mapped onto.
///
/// `start` receives the domain minimum and `end` the maximum, so a regular
/// (upward) Y axis uses `start = bottom, end = top`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSpan {
    pub start: f64,
    pub end: f64,
}

impl PixelSpan {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn horizontal(rect: ContentRect) -> Self {
        Self::new(rect.left, rect.right)
    }

    #[must_use]
    pub fn vertical(rect: ContentRect, inverted: bool) -> Self {
        if inverted {
            Self::new(rect.top, rect.bottom)
        } else {
            Self::new(rect.bottom, rect.top)
        }
    }

    fn is_valid(self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start != self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, span: PixelSpan) -> ChartResult<f64> {
        if !span.is_valid() {
            return Err(ChartError::InvalidData(
                "pixel span must be finite and non-zero".to_owned(),
            ));
        }
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(span.start + normalized * (span.end - span.start))
    }

    pub fn pixel_to_domain(self, pixel: f64, span: PixelSpan) -> ChartResult<f64> {
        if !span.is_valid() {
            return Err(ChartError::InvalidData(
                "pixel span must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - span.start) / (span.end - span.start);
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Projects `values` into `out`, reusing its allocation.
    pub fn project_into(self, values: &[f64], span: PixelSpan, out: &mut Vec<f64>) -> ChartResult<()> {
        out.clear();
        out.reserve(values.len());
        for value in values {
            out.push(self.domain_to_pixel(*value, span)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, PixelSpan};
    use crate::core::ContentRect;

    #[test]
    fn upward_vertical_span_maps_minimum_to_bottom() {
        let rect = ContentRect::new(0.0, 10.0, 100.0, 110.0);
        let scale = LinearScale::new(0.0, 50.0).expect("valid scale");
        let span = PixelSpan::vertical(rect, false);

        assert_eq!(scale.domain_to_pixel(0.0, span).expect("min"), 110.0);
        assert_eq!(scale.domain_to_pixel(50.0, span).expect("max"), 10.0);
    }

    #[test]
    fn inverted_vertical_span_maps_minimum_to_top() {
        let rect = ContentRect::new(0.0, 10.0, 100.0, 110.0);
        let scale = LinearScale::new(0.0, 50.0).expect("valid scale");
        let span = PixelSpan::vertical(rect, true);

        assert_eq!(scale.domain_to_pixel(0.0, span).expect("min"), 10.0);
    }

    #[test]
    fn rejects_zero_width_domain() {
        assert!(LinearScale::new(3.0, 3.0).is_err());
    }
}
