use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Colors, stroke widths and font sizes used by the axis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub axis_label_color: Color,
    pub x_label_color: Color,
    pub grid_line_color: Color,
    pub x_grid_line_color: Color,
    pub axis_line_color: Color,
    pub highlight_line_color: Color,
    pub grid_line_width: f64,
    pub x_grid_line_width: f64,
    pub axis_line_width: f64,
    pub series_line_width: f64,
    pub highlight_line_width: f64,
    pub point_marker_radius: f64,
    pub axis_label_font_size_px: f64,
    pub x_label_font_size_px: f64,
    pub value_label_font_size_px: f64,
    /// Gap between a sample and the baseline of its value label.
    pub value_label_offset_px: f64,
    pub limit_line_label_font_size_px: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            axis_label_color: Color::rgb(0.10, 0.12, 0.16),
            x_label_color: Color::rgb(0.10, 0.12, 0.16),
            grid_line_color: Color::rgb(0.89, 0.92, 0.95),
            x_grid_line_color: Color::rgb(0.82, 0.84, 0.88),
            axis_line_color: Color::rgb(0.82, 0.84, 0.88),
            highlight_line_color: Color::rgb(0.30, 0.35, 0.44),
            grid_line_width: 1.0,
            x_grid_line_width: 1.0,
            axis_line_width: 1.0,
            series_line_width: 2.0,
            highlight_line_width: 1.0,
            point_marker_radius: 3.0,
            axis_label_font_size_px: 10.0,
            x_label_font_size_px: 10.0,
            value_label_font_size_px: 9.0,
            value_label_offset_px: 4.5,
            limit_line_label_font_size_px: 10.0,
        }
    }
}

impl RenderStyle {
    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.axis_label_color,
            self.x_label_color,
            self.grid_line_color,
            self.x_grid_line_color,
            self.axis_line_color,
            self.highlight_line_color,
        ] {
            color.validate()?;
        }
        for (name, value) in [
            ("grid_line_width", self.grid_line_width),
            ("x_grid_line_width", self.x_grid_line_width),
            ("axis_line_width", self.axis_line_width),
            ("series_line_width", self.series_line_width),
            ("highlight_line_width", self.highlight_line_width),
            ("point_marker_radius", self.point_marker_radius),
            ("axis_label_font_size_px", self.axis_label_font_size_px),
            ("x_label_font_size_px", self.x_label_font_size_px),
            ("value_label_font_size_px", self.value_label_font_size_px),
            (
                "limit_line_label_font_size_px",
                self.limit_line_label_font_size_px,
            ),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.value_label_offset_px.is_finite() {
            return Err(ChartError::InvalidConfig(
                "style `value_label_offset_px` must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}
