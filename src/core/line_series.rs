use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::axis::AxisDependency;
use crate::core::scale::{LinearScale, PixelSpan};
use crate::core::types::DataPoint;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Ordered `(x, y)` samples plotted against one Y axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub label: String,
    points: Vec<DataPoint>,
    pub color: Color,
    /// Horizontal gradient stops used by gradient-fill charts.
    #[serde(default)]
    pub gradient_colors: Vec<Color>,
    #[serde(default)]
    pub axis: AxisDependency,
    /// Draw the y value of each visible sample as a text label.
    #[serde(default)]
    pub draw_values: bool,
    #[serde(default)]
    pub draw_point_markers: bool,
}

impl LineSeries {
    /// Creates a series, dropping non-finite samples and sorting by x.
    #[must_use]
    pub fn new(label: impl Into<String>, points: Vec<DataPoint>, axis: AxisDependency) -> Self {
        let label = label.into();
        Self {
            points: canonicalize_points(&label, points),
            label,
            color: Color::rgb(0.0, 0.0, 0.0),
            gradient_colors: Vec::new(),
            axis,
            draw_values: false,
            draw_point_markers: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_gradient_colors(mut self, colors: Vec<Color>) -> Self {
        self.gradient_colors = colors;
        self
    }

    #[must_use]
    pub fn with_values(mut self, draw_values: bool) -> Self {
        self.draw_values = draw_values;
        self
    }

    #[must_use]
    pub fn with_point_markers(mut self, draw_point_markers: bool) -> Self {
        self.draw_point_markers = draw_point_markers;
        self
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn sample_xs(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.x).collect()
    }

    #[must_use]
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some((first.x, last.x))
    }

    /// Y extent of samples whose x lies inside the inclusive window.
    #[must_use]
    pub fn y_range_in_window(&self, window: Option<(f64, f64)>) -> Option<(f64, f64)> {
        let points = match window {
            Some((start, end)) => {
                let (min_x, max_x) = ordered(start, end);
                let from = self.points.partition_point(|point| point.x < min_x);
                let to = self.points.partition_point(|point| point.x <= max_x);
                &self.points[from..to]
            }
            None => &self.points[..],
        };

        points.iter().fold(None, |acc, point| match acc {
            None => Some((point.y, point.y)),
            Some((min, max)) => Some((min.min(point.y), max.max(point.y))),
        })
    }

    /// Samples inside the window plus one neighbor on each side, so a clipped
    /// polyline still reaches the content edges.
    #[must_use]
    pub fn points_in_window(&self, start: f64, end: f64) -> &[DataPoint] {
        let (min_x, max_x) = ordered(start, end);
        let from = self
            .points
            .partition_point(|point| point.x < min_x)
            .saturating_sub(1);
        let to = (self.points.partition_point(|point| point.x <= max_x) + 1).min(self.points.len());
        if from >= to {
            return &[];
        }
        &self.points[from..to]
    }

    /// Number of samples whose x lies inside the inclusive window.
    #[must_use]
    pub fn count_in_window(&self, start: f64, end: f64) -> usize {
        let (min_x, max_x) = ordered(start, end);
        let from = self.points.partition_point(|point| point.x < min_x);
        let to = self.points.partition_point(|point| point.x <= max_x);
        to.saturating_sub(from)
    }

    /// Realtime update: appends when `point.x` is newer than the last sample,
    /// replaces the last sample when equal and rejects older samples.
    pub fn update_point(&mut self, point: DataPoint) -> ChartResult<()> {
        if !point.is_finite() {
            return Err(ChartError::InvalidData(
                "series sample must be finite".to_owned(),
            ));
        }
        match self.points.last_mut() {
            Some(last) if point.x < last.x => Err(ChartError::InvalidData(format!(
                "sample x {} is older than latest sample x {}",
                point.x, last.x
            ))),
            Some(last) if point.x == last.x => {
                *last = point;
                Ok(())
            }
            _ => {
                self.points.push(point);
                Ok(())
            }
        }
    }

    /// Sample closest to `x` along the x axis; ties resolve to the earlier sample.
    #[must_use]
    pub fn nearest_to_x(&self, x: f64) -> Option<DataPoint> {
        if !x.is_finite() {
            return None;
        }
        let index = self.points.partition_point(|point| point.x < x);
        let after = self.points.get(index).copied();
        let before = index
            .checked_sub(1)
            .and_then(|previous| self.points.get(previous).copied());
        match (before, after) {
            (Some(before), Some(after)) => {
                if (x - before.x) <= (after.x - x) {
                    Some(before)
                } else {
                    Some(after)
                }
            }
            (before, after) => before.or(after),
        }
    }
}

/// Collection of series drawn by one chart, in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineData {
    series: Vec<LineSeries>,
}

impl LineData {
    #[must_use]
    pub fn new(series: Vec<LineSeries>) -> Self {
        Self { series }
    }

    pub fn push(&mut self, series: LineSeries) {
        self.series.push(series);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    #[must_use]
    pub fn series(&self) -> &[LineSeries] {
        &self.series
    }

    pub fn series_mut(&mut self, index: usize) -> Option<&mut LineSeries> {
        self.series.get_mut(index)
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }

    /// Series that are drawn, optionally suppressing the most recently added one.
    #[must_use]
    pub fn active_series(&self, show_last_series: bool) -> &[LineSeries] {
        if show_last_series || self.series.is_empty() {
            &self.series
        } else {
            &self.series[..self.series.len() - 1]
        }
    }

    /// Whether any series holds at least one sample.
    #[must_use]
    pub fn has_samples(&self) -> bool {
        self.series.iter().any(|series| !series.is_empty())
    }

    #[must_use]
    pub fn x_range(&self) -> Option<(f64, f64)> {
        merge_ranges(self.series.iter().filter_map(LineSeries::x_range))
    }

    /// Y extent over every series bound to `axis`, limited to the x window.
    #[must_use]
    pub fn y_range(&self, axis: AxisDependency, window: Option<(f64, f64)>) -> Option<(f64, f64)> {
        merge_ranges(
            self.series
                .iter()
                .filter(|series| series.axis == axis)
                .filter_map(|series| series.y_range_in_window(window)),
        )
    }
}

/// Projects samples into pixel coordinates.
pub fn project_line_points(
    points: &[DataPoint],
    x_scale: LinearScale,
    x_span: PixelSpan,
    y_scale: LinearScale,
    y_span: PixelSpan,
) -> ChartResult<Vec<(f64, f64)>> {
    let mut projected = Vec::with_capacity(points.len());
    for point in points {
        projected.push((
            x_scale.domain_to_pixel(point.x, x_span)?,
            y_scale.domain_to_pixel(point.y, y_span)?,
        ));
    }
    Ok(projected)
}

fn canonicalize_points(label: &str, mut points: Vec<DataPoint>) -> Vec<DataPoint> {
    let original_count = points.len();
    points.retain(|point| point.is_finite());
    if points.len() != original_count {
        warn!(
            series = label,
            dropped = original_count - points.len(),
            "dropping non-finite samples"
        );
    }
    points.sort_by(|left, right| left.x.total_cmp(&right.x));
    points
}

fn ordered(start: f64, end: f64) -> (f64, f64) {
    if start <= end { (start, end) } else { (end, start) }
}

fn merge_ranges(ranges: impl Iterator<Item = (f64, f64)>) -> Option<(f64, f64)> {
    ranges.fold(None, |acc, (min, max)| match acc {
        None => Some((min, max)),
        Some((acc_min, acc_max)) => Some((acc_min.min(min), acc_max.max(max))),
    })
}
