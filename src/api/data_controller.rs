use tracing::{debug, trace, warn};

use crate::core::{DataPoint, LineData, LineSeries};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn data(&self) -> &LineData {
        &self.data
    }

    /// Replaces every series.
    pub fn set_data(&mut self, data: LineData) {
        debug!(
            previous_count = self.data.len(),
            series_count = data.len(),
            "set line data"
        );
        self.data = data;
    }

    /// Adds a series after the existing ones.
    pub fn push_series(&mut self, series: LineSeries) {
        trace!(
            label = %series.label,
            points = series.points().len(),
            "push series"
        );
        self.data.push(series);
    }

    /// Appends or replaces the latest sample of one series.
    pub fn update_point(&mut self, series_index: usize, point: DataPoint) -> ChartResult<()> {
        let Some(series) = self.data.series_mut(series_index) else {
            return Err(ChartError::InvalidData(format!(
                "series index {series_index} is out of range"
            )));
        };
        series.update_point(point)?;
        trace!(series_index, x = point.x, y = point.y, "update point");
        Ok(())
    }

    pub fn clear_data(&mut self) {
        debug!(previous_count = self.data.len(), "clear line data");
        self.data.clear();
    }

    #[must_use]
    pub fn show_last_series(&self) -> bool {
        self.show_last_series
    }

    /// Hides or shows the most recently added series. Layout is recomputed
    /// on the next frame when the flag changes.
    pub fn set_show_last_series(&mut self, show: bool) {
        self.show_last_series = show;
    }

    #[must_use]
    pub fn highlights(&self) -> &[f64] {
        &self.highlights
    }

    /// Replaces the highlighted x values; non-finite values are dropped.
    pub fn set_highlights(&mut self, highlights: Vec<f64>) {
        let original_count = highlights.len();
        self.highlights = highlights.into_iter().filter(|x| x.is_finite()).collect();
        if self.highlights.len() != original_count {
            warn!(
                dropped = original_count - self.highlights.len(),
                "dropping non-finite highlight values"
            );
        }
    }

    pub fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    #[must_use]
    pub fn visible_x_range(&self) -> Option<(f64, f64)> {
        self.visible_x_range
    }

    /// Limits autoscale and projection to `[start, end]`; `None` shows all data.
    pub fn set_visible_x_range(&mut self, range: Option<(f64, f64)>) -> ChartResult<()> {
        if let Some((start, end)) = range {
            if !start.is_finite() || !end.is_finite() || start >= end {
                return Err(ChartError::InvalidData(format!(
                    "visible x range must be finite with start < end, got {start}..{end}"
                )));
            }
        }
        self.visible_x_range = range;
        debug!(?range, "visible x range updated");
        Ok(())
    }
}
