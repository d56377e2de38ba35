use tracing::debug;

use crate::core::{ContentRect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::TextMeasurer;

use super::axis_pipeline::{ChartAxes, PipelineStrategy, YLabelComposition, labels_drawn};
use super::label_compositor::{
    ActiveAxes, AxisLabelSource, DualAxisLabelCompositor, LabelSlot, single_axis_slots,
};
use super::{AxisFormatters, AxisRole, ChartConfig};

/// Resolved pixel geometry of the chart for the current surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub content: ContentRect,
    /// Surface width left after the Y label bands.
    pub chart_width: f64,
    pub chart_height: f64,
    pub left_label_band_px: f64,
    pub right_label_band_px: f64,
    pub x_label_band_px: f64,
}

/// Inputs whose change forces a new layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutKey {
    pub viewport: Viewport,
    pub data_set_count: usize,
    pub show_last_series: bool,
    generation: u64,
}

/// Borrowed chart state measured by one layout pass. Axes must already hold
/// the ticks of the current data.
#[derive(Debug, Clone, Copy)]
pub struct LayoutRequest<'a> {
    pub viewport: Viewport,
    pub config: &'a ChartConfig,
    pub strategy: PipelineStrategy,
    pub axes: &'a ChartAxes,
    pub formatters: &'a AxisFormatters,
    pub active: ActiveAxes,
}

/// Reserves margins for the widest measured label and caches the result until
/// explicitly invalidated.
#[derive(Debug, Default)]
pub struct ViewportLayoutEngine {
    cached: Option<(LayoutKey, ChartLayout)>,
    generation: u64,
    measure_passes: u64,
    slots: Vec<LabelSlot>,
}

impl ViewportLayoutEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn key(&self, viewport: Viewport, data_set_count: usize, show_last_series: bool) -> LayoutKey {
        LayoutKey {
            viewport,
            data_set_count,
            show_last_series,
            generation: self.generation,
        }
    }

    /// Forces the next layout pass to re-measure, e.g. after a formatter change.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// The cached layout, if it was resolved for `key`.
    #[must_use]
    pub fn current(&self, key: LayoutKey) -> Option<ChartLayout> {
        self.cached
            .as_ref()
            .filter(|(cached_key, _)| *cached_key == key)
            .map(|(_, layout)| *layout)
    }

    /// Most recent layout regardless of validity.
    #[must_use]
    pub fn last_layout(&self) -> Option<ChartLayout> {
        self.cached.as_ref().map(|(_, layout)| *layout)
    }

    /// Count of layout passes that measured text.
    #[must_use]
    pub fn measure_passes(&self) -> u64 {
        self.measure_passes
    }

    /// Measures labels and stores a fresh layout for `key`.
    pub fn resolve(
        &mut self,
        key: LayoutKey,
        request: LayoutRequest<'_>,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<ChartLayout> {
        let viewport = request.viewport;
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.measure_passes += 1;

        let config = request.config;
        let padding = config.label_content_padding_px;
        let (left_labels, right_labels) = self.measure_y_labels(request, measurer);
        let left_band = if left_labels > 0.0 { left_labels + padding } else { 0.0 };
        let right_band = if right_labels > 0.0 { right_labels + padding } else { 0.0 };
        let x_band = measure_x_label_band(request, measurer);

        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let offsets = config.extra_offsets;
        let content = ContentRect::new(
            offsets.left + left_band,
            offsets.top,
            width - offsets.right - right_band,
            height - offsets.bottom - x_band,
        );
        if !content.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let layout = ChartLayout {
            content,
            chart_width: width - left_band - right_band,
            chart_height: height,
            left_label_band_px: left_band,
            right_label_band_px: right_band,
            x_label_band_px: x_band,
        };
        debug!(
            width = viewport.width,
            height = viewport.height,
            data_set_count = key.data_set_count,
            left_band,
            right_band,
            x_band,
            "viewport layout resolved"
        );
        self.cached = Some((key, layout));
        Ok(layout)
    }

    /// Widest label width on the left and right of the content.
    fn measure_y_labels(&mut self, request: LayoutRequest<'_>, measurer: &dyn TextMeasurer) -> (f64, f64) {
        let config = request.config;
        let font_size = config.style.axis_label_font_size_px;
        let source = |role: AxisRole| AxisLabelSource {
            ticks: request.axes.get(role).ticks(),
            formatter: request.formatters.get(role),
        };

        match request.strategy.y_labels {
            YLabelComposition::Hidden => (0.0, 0.0),
            YLabelComposition::Combined => {
                let Some(anchor) = PipelineStrategy::anchor_axis(config) else {
                    return (0.0, 0.0);
                };
                if !config.axis(anchor).draw_labels {
                    return (0.0, 0.0);
                }
                DualAxisLabelCompositor::new(
                    config.combined_label_anchor,
                    &config.combined_label_separator,
                )
                .compose(
                    request.axes.get(request.active.label_axis(anchor)).visible_label_range(),
                    source(AxisRole::Left),
                    source(AxisRole::Right),
                    request.active,
                    &mut self.slots,
                );
                (0.0, widest_slot(&self.slots, measurer, font_size))
            }
            YLabelComposition::Independent => {
                let mut widths = [0.0; 2];
                for (width, role) in widths.iter_mut().zip([AxisRole::Left, AxisRole::Right]) {
                    if !labels_drawn(config.axis(role)) {
                        continue;
                    }
                    single_axis_slots(
                        request.axes.get(role).visible_label_range(),
                        source(role),
                        config.style.axis_label_color,
                        &mut self.slots,
                    );
                    *width = widest_slot(&self.slots, measurer, font_size);
                }
                (widths[0], widths[1])
            }
        }
    }
}

fn widest_slot(slots: &[LabelSlot], measurer: &dyn TextMeasurer, font_size_px: f64) -> f64 {
    slots
        .iter()
        .map(|slot| slot.measured_width(measurer, font_size_px))
        .fold(0.0, f64::max)
}

/// Height reserved under the content for X labels.
fn measure_x_label_band(request: LayoutRequest<'_>, measurer: &dyn TextMeasurer) -> f64 {
    let x_config = &request.config.x_axis;
    if !labels_drawn(x_config) {
        return 0.0;
    }
    let font_size = request.config.style.x_label_font_size_px;
    let ticks = request.axes.x.ticks();
    let tallest = (0..ticks.len())
        .filter_map(|index| request.formatters.x.format_tick(ticks, index))
        .map(|text| measurer.measure(&text, font_size).height)
        .fold(0.0, f64::max);
    if tallest > 0.0 {
        tallest + x_config.label_y_offset_px.max(0.0)
    } else {
        0.0
    }
}
