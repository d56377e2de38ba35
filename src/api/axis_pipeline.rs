use ordered_float::OrderedFloat;
use tracing::trace;

use crate::core::{
    Axis, AxisDependency, ContentRect, LineData, LineSeries, LinearScale, PixelSpan,
    TickConstraints, TickSet, TickStrategy, Viewport, project_line_points,
};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, DrawSurface, LinePrimitive, LineStrokeStyle, Paint, PathPrimitive,
    RectPrimitive, TextHAlign, TextMeasurer, TextPrimitive,
};

use super::label_compositor::{
    ActiveAxes, AxisLabelSource, DualAxisLabelCompositor, LabelSlot, single_axis_slots,
};
use super::{
    AxisConfig, AxisFormatters, AxisRole, ChartConfig, ChartLayout, ChartVariant,
    CombinedLabelAnchor, EdgeLabelClipping,
};

/// Gap between a limit line and its label.
const LIMIT_LABEL_OFFSET_PX: f64 = 4.0;
/// Y labels sit `height / 2.5` below their tick so they hang under the grid line.
const Y_LABEL_BASELINE_DIVISOR: f64 = 2.5;

/// Persistent axis state: configured ranges plus the ticks derived each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartAxes {
    pub x: Axis,
    pub left: Axis,
    pub right: Axis,
}

impl ChartAxes {
    #[must_use]
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            x: config.x_axis.scale.clone(),
            left: config.left_axis.scale.clone(),
            right: config.right_axis.scale.clone(),
        }
    }

    #[must_use]
    pub fn get(&self, role: AxisRole) -> &Axis {
        match role {
            AxisRole::X => &self.x,
            AxisRole::Left => &self.left,
            AxisRole::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, role: AxisRole) -> &mut Axis {
        match role {
            AxisRole::X => &mut self.x,
            AxisRole::Left => &mut self.left,
            AxisRole::Right => &mut self.right,
        }
    }

    #[must_use]
    pub fn for_dependency(&self, axis: AxisDependency) -> &Axis {
        match axis {
            AxisDependency::Left => &self.left,
            AxisDependency::Right => &self.right,
        }
    }
}

/// Where X tick values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XTickSource {
    /// Interval or even-split ticks over the X axis range.
    Axis,
    /// One tick per sample of the first series, drawn at evenly split positions.
    PerSample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YLabelComposition {
    /// Left and right labels merged into one slot, positioned by the anchor axis.
    Combined,
    /// Left labels left of the content, right labels right of it.
    Independent,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeClampPolicy {
    pub inset_edge_grid_lines: bool,
    pub label_clipping: EdgeLabelClipping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataPaint {
    Lines,
    /// Fill the content rect with the first series' gradient colors.
    GradientFill,
}

/// Horizontal extent of the X axis line and Y grid lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideSpan {
    Content,
    /// Whole surface width minus the configured extra offsets.
    ChartWidth,
}

/// Bundle of per-variant decisions driving one [`AxisRenderPipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStrategy {
    pub x_ticks: XTickSource,
    pub y_labels: YLabelComposition,
    pub edge_clamp: EdgeClampPolicy,
    pub draw_y_axes: bool,
    pub data_paint: DataPaint,
    pub guide_span: GuideSpan,
}

impl PipelineStrategy {
    #[must_use]
    pub fn for_config(config: &ChartConfig) -> Self {
        let edge_clamp = EdgeClampPolicy {
            inset_edge_grid_lines: config.inset_edge_grid_lines,
            label_clipping: config.edge_label_clipping,
        };
        match config.variant {
            ChartVariant::Standard => Self {
                x_ticks: XTickSource::Axis,
                y_labels: YLabelComposition::Independent,
                edge_clamp,
                draw_y_axes: true,
                data_paint: DataPaint::Lines,
                guide_span: GuideSpan::Content,
            },
            ChartVariant::Elevation => Self {
                x_ticks: XTickSource::Axis,
                y_labels: YLabelComposition::Combined,
                edge_clamp,
                draw_y_axes: true,
                data_paint: DataPaint::Lines,
                guide_span: GuideSpan::ChartWidth,
            },
            ChartVariant::Gradient => Self {
                x_ticks: XTickSource::PerSample,
                y_labels: YLabelComposition::Hidden,
                edge_clamp,
                draw_y_axes: false,
                data_paint: DataPaint::GradientFill,
                guide_span: GuideSpan::Content,
            },
        }
    }

    /// Axis whose ticks position combined labels and their grid lines.
    #[must_use]
    pub fn anchor_axis(config: &ChartConfig) -> Option<AxisRole> {
        if config.right_axis.enabled {
            Some(AxisRole::Right)
        } else if config.left_axis.enabled {
            Some(AxisRole::Left)
        } else {
            None
        }
    }
}

/// Everything one frame reads besides the axes themselves.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub viewport: Viewport,
    pub layout: ChartLayout,
    pub config: &'a ChartConfig,
    pub data: &'a LineData,
    pub formatters: &'a AxisFormatters,
    pub highlights: &'a [f64],
    pub visible_x_range: Option<(f64, f64)>,
    pub show_last_series: bool,
    /// Refit axis ranges to the data before computing ticks.
    pub autoscale: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TickCacheKey {
    minimum: OrderedFloat<f64>,
    maximum: OrderedFloat<f64>,
    label_count: usize,
    strategy: TickStrategy,
    granularity: OrderedFloat<f64>,
    granularity_enabled: bool,
    center_labels: bool,
    sample_count: usize,
    first_sample: OrderedFloat<f64>,
    last_sample: OrderedFloat<f64>,
}

impl TickCacheKey {
    fn new(axis: &Axis, strategy: TickStrategy, samples: &[f64]) -> Self {
        let TickConstraints {
            granularity,
            granularity_enabled,
            center_labels,
            ..
        } = axis.constraints;
        Self {
            minimum: OrderedFloat(axis.minimum),
            maximum: OrderedFloat(axis.maximum),
            label_count: axis.label_count,
            strategy,
            granularity: OrderedFloat(granularity),
            granularity_enabled,
            center_labels,
            sample_count: samples.len(),
            first_sample: OrderedFloat(samples.first().copied().unwrap_or(0.0)),
            last_sample: OrderedFloat(samples.last().copied().unwrap_or(0.0)),
        }
    }
}

/// Last computed tick set per axis, reused while its inputs are unchanged.
#[derive(Debug, Default)]
struct TickCache {
    entries: [Option<(TickCacheKey, TickSet)>; 3],
    hits: u64,
}

/// Reusable per-frame buffers owned by the pipeline.
#[derive(Debug, Default)]
struct ScratchBuffers {
    domain: Vec<f64>,
    pixels: Vec<f64>,
    samples: Vec<f64>,
    slots: Vec<LabelSlot>,
}

/// Per-frame axis, grid and label drawing in a fixed order.
#[derive(Debug)]
pub struct AxisRenderPipeline {
    strategy: PipelineStrategy,
    scratch: ScratchBuffers,
    tick_cache: TickCache,
}

impl AxisRenderPipeline {
    #[must_use]
    pub fn new(strategy: PipelineStrategy) -> Self {
        Self {
            strategy,
            scratch: ScratchBuffers::default(),
            tick_cache: TickCache::default(),
        }
    }

    #[must_use]
    pub fn strategy(&self) -> PipelineStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: PipelineStrategy) {
        self.strategy = strategy;
        self.invalidate_tick_cache();
    }

    pub fn invalidate_tick_cache(&mut self) {
        self.tick_cache.entries = Default::default();
    }

    /// Number of tick computations skipped through the cache.
    #[must_use]
    pub fn tick_cache_hits(&self) -> u64 {
        self.tick_cache.hits
    }

    /// Fits axis ranges to the data and recomputes Y then X ticks.
    ///
    /// With `autoscale` the Y axes follow the samples inside the visible X
    /// window; without it they span the full data set.
    pub fn prepare_axes(
        &mut self,
        axes: &mut ChartAxes,
        config: &ChartConfig,
        data: &LineData,
        visible_x_range: Option<(f64, f64)>,
        autoscale: bool,
    ) {
        if !data.has_samples() {
            return;
        }
        let y_window = if autoscale { visible_x_range } else { None };
        fit_axes(axes, data, visible_x_range, y_window);

        for role in [AxisRole::Right, AxisRole::Left] {
            let axis = axes.get_mut(role);
            let strategy = TickStrategy::select(axis.constraints);
            self.compute_axis_ticks(role, axis, strategy, &[], config.tick_cache_enabled);
        }

        let mut samples = std::mem::take(&mut self.scratch.samples);
        samples.clear();
        let x_strategy = match self.strategy.x_ticks {
            XTickSource::Axis => TickStrategy::select(axes.x.constraints),
            XTickSource::PerSample => {
                if let Some(first) = data.series().first() {
                    samples.extend(first.points().iter().map(|point| point.x));
                }
                TickStrategy::PerSample
            }
        };
        self.compute_axis_ticks(
            AxisRole::X,
            &mut axes.x,
            x_strategy,
            &samples,
            config.tick_cache_enabled,
        );
        self.scratch.samples = samples;
    }

    fn compute_axis_ticks(
        &mut self,
        role: AxisRole,
        axis: &mut Axis,
        strategy: TickStrategy,
        samples: &[f64],
        cache_enabled: bool,
    ) {
        if !cache_enabled {
            axis.compute_ticks_with(strategy, samples);
            return;
        }

        let key = TickCacheKey::new(axis, strategy, samples);
        let slot = &mut self.tick_cache.entries[role.index()];
        if let Some((cached_key, ticks)) = slot {
            if *cached_key == key {
                axis.set_ticks(ticks.clone());
                self.tick_cache.hits += 1;
                return;
            }
        }
        axis.compute_ticks_with(strategy, samples);
        *slot = Some((key, axis.ticks().clone()));
    }

    /// Runs one full frame into `surface`. Without samples this is a no-op.
    pub fn render(
        &mut self,
        axes: &mut ChartAxes,
        input: FrameInput<'_>,
        measurer: &dyn TextMeasurer,
        surface: &mut dyn DrawSurface,
    ) -> ChartResult<()> {
        if !input.data.has_samples() {
            trace!("no data, skipping frame");
            return Ok(());
        }

        self.prepare_axes(
            axes,
            input.config,
            input.data,
            input.visible_x_range,
            input.autoscale,
        );

        let content = input.layout.content;
        let x_scale = LinearScale::new(axes.x.minimum, axes.x.maximum)?;
        let x_span = PixelSpan::horizontal(content);
        let frame = FrameContext {
            axes,
            input,
            content,
            x_scale,
            x_span,
            active: input.data.active_series(input.show_last_series),
            measurer,
        };

        if input.config.draw_limit_lines_behind_data {
            draw_limit_lines(&frame, surface)?;
        }

        let saved = surface.save();
        if input.config.clip_data_to_content {
            surface.clip_rect(content);
        }
        self.draw_data(&frame, surface)?;
        draw_highlights(&frame, surface)?;
        surface.restore_to_count(saved);

        self.draw_extras(&frame, surface)?;
        if !input.config.draw_limit_lines_behind_data {
            draw_limit_lines(&frame, surface)?;
        }

        self.draw_x_labels(&frame, surface)?;
        if self.strategy.draw_y_axes {
            self.draw_y_labels(&frame, surface)?;
        }

        if input.config.clip_values_to_content {
            let saved = surface.save();
            surface.clip_rect(content);
            draw_values(&frame, surface)?;
            surface.restore_to_count(saved);
        } else {
            draw_values(&frame, surface)?;
        }

        self.draw_x_grid_lines(&frame, surface)?;
        self.draw_x_axis_line(&frame, surface);
        if self.strategy.draw_y_axes {
            self.draw_y_grid_lines(&frame, surface)?;
            self.draw_y_axis_lines(&frame, surface);
        }

        trace!(
            x_ticks = frame.axes.x.ticks().len(),
            left_ticks = frame.axes.left.ticks().len(),
            right_ticks = frame.axes.right.ticks().len(),
            "axis frame rendered"
        );
        Ok(())
    }

    fn draw_data(&self, frame: &FrameContext<'_>, surface: &mut dyn DrawSurface) -> ChartResult<()> {
        match self.strategy.data_paint {
            DataPaint::Lines => {
                let style = frame.input.config.style;
                for series in frame.active {
                    let points =
                        series.points_in_window(frame.axes.x.minimum, frame.axes.x.maximum);
                    if points.len() < 2 {
                        continue;
                    }
                    let (y_scale, y_span) = frame.y_projection(series.axis)?;
                    let projected =
                        project_line_points(points, frame.x_scale, frame.x_span, y_scale, y_span)?;
                    surface.draw_path(PathPrimitive::new(
                        projected,
                        style.series_line_width,
                        series.color,
                    ));
                }
            }
            DataPaint::GradientFill => {
                let Some(first) = frame.input.data.series().first() else {
                    return Ok(());
                };
                let colors = if first.gradient_colors.is_empty() {
                    std::slice::from_ref(&first.color)
                } else {
                    first.gradient_colors.as_slice()
                };
                let content = frame.content;
                surface.draw_rect(RectPrimitive::new(
                    content.left,
                    content.top,
                    content.width(),
                    content.height(),
                    Paint::horizontal_gradient(content.left, content.right, content.top, colors),
                ));
            }
        }
        Ok(())
    }

    fn draw_extras(&self, frame: &FrameContext<'_>, surface: &mut dyn DrawSurface) -> ChartResult<()> {
        if self.strategy.data_paint != DataPaint::Lines {
            return Ok(());
        }
        let radius = frame.input.config.style.point_marker_radius;
        for series in frame.active.iter().filter(|series| series.draw_point_markers) {
            let (y_scale, y_span) = frame.y_projection(series.axis)?;
            let points = series.points_in_window(frame.axes.x.minimum, frame.axes.x.maximum);
            for (x, y) in project_line_points(points, frame.x_scale, frame.x_span, y_scale, y_span)? {
                if frame.content.contains_x(x) {
                    surface.draw_circle(CirclePrimitive::new(x, y, radius, series.color));
                }
            }
        }
        Ok(())
    }

    fn draw_x_labels(
        &mut self,
        frame: &FrameContext<'_>,
        surface: &mut dyn DrawSurface,
    ) -> ChartResult<()> {
        let x_config = &frame.input.config.x_axis;
        if !labels_drawn(x_config) {
            return Ok(());
        }
        let ticks = frame.axes.x.ticks();
        if ticks.is_empty() {
            return Ok(());
        }

        self.fill_x_positions(frame, true)?;
        let style = frame.input.config.style;
        let formatter = &frame.input.formatters.x;
        let count = ticks.len();
        for (index, x) in self.scratch.pixels.iter().copied().enumerate() {
            if !frame.content.contains_x(x) {
                continue;
            }
            let Some(text) = formatter.format_tick(ticks, index) else {
                continue;
            };
            if text.is_empty() {
                continue;
            }
            let metrics = frame.measurer.measure(&text, style.x_label_font_size_px);
            let x = clamp_edge_label_x(
                x,
                metrics.width,
                index,
                count,
                self.strategy.edge_clamp.label_clipping,
                frame.content,
            );
            let baseline = frame.content.bottom + x_config.label_y_offset_px + metrics.height;
            surface.draw_text(TextPrimitive::new(
                text,
                x,
                baseline,
                style.x_label_font_size_px,
                style.x_label_color,
                TextHAlign::Center,
            ));
        }
        Ok(())
    }

    fn draw_y_labels(
        &mut self,
        frame: &FrameContext<'_>,
        surface: &mut dyn DrawSurface,
    ) -> ChartResult<()> {
        let config = frame.input.config;
        let font_size = config.style.axis_label_font_size_px;
        let baseline_shift = frame.measurer.measure("A", font_size).height / Y_LABEL_BASELINE_DIVISOR;

        match self.strategy.y_labels {
            YLabelComposition::Hidden => {}
            YLabelComposition::Combined => {
                let Some(anchor_role) = PipelineStrategy::anchor_axis(config) else {
                    return Ok(());
                };
                let anchor_config = config.axis(anchor_role);
                if !anchor_config.draw_labels {
                    return Ok(());
                }
                let active = ActiveAxes::from_series(frame.active);
                let label_role = active.label_axis(anchor_role);
                let compositor = DualAxisLabelCompositor::new(
                    config.combined_label_anchor,
                    &config.combined_label_separator,
                );
                compositor.compose(
                    frame.axes.get(label_role).visible_label_range(),
                    frame.label_source(AxisRole::Left),
                    frame.label_source(AxisRole::Right),
                    active,
                    &mut self.scratch.slots,
                );
                frame.project_y_ticks(label_role, &mut self.scratch.pixels)?;

                let anchor_x = match config.combined_label_anchor {
                    CombinedLabelAnchor::RightAnchored => {
                        f64::from(frame.input.viewport.width)
                            - config.extra_offsets.right
                            - anchor_config.label_x_offset_px
                    }
                    CombinedLabelAnchor::LeftAnchored => {
                        frame.content.right
                            + config.label_content_padding_px
                            + anchor_config.label_x_offset_px
                    }
                };
                let shift = baseline_shift + anchor_config.label_y_offset_px;
                for slot in &self.scratch.slots {
                    let Some(y) = self.scratch.pixels.get(slot.index).copied() else {
                        continue;
                    };
                    for text in compositor.place(slot, anchor_x, y + shift, font_size, frame.measurer)
                    {
                        surface.draw_text(text);
                    }
                }
            }
            YLabelComposition::Independent => {
                for role in [AxisRole::Left, AxisRole::Right] {
                    let axis_config = config.axis(role);
                    if !labels_drawn(axis_config) {
                        continue;
                    }
                    let axis = frame.axes.get(role);
                    single_axis_slots(
                        axis.visible_label_range(),
                        frame.label_source(role),
                        config.style.axis_label_color,
                        &mut self.scratch.slots,
                    );
                    frame.project_y_ticks(role, &mut self.scratch.pixels)?;

                    let (x, h_align) = if role == AxisRole::Left {
                        (
                            frame.content.left
                                - config.label_content_padding_px
                                - axis_config.label_x_offset_px,
                            TextHAlign::Right,
                        )
                    } else {
                        (
                            frame.content.right
                                + config.label_content_padding_px
                                + axis_config.label_x_offset_px,
                            TextHAlign::Left,
                        )
                    };
                    let shift = baseline_shift + axis_config.label_y_offset_px;
                    for slot in &self.scratch.slots {
                        let Some(y) = self.scratch.pixels.get(slot.index).copied() else {
                            continue;
                        };
                        for segment in &slot.segments {
                            surface.draw_text(TextPrimitive::new(
                                segment.text.clone(),
                                x,
                                y + shift,
                                font_size,
                                segment.color,
                                h_align,
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn draw_x_grid_lines(
        &mut self,
        frame: &FrameContext<'_>,
        surface: &mut dyn DrawSurface,
    ) -> ChartResult<()> {
        let config = frame.input.config;
        let x_config = &config.x_axis;
        if !x_config.enabled || !x_config.draw_grid_lines || frame.axes.x.ticks().is_empty() {
            return Ok(());
        }

        self.fill_x_positions(frame, false)?;
        let width = config.style.x_grid_line_width;
        let half = width / 2.0;
        let content = frame.content;
        let bottom = content.bottom + config.x_grid_extension_px / 2.0;
        let style = LineStrokeStyle::from_dash(x_config.grid_dash);
        let count = self.scratch.pixels.len();

        let saved = surface.save();
        surface.clip_rect(ContentRect::new(
            content.left - width,
            content.top,
            content.right + width,
            bottom,
        ));
        for (index, x) in self.scratch.pixels.iter().copied().enumerate() {
            let x = if self.strategy.edge_clamp.inset_edge_grid_lines {
                inset_edge_grid_x(x, half, index, count)
            } else {
                x
            };
            surface.draw_line(
                LinePrimitive::new(x, bottom, x, content.top, width, config.style.x_grid_line_color)
                    .with_style(style),
            );
        }
        surface.restore_to_count(saved);
        Ok(())
    }

    fn draw_x_axis_line(&self, frame: &FrameContext<'_>, surface: &mut dyn DrawSurface) {
        let config = frame.input.config;
        if !config.x_axis.enabled || !config.x_axis.draw_axis_line {
            return;
        }
        let (left, right) = frame.guide_extent(self.strategy.guide_span);
        let y = frame.content.bottom;
        surface.draw_line(LinePrimitive::new(
            left,
            y,
            right,
            y,
            config.style.axis_line_width,
            config.style.axis_line_color,
        ));
    }

    fn draw_y_grid_lines(
        &mut self,
        frame: &FrameContext<'_>,
        surface: &mut dyn DrawSurface,
    ) -> ChartResult<()> {
        let config = frame.input.config;
        let roles: &[AxisRole] = match self.strategy.y_labels {
            YLabelComposition::Hidden => &[],
            YLabelComposition::Combined => match PipelineStrategy::anchor_axis(config) {
                Some(AxisRole::Left) => &[AxisRole::Left],
                Some(_) => &[AxisRole::Right],
                None => &[],
            },
            YLabelComposition::Independent => &[AxisRole::Left, AxisRole::Right],
        };

        let width = config.style.grid_line_width;
        let half = width / 2.0;
        let content = frame.content;
        let (left, right) = frame.guide_extent(self.strategy.guide_span);

        for role in roles.iter().copied() {
            let axis_config = config.axis(role);
            if !axis_config.enabled || !axis_config.draw_grid_lines {
                continue;
            }
            frame.project_y_ticks(role, &mut self.scratch.pixels)?;
            let start = usize::from(!axis_config.draw_bottom_grid_line);
            let style = LineStrokeStyle::from_dash(axis_config.grid_dash);

            let saved = surface.save();
            surface.clip_rect(ContentRect::new(
                left,
                content.top - width,
                right,
                content.bottom + width,
            ));
            for y in self.scratch.pixels.iter().skip(start).copied() {
                let y = clamp_grid_line_y(y, half, content);
                surface.draw_line(
                    LinePrimitive::new(left, y, right, y, width, config.style.grid_line_color)
                        .with_style(style),
                );
            }
            surface.restore_to_count(saved);
        }
        Ok(())
    }

    fn draw_y_axis_lines(&self, frame: &FrameContext<'_>, surface: &mut dyn DrawSurface) {
        if self.strategy.y_labels != YLabelComposition::Independent {
            return;
        }
        let config = frame.input.config;
        let content = frame.content;
        for (axis_config, x) in [
            (&config.left_axis, content.left),
            (&config.right_axis, content.right),
        ] {
            if axis_config.enabled && axis_config.draw_axis_line {
                surface.draw_line(LinePrimitive::new(
                    x,
                    content.top,
                    x,
                    content.bottom,
                    config.style.axis_line_width,
                    config.style.axis_line_color,
                ));
            }
        }
    }

    /// Projects X tick positions into `scratch.pixels`. Per-sample ticks are
    /// drawn at evenly split positions across the axis range.
    fn fill_x_positions(&mut self, frame: &FrameContext<'_>, for_labels: bool) -> ChartResult<()> {
        let axis = &frame.axes.x;
        let ticks = axis.ticks();
        let domain = &mut self.scratch.domain;
        domain.clear();
        match self.strategy.x_ticks {
            XTickSource::Axis => {
                let centered = for_labels && axis.constraints.center_labels;
                domain.extend_from_slice(ticks.label_values(centered));
            }
            XTickSource::PerSample => {
                even_split_positions(axis.minimum, axis.maximum, ticks.len(), domain);
            }
        }
        frame
            .x_scale
            .project_into(domain, frame.x_span, &mut self.scratch.pixels)
    }
}

/// Borrowed state shared by the draw steps of one frame.
struct FrameContext<'a> {
    axes: &'a ChartAxes,
    input: FrameInput<'a>,
    content: ContentRect,
    x_scale: LinearScale,
    x_span: PixelSpan,
    active: &'a [LineSeries],
    measurer: &'a dyn TextMeasurer,
}

impl FrameContext<'_> {
    fn y_projection(&self, dependency: AxisDependency) -> ChartResult<(LinearScale, PixelSpan)> {
        let axis = self.axes.for_dependency(dependency);
        let scale = LinearScale::new(axis.minimum, axis.maximum)?;
        Ok((scale, PixelSpan::vertical(self.content, axis.inverted)))
    }

    fn project_y_ticks(&self, role: AxisRole, out: &mut Vec<f64>) -> ChartResult<()> {
        let axis = self.axes.get(role);
        out.clear();
        if axis.ticks().is_empty() {
            return Ok(());
        }
        let scale = LinearScale::new(axis.minimum, axis.maximum)?;
        scale.project_into(
            &axis.ticks().values,
            PixelSpan::vertical(self.content, axis.inverted),
            out,
        )
    }

    fn label_source(&self, role: AxisRole) -> AxisLabelSource<'_> {
        AxisLabelSource {
            ticks: self.axes.get(role).ticks(),
            formatter: self.input.formatters.get(role),
        }
    }

    fn guide_extent(&self, span: GuideSpan) -> (f64, f64) {
        match span {
            GuideSpan::Content => (self.content.left, self.content.right),
            GuideSpan::ChartWidth => {
                let offsets = self.input.config.extra_offsets;
                (
                    offsets.left,
                    f64::from(self.input.viewport.width) - offsets.right,
                )
            }
        }
    }
}

fn draw_highlights(frame: &FrameContext<'_>, surface: &mut dyn DrawSurface) -> ChartResult<()> {
    let style = frame.input.config.style;
    let content = frame.content;
    for x_value in frame.input.highlights.iter().copied() {
        let x = frame.x_scale.domain_to_pixel(x_value, frame.x_span)?;
        if !content.contains_x(x) {
            continue;
        }
        surface.draw_line(LinePrimitive::new(
            x,
            content.top,
            x,
            content.bottom,
            style.highlight_line_width,
            style.highlight_line_color,
        ));
        for series in frame.active {
            let Some(point) = series.nearest_to_x(x_value) else {
                continue;
            };
            let (y_scale, y_span) = frame.y_projection(series.axis)?;
            let px = frame.x_scale.domain_to_pixel(point.x, frame.x_span)?;
            let py = y_scale.domain_to_pixel(point.y, y_span)?;
            surface.draw_circle(CirclePrimitive::new(
                px,
                py,
                style.point_marker_radius,
                series.color,
            ));
        }
    }
    Ok(())
}

fn draw_limit_lines(frame: &FrameContext<'_>, surface: &mut dyn DrawSurface) -> ChartResult<()> {
    let config = frame.input.config;
    if !config.x_axis.enabled || config.limit_lines.is_empty() {
        return Ok(());
    }
    let content = frame.content;
    let font_size = config.style.limit_line_label_font_size_px;
    for line in &config.limit_lines {
        let x = frame.x_scale.domain_to_pixel(line.value, frame.x_span)?;
        if !content.contains_x(x) {
            continue;
        }
        let saved = surface.save();
        surface.clip_rect(content.outset(line.line_width, 0.0));
        surface.draw_line(
            LinePrimitive::new(x, content.bottom, x, content.top, line.line_width, line.color)
                .with_style(LineStrokeStyle::from_dash(line.dash)),
        );
        surface.restore_to_count(saved);

        if let Some(label) = line.label.as_deref().filter(|label| !label.is_empty()) {
            let height = frame.measurer.measure(label, font_size).height;
            surface.draw_text(TextPrimitive::new(
                label,
                x + line.line_width + LIMIT_LABEL_OFFSET_PX,
                content.top + LIMIT_LABEL_OFFSET_PX + height,
                font_size,
                line.color,
                TextHAlign::Left,
            ));
        }
    }
    Ok(())
}

fn draw_values(frame: &FrameContext<'_>, surface: &mut dyn DrawSurface) -> ChartResult<()> {
    let config = frame.input.config;
    let (min_x, max_x) = (frame.axes.x.minimum, frame.axes.x.maximum);
    let visible: usize = frame
        .active
        .iter()
        .map(|series| series.count_in_window(min_x, max_x))
        .sum();
    if visible > config.max_visible_value_count {
        return Ok(());
    }

    let style = config.style;
    for series in frame.active.iter().filter(|series| series.draw_values) {
        let (y_scale, y_span) = frame.y_projection(series.axis)?;
        let formatter = frame.input.formatters.for_dependency(series.axis);
        let decimals = frame.axes.for_dependency(series.axis).ticks().decimal_places;
        for point in series
            .points()
            .iter()
            .filter(|point| point.x >= min_x && point.x <= max_x)
        {
            let text = formatter.format(point.y, decimals);
            if text.is_empty() {
                continue;
            }
            let x = frame.x_scale.domain_to_pixel(point.x, frame.x_span)?;
            let y = y_scale.domain_to_pixel(point.y, y_span)?;
            surface.draw_text(TextPrimitive::new(
                text,
                x,
                y - style.value_label_offset_px,
                style.value_label_font_size_px,
                series.color,
                TextHAlign::Center,
            ));
        }
    }
    Ok(())
}

fn fit_axes(
    axes: &mut ChartAxes,
    data: &LineData,
    visible_x_range: Option<(f64, f64)>,
    y_window: Option<(f64, f64)>,
) {
    if let Some((min_x, max_x)) = visible_x_range.or_else(|| data.x_range()) {
        axes.x.calculate(min_x, max_x);
    }

    // An axis without series of its own mirrors the other axis' extent.
    let left = data
        .y_range(AxisDependency::Left, y_window)
        .or_else(|| data.y_range(AxisDependency::Right, y_window));
    let right = data.y_range(AxisDependency::Right, y_window).or(left);
    if let Some((min, max)) = left {
        axes.left.calculate(min, max);
    }
    if let Some((min, max)) = right {
        axes.right.calculate(min, max);
    }
}

/// X of an edge label after applying the clipping policy.
#[must_use]
pub fn clamp_edge_label_x(
    x: f64,
    width: f64,
    index: usize,
    count: usize,
    clipping: EdgeLabelClipping,
    content: ContentRect,
) -> f64 {
    let half = width / 2.0;
    let is_last = count > 1 && index + 1 == count;
    let is_first = index == 0 && !is_last;
    match clipping {
        EdgeLabelClipping::Disabled => x,
        EdgeLabelClipping::AlwaysShift => {
            if is_last {
                x - half
            } else if is_first {
                x + half
            } else {
                x
            }
        }
        EdgeLabelClipping::ClampToBoundary => {
            if is_last && x + half > content.right {
                content.right - half
            } else if is_first && x - half < content.left {
                content.left + half
            } else {
                x
            }
        }
    }
}

/// Moves a horizontal grid line inside the content rect so its stroke is not cut.
#[must_use]
pub fn clamp_grid_line_y(y: f64, half_stroke: f64, content: ContentRect) -> f64 {
    if y + half_stroke > content.bottom {
        content.bottom - half_stroke
    } else if y - half_stroke < content.top {
        content.top + half_stroke
    } else {
        y
    }
}

/// Shifts the first and last vertical grid line inward by half a stroke.
#[must_use]
pub fn inset_edge_grid_x(x: f64, half_stroke: f64, index: usize, count: usize) -> f64 {
    if count > 1 && index + 1 == count {
        x - half_stroke
    } else if index == 0 {
        x + half_stroke
    } else {
        x
    }
}

fn even_split_positions(min: f64, max: f64, count: usize, out: &mut Vec<f64>) {
    match count {
        0 => {}
        1 => out.push(min),
        _ => {
            let step = (max - min) / (count - 1) as f64;
            out.extend((0..count).map(|index| min + index as f64 * step));
        }
    }
}

/// Whether an axis draws its own tick labels.
pub(super) fn labels_drawn(axis_config: &AxisConfig) -> bool {
    axis_config.enabled && axis_config.draw_labels
}

#[cfg(test)]
mod tests {
    use super::{clamp_edge_label_x, clamp_grid_line_y, even_split_positions, inset_edge_grid_x};
    use crate::api::EdgeLabelClipping;
    use crate::core::ContentRect;

    const CONTENT: ContentRect = ContentRect::new(10.0, 10.0, 110.0, 60.0);

    #[test]
    fn clamp_to_boundary_only_moves_overflowing_labels() {
        let fits = clamp_edge_label_x(30.0, 10.0, 0, 5, EdgeLabelClipping::ClampToBoundary, CONTENT);
        assert_eq!(fits, 30.0);
        let overflow =
            clamp_edge_label_x(10.0, 20.0, 0, 5, EdgeLabelClipping::ClampToBoundary, CONTENT);
        assert_eq!(overflow, 20.0);
        let last = clamp_edge_label_x(110.0, 20.0, 4, 5, EdgeLabelClipping::ClampToBoundary, CONTENT);
        assert_eq!(last, 100.0);
    }

    #[test]
    fn always_shift_moves_edge_labels_by_half_width() {
        let first = clamp_edge_label_x(30.0, 10.0, 0, 5, EdgeLabelClipping::AlwaysShift, CONTENT);
        assert_eq!(first, 35.0);
        let middle = clamp_edge_label_x(50.0, 10.0, 2, 5, EdgeLabelClipping::AlwaysShift, CONTENT);
        assert_eq!(middle, 50.0);
    }

    #[test]
    fn boundary_grid_lines_are_pulled_inside() {
        assert_eq!(clamp_grid_line_y(60.0, 0.5, CONTENT), 59.5);
        assert_eq!(clamp_grid_line_y(10.0, 0.5, CONTENT), 10.5);
        assert_eq!(clamp_grid_line_y(30.0, 0.5, CONTENT), 30.0);
    }

    #[test]
    fn edge_grid_lines_move_inward() {
        assert_eq!(inset_edge_grid_x(10.0, 0.5, 0, 3), 10.5);
        assert_eq!(inset_edge_grid_x(110.0, 0.5, 2, 3), 109.5);
        assert_eq!(inset_edge_grid_x(60.0, 0.5, 1, 3), 60.0);
    }

    #[test]
    fn even_split_covers_both_ends() {
        let mut out = Vec::new();
        even_split_positions(0.0, 10.0, 3, &mut out);
        assert_eq!(out, vec![0.0, 5.0, 10.0]);
    }
}
