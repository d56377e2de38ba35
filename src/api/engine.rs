use tracing::{debug, trace};

use crate::core::{LineData, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{DrawSurface, EstimatedTextMeasurer, RenderFrame, Renderer, TextMeasurer};

use super::axis_pipeline::{AxisRenderPipeline, ChartAxes, FrameInput, PipelineStrategy};
use super::label_compositor::ActiveAxes;
use super::layout_jobs::DeferredLayoutQueue;
use super::viewport_layout::{LayoutRequest, ViewportLayoutEngine};
use super::{AxisFormatters, AxisLabelFormatter, AxisRole, AxisValueFormatterFn, ChartConfig, ChartLayout};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main facade consumed by host applications.
///
/// `ChartEngine` owns the chart configuration, series data and axis state,
/// resolves the content layout once the host reports a surface size, and
/// drives the axis pipeline into a renderer or any [`DrawSurface`].
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartConfig,
    pub(super) axes: ChartAxes,
    pub(super) data: LineData,
    pub(super) pipeline: AxisRenderPipeline,
    pub(super) layout: ViewportLayoutEngine,
    pub(super) formatters: AxisFormatters,
    pub(super) custom_formatters: [Option<AxisValueFormatterFn>; 3],
    pub(super) layout_jobs: DeferredLayoutQueue,
    pub(super) viewport: Option<Viewport>,
    pub(super) highlights: Vec<f64>,
    pub(super) visible_x_range: Option<(f64, f64)>,
    pub(super) show_last_series: bool,
    measurer: Box<dyn TextMeasurer>,
}

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine with no surface attached yet.
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let axes = ChartAxes::from_config(&config);
        let pipeline = AxisRenderPipeline::new(PipelineStrategy::for_config(&config));
        let mut engine = Self {
            renderer,
            axes,
            data: LineData::default(),
            pipeline,
            layout: ViewportLayoutEngine::new(),
            formatters: AxisFormatters::default(),
            custom_formatters: Default::default(),
            layout_jobs: DeferredLayoutQueue::new(),
            viewport: None,
            highlights: Vec::new(),
            visible_x_range: None,
            show_last_series: config.show_last_series,
            config,
            measurer: Box::new(EstimatedTextMeasurer),
        };
        engine.rebuild_formatters();
        debug!(variant = ?engine.config.variant, "chart engine created");
        Ok(engine)
    }

    /// Replaces the text measurer used for layout and label placement.
    #[must_use]
    pub fn with_text_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self.layout.invalidate();
        self
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Applies a new configuration, resetting axis ranges and the cached layout.
    pub fn set_config(&mut self, config: ChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.axes = ChartAxes::from_config(&config);
        self.pipeline.set_strategy(PipelineStrategy::for_config(&config));
        self.show_last_series = config.show_last_series;
        self.config = config;
        self.rebuild_formatters();
        self.layout.invalidate();
        debug!(variant = ?self.config.variant, "chart config replaced");
        Ok(())
    }

    #[must_use]
    pub fn axes(&self) -> &ChartAxes {
        &self.axes
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    #[must_use]
    pub fn formatter(&self, role: AxisRole) -> &AxisLabelFormatter {
        self.formatters.get(role)
    }

    /// Reports the surface size. Pending layout jobs run once the layout resolves.
    pub fn on_size_changed(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = Some(viewport);
        debug!(
            width = viewport.width,
            height = viewport.height,
            "surface size changed"
        );
        if !self.layout_jobs.is_empty() {
            let layout = self.layout_viewport()?;
            self.layout_jobs.flush(layout);
        }
        Ok(())
    }

    /// Forgets the surface size; later layout jobs are queued again.
    pub fn detach_surface(&mut self) {
        self.viewport = None;
    }

    /// Runs `job` with the current layout, or queues it until a surface size
    /// is known.
    pub fn post_layout_job(&mut self, job: impl FnOnce(ChartLayout) + 'static) -> ChartResult<()> {
        if self.viewport.is_none() {
            self.layout_jobs.push(Box::new(job));
            trace!(pending = self.layout_jobs.len(), "layout job deferred");
            return Ok(());
        }
        let layout = self.layout_viewport()?;
        job(layout);
        Ok(())
    }

    #[must_use]
    pub fn pending_layout_jobs(&self) -> usize {
        self.layout_jobs.len()
    }

    /// Resolves the content layout, reusing the cached one while the surface
    /// size, data-set count and last-series visibility are unchanged.
    pub fn layout_viewport(&mut self) -> ChartResult<ChartLayout> {
        let Some(viewport) = self.viewport else {
            return Err(ChartError::InvalidViewport {
                width: 0,
                height: 0,
            });
        };
        let key = self
            .layout
            .key(viewport, self.data.len(), self.show_last_series);
        if let Some(layout) = self.layout.current(key) {
            return Ok(layout);
        }

        self.pipeline.prepare_axes(
            &mut self.axes,
            &self.config,
            &self.data,
            self.visible_x_range,
            self.config.auto_scale_min_max,
        );
        let request = LayoutRequest {
            viewport,
            config: &self.config,
            strategy: self.pipeline.strategy(),
            axes: &self.axes,
            formatters: &self.formatters,
            active: ActiveAxes::from_series(self.data.active_series(self.show_last_series)),
        };
        self.layout.resolve(key, request, self.measurer.as_ref())
    }

    /// Most recently resolved layout, without re-measuring.
    #[must_use]
    pub fn current_layout(&self) -> Option<ChartLayout> {
        self.layout.last_layout()
    }

    /// Number of layout passes that measured label text.
    #[must_use]
    pub fn layout_measure_passes(&self) -> u64 {
        self.layout.measure_passes()
    }

    #[must_use]
    pub fn tick_cache_hits(&self) -> u64 {
        self.pipeline.tick_cache_hits()
    }

    /// Draws one frame into `surface`. Silent no-op without data or surface size.
    pub fn render_axes(&mut self, surface: &mut dyn DrawSurface) -> ChartResult<()> {
        if !self.data.has_samples() {
            trace!("render skipped: no data");
            return Ok(());
        }
        let Some(viewport) = self.viewport else {
            trace!("render skipped: surface not sized");
            return Ok(());
        };
        let layout = self.layout_viewport()?;
        let input = FrameInput {
            viewport,
            layout,
            config: &self.config,
            data: &self.data,
            formatters: &self.formatters,
            highlights: &self.highlights,
            visible_x_range: self.visible_x_range,
            show_last_series: self.show_last_series,
            autoscale: self.config.auto_scale_min_max,
        };
        self.pipeline
            .render(&mut self.axes, input, self.measurer.as_ref(), surface)
    }

    /// Records one frame of draw commands.
    pub fn build_render_frame(&mut self) -> ChartResult<RenderFrame> {
        let Some(viewport) = self.viewport else {
            return Err(ChartError::InvalidViewport {
                width: 0,
                height: 0,
            });
        };
        let mut frame = RenderFrame::new(viewport);
        self.render_axes(&mut frame)?;
        Ok(frame)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Rebuilds the label formatters from configuration and custom overrides.
    pub(super) fn rebuild_formatters(&mut self) {
        for role in [AxisRole::X, AxisRole::Left, AxisRole::Right] {
            let axis_config = self.config.axis(role);
            *self.formatters.get_mut(role) =
                AxisLabelFormatter::new(axis_config.label_policy, axis_config.label_suffix.clone())
                    .with_custom(self.custom_formatters[role.index()].clone());
        }
    }
}
