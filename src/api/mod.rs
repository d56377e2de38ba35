mod axis_pipeline;
mod config;
mod data_controller;
mod engine;
mod label_compositor;
mod label_format;
mod label_formatter_controller;
mod layout_jobs;
mod render_style;
mod viewport_layout;

pub use axis_pipeline::{
    AxisRenderPipeline, ChartAxes, DataPaint, EdgeClampPolicy, FrameInput, GuideSpan,
    PipelineStrategy, XTickSource, YLabelComposition, clamp_edge_label_x, clamp_grid_line_y,
    inset_edge_grid_x,
};
pub use config::{
    AxisConfig, AxisRole, ChartConfig, ChartVariant, CombinedLabelAnchor,
    ELEVATION_LABEL_COUNT, ELEVATION_X_LABEL_GAP_PX, ELEVATION_X_TICK_LENGTH_PX,
    EdgeLabelClipping, LimitLine,
};
pub use engine::ChartEngine;
pub use label_compositor::{
    ActiveAxes, AxisLabelSource, DualAxisLabelCompositor, LabelSegment, LabelSlot,
    single_axis_slots,
};
pub use label_format::{
    AxisFormatters, AxisLabelFormatter, AxisLabelPolicy, AxisValueFormatterFn,
    MAX_LABEL_PRECISION, format_axis_decimal,
};
pub use layout_jobs::{DeferredLayoutQueue, LayoutJob};
pub use render_style::RenderStyle;
pub use viewport_layout::{ChartLayout, LayoutKey, LayoutRequest, ViewportLayoutEngine};
