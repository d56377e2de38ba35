mod frame;
mod null_renderer;
mod primitives;
mod surface;
mod text;

pub use frame::{DrawCommand, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, DashPattern, GradientStop, LinePrimitive, LineStrokeStyle, Paint,
    PathPrimitive, RectPrimitive, SINGLE_SEGMENT_GAP_PX, TextHAlign, TextPrimitive,
};
pub use surface::DrawSurface;
pub use text::{EstimatedTextMeasurer, TextMeasurer, TextMetrics};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully recorded `RenderFrame`, so drawing code stays
/// isolated from tick computation and layout.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer, PangoTextMeasurer};
