use cairo::{Context, Format, ImageSurface, LinearGradient};
use pango::FontDescription;
use std::f64::consts::TAU;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawCommand, LineStrokeStyle, Paint, RenderFrame, Renderer, SINGLE_SEGMENT_GAP_PX,
    TextHAlign, TextMeasurer, TextMetrics, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Replays recorded frame commands in order, so clip scopes and draw order are
/// exactly those produced by the axis pipeline.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for command in &frame.commands {
            match command {
                DrawCommand::Save => context
                    .save()
                    .map_err(|err| map_backend_error("failed to save state", err))?,
                DrawCommand::Restore => context
                    .restore()
                    .map_err(|err| map_backend_error("failed to restore state", err))?,
                DrawCommand::Clip(rect) => {
                    context.rectangle(rect.left, rect.top, rect.width(), rect.height());
                    context.clip();
                }
                DrawCommand::Line(line) => {
                    apply_color(context, line.color);
                    apply_stroke_style(context, line.style);
                    context.set_line_width(line.stroke_width);
                    context.move_to(line.x1, line.y1);
                    context.line_to(line.x2, line.y2);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke line", err))?;
                    stats.lines_drawn += 1;
                }
                DrawCommand::Path(path) => {
                    let Some(((first_x, first_y), rest)) = path.points.split_first() else {
                        continue;
                    };
                    apply_color(context, path.color);
                    apply_stroke_style(context, LineStrokeStyle::Solid);
                    context.set_line_width(path.stroke_width);
                    context.move_to(*first_x, *first_y);
                    for (x, y) in rest {
                        context.line_to(*x, *y);
                    }
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke path", err))?;
                    stats.paths_drawn += 1;
                }
                DrawCommand::Rect(rect) => {
                    context.rectangle(rect.x, rect.y, rect.width, rect.height);
                    apply_paint(context, &rect.fill)?;
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                    stats.rects_drawn += 1;
                }
                DrawCommand::Circle(circle) => {
                    apply_color(context, circle.color);
                    context.new_sub_path();
                    context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to fill circle", err))?;
                    stats.circles_drawn += 1;
                }
                DrawCommand::Text(text) => {
                    draw_text(context, text);
                    stats.texts_drawn += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Measures text with the same Pango font the renderer draws with.
#[derive(Debug)]
pub struct PangoTextMeasurer {
    context: Context,
}

impl PangoTextMeasurer {
    pub fn new() -> ChartResult<Self> {
        let surface = ImageSurface::create(Format::ARgb32, 1, 1)
            .map_err(|err| map_backend_error("failed to create measuring surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create measuring context", err))?;
        Ok(Self { context })
    }
}

impl TextMeasurer for PangoTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::new(0.0, font_size_px);
        }
        let layout = create_layout(&self.context, text, font_size_px);
        let (width, height) = layout.pixel_size();
        TextMetrics::new(f64::from(width), f64::from(height))
    }
}

fn create_layout(context: &Context, text: &str, font_size_px: f64) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {font_size_px}px"));
    layout.set_font_description(Some(&font_description));
    layout.set_text(text);
    layout
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = create_layout(context, &text.text, text.font_size_px);
    let (text_width, _text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };
    let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

    apply_color(context, text.color);
    context.move_to(x, text.y - baseline);
    pangocairo::functions::show_layout(context, &layout);
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn apply_stroke_style(context: &Context, style: LineStrokeStyle) {
    match style {
        LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
        LineStrokeStyle::Dashed(pattern) => context.set_dash(
            &[pattern.on_px, pattern.off_px.min(SINGLE_SEGMENT_GAP_PX)],
            pattern.phase_px,
        ),
    }
}

fn apply_paint(context: &Context, paint: &Paint) -> ChartResult<()> {
    match paint {
        Paint::Solid(color) => {
            apply_color(context, *color);
            Ok(())
        }
        Paint::LinearGradient {
            x0,
            y0,
            x1,
            y1,
            stops,
        } => {
            let gradient = LinearGradient::new(*x0, *y0, *x1, *y1);
            for stop in stops {
                gradient.add_color_stop_rgba(
                    stop.offset,
                    stop.color.red,
                    stop.color.green,
                    stop.color.blue,
                    stop.color.alpha,
                );
            }
            context
                .set_source(&gradient)
                .map_err(|err| map_backend_error("failed to set gradient source", err))
        }
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
