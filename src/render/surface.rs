use crate::core::ContentRect;
use crate::render::{CirclePrimitive, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive};

/// Immediate-mode drawing target used by the axis pipeline.
///
/// `save` pushes the clip state and returns the depth before the push, so
/// `restore_to_count(saved)` pops everything pushed since.
pub trait DrawSurface {
    fn save(&mut self) -> usize;
    fn restore_to_count(&mut self, count: usize);
    fn clip_rect(&mut self, rect: ContentRect);
    fn draw_line(&mut self, line: LinePrimitive);
    fn draw_path(&mut self, path: PathPrimitive);
    fn draw_text(&mut self, text: TextPrimitive);
    fn draw_rect(&mut self, rect: RectPrimitive);
    fn draw_circle(&mut self, circle: CirclePrimitive);
}
