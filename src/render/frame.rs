use crate::core::{ContentRect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, DrawSurface, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive,
};

/// One recorded surface operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Clip(ContentRect),
    Line(LinePrimitive),
    Path(PathPrimitive),
    Text(TextPrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
}

/// Backend-agnostic scene for one chart draw pass, recorded in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
    depth: usize,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
            depth: 0,
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.draw_line(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.draw_text(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.draw_rect(rect);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let mut depth = 0_usize;
        for command in &self.commands {
            match command {
                DrawCommand::Save => depth += 1,
                DrawCommand::Restore => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        ChartError::InvalidData("restore without matching save".to_owned())
                    })?;
                }
                DrawCommand::Clip(rect) => {
                    if !rect.is_valid() {
                        return Err(ChartError::InvalidData(
                            "clip rect must be finite and non-negative".to_owned(),
                        ));
                    }
                }
                DrawCommand::Line(line) => line.validate()?,
                DrawCommand::Path(path) => path.validate()?,
                DrawCommand::Text(text) => text.validate()?,
                DrawCommand::Rect(rect) => rect.validate()?,
                DrawCommand::Circle(circle) => circle.validate()?,
            }
        }
        if depth != 0 {
            return Err(ChartError::InvalidData(format!(
                "{depth} clip scope(s) left open"
            )));
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Path(path) => Some(path),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &CirclePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Circle(circle) => Some(circle),
            _ => None,
        })
    }
}

impl DrawSurface for RenderFrame {
    fn save(&mut self) -> usize {
        let saved = self.depth;
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
        saved
    }

    fn restore_to_count(&mut self, count: usize) {
        while self.depth > count {
            self.depth -= 1;
            self.commands.push(DrawCommand::Restore);
        }
    }

    fn clip_rect(&mut self, rect: ContentRect) {
        self.commands.push(DrawCommand::Clip(rect));
    }

    fn draw_line(&mut self, line: LinePrimitive) {
        self.commands.push(DrawCommand::Line(line));
    }

    fn draw_path(&mut self, path: PathPrimitive) {
        self.commands.push(DrawCommand::Path(path));
    }

    fn draw_text(&mut self, text: TextPrimitive) {
        self.commands.push(DrawCommand::Text(text));
    }

    fn draw_rect(&mut self, rect: RectPrimitive) {
        self.commands.push(DrawCommand::Rect(rect));
    }

    fn draw_circle(&mut self, circle: CirclePrimitive) {
        self.commands.push(DrawCommand::Circle(circle));
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawCommand, RenderFrame};
    use crate::core::{ContentRect, Viewport};
    use crate::render::{Color, DrawSurface, LinePrimitive};

    #[test]
    fn restore_to_count_closes_nested_scopes() {
        let mut frame = RenderFrame::new(Viewport::new(100, 100));
        let outer = frame.save();
        frame.clip_rect(ContentRect::new(0.0, 0.0, 50.0, 50.0));
        frame.save();
        frame.restore_to_count(outer);

        let restores = frame
            .commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Restore))
            .count();
        assert_eq!(restores, 2);
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn unbalanced_scope_fails_validation() {
        let mut frame = RenderFrame::new(Viewport::new(100, 100));
        frame.save();
        let frame = frame.with_line(LinePrimitive::new(
            0.0,
            0.0,
            1.0,
            1.0,
            1.0,
            Color::rgb(0.0, 0.0, 0.0),
        ));
        assert!(frame.validate().is_err());
    }
}
