//! The drawing seam between the engine and its host.
//!
//! The engine only ever clears, sets a stroke width, installs its gradient
//! once, and strokes straight lines. [`RecordingSurface`] captures those
//! calls in memory so engines can be driven without a browser.

use glam::DVec2;

use crate::error::FieldError;
use crate::gradient::LinearGradient;

/// A 2D drawing target with stroke-only line rendering.
pub trait Surface {
    /// Clears the rectangle `(x, y, w, h)`.
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Sets the stroke width for subsequent lines.
    fn set_line_width(&mut self, width: f64);

    /// Installs `gradient` as the stroke style for subsequent lines.
    ///
    /// Returns `FieldError::Surface` if the host cannot build the gradient.
    fn set_stroke_gradient(&mut self, gradient: &LinearGradient) -> Result<(), FieldError>;

    /// Strokes a straight line from `from` to `to`.
    fn stroke_line(&mut self, from: DVec2, to: DVec2);
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { x: f64, y: f64, w: f64, h: f64 },
    LineWidth(f64),
    StrokeGradient(LinearGradient),
    Line { from: DVec2, to: DVec2 },
}

/// In-memory surface that records every draw call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded so far, oldest first.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of lines stroked since the last clear.
    pub fn lines_since_clear(&self) -> usize {
        self.commands
            .iter()
            .rev()
            .take_while(|c| !matches!(c, DrawCommand::Clear { .. }))
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    /// Number of clears recorded, i.e. redraws performed.
    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::Clear { x, y, w, h });
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_stroke_gradient(&mut self, gradient: &LinearGradient) -> Result<(), FieldError> {
        self.commands
            .push(DrawCommand::StrokeGradient(gradient.clone()));
        Ok(())
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2) {
        self.commands.push(DrawCommand::Line { from, to });
    }
}
