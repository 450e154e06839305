use crate::draw::{Annotation, Shape};
use crate::geometry::Point;
use crate::input::{events::MouseButton, tool::Tool};
use log::debug;

use super::{DrawingState, InputState, TextEntry};

impl InputState {
    /// Processes a mouse button press event.
    ///
    /// # Behavior
    /// - Left press while Idle: starts a gesture with the current tool. Drawing
    ///   tools create the in-progress annotation at `[start]`; the text tool opens
    ///   the text overlay at the press position; the eraser does nothing.
    /// - Left press during a gesture or with the overlay open: ignored
    /// - Right press: cancels the current gesture without committing
    pub fn on_mouse_press(&mut self, button: MouseButton, x: f64, y: f64) {
        if self.read_only {
            return;
        }

        match button {
            MouseButton::Left => {
                if !matches!(self.state, DrawingState::Idle) {
                    debug!("Ignoring press at ({x:.1}, {y:.1}): gesture already active");
                    return;
                }

                let start = Point::new(x, y);
                let shape = match self.current_tool {
                    Tool::Freehand => Shape::Freehand {
                        points: vec![start],
                    },
                    Tool::Rectangle => Shape::Rectangle { start, end: start },
                    Tool::Circle => Shape::Circle {
                        center: start,
                        edge: start,
                    },
                    Tool::Arrow => Shape::Arrow { start, end: start },
                    Tool::Text => {
                        debug!("Opening text entry at ({x:.1}, {y:.1})");
                        self.state = DrawingState::AwaitingText(TextEntry::new(start));
                        self.needs_redraw = true;
                        return;
                    }
                    Tool::Eraser => {
                        debug!("Eraser press at ({x:.1}, {y:.1}) has no effect");
                        return;
                    }
                };

                let id = self.next_id();
                self.state = DrawingState::Drawing {
                    annotation: Annotation::new(
                        id,
                        shape,
                        self.current_color,
                        self.current_line_width,
                    ),
                };
                self.needs_redraw = true;
            }
            MouseButton::Right => {
                if !matches!(self.state, DrawingState::Idle) {
                    debug!("Gesture cancelled by secondary button");
                    self.state = DrawingState::Idle;
                    self.needs_redraw = true;
                }
            }
            MouseButton::Middle => {}
        }
    }

    /// Processes pointer motion.
    ///
    /// While dragging, freehand strokes append the point and every other shape
    /// moves its second point. Without an active drag this is a no-op.
    pub fn on_mouse_motion(&mut self, x: f64, y: f64) {
        let DrawingState::Drawing { annotation } = &mut self.state else {
            return;
        };

        let point = Point::new(x, y);
        match &mut annotation.shape {
            Shape::Freehand { points } => points.push(point),
            Shape::Rectangle { end, .. } | Shape::Arrow { end, .. } => *end = point,
            Shape::Circle { edge, .. } => *edge = point,
            Shape::Text { .. } => return,
        }
        self.needs_redraw = true;
    }

    /// Processes a mouse button release.
    ///
    /// Releasing the left button commits the in-progress annotation exactly as
    /// it was last updated and returns to Idle. With no drag active (including
    /// while the text overlay is open) this is a no-op.
    pub fn on_mouse_release(&mut self, button: MouseButton) {
        if button != MouseButton::Left {
            return;
        }
        self.finish_drag();
    }

    /// Processes the pointer leaving the canvas, identical to a left release.
    pub fn on_mouse_leave(&mut self) {
        self.finish_drag();
    }

    fn finish_drag(&mut self) {
        if !matches!(self.state, DrawingState::Drawing { .. }) {
            return;
        }

        if let DrawingState::Drawing { annotation } =
            std::mem::replace(&mut self.state, DrawingState::Idle)
        {
            self.commit(annotation);
        }
        self.needs_redraw = true;
    }
}
