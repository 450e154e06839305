use crate::draw::{Annotation, Color};
use crate::input::tool::Tool;
use crate::util;
use log::{debug, info};

use super::{DrawingState, InputState};

impl InputState {
    /// Selects the tool used by the next gesture.
    ///
    /// A pending text entry is discarded; a drag already in progress keeps
    /// the tool it started with.
    pub fn select_tool(&mut self, tool: Tool) {
        if matches!(self.state, DrawingState::AwaitingText(_)) {
            debug!("Tool change discards pending text entry");
            self.state = DrawingState::Idle;
            self.needs_redraw = true;
        }

        if self.current_tool != tool {
            debug!("Tool changed: {:?} -> {:?}", self.current_tool, tool);
            self.current_tool = tool;
        }
    }

    /// Sets the color for new annotations.
    pub fn set_color(&mut self, color: Color) {
        self.current_color = color;
        debug!("Color changed to {}", util::color_to_name(&color));
    }

    /// Sets the stroke width for new annotations, clamped to `1..=max_line_width`.
    pub fn set_line_width(&mut self, line_width: u32) {
        let clamped = line_width.clamp(1, self.max_line_width);
        if clamped != line_width {
            debug!(
                "Line width {line_width} out of range, clamped to {clamped} (max {})",
                self.max_line_width
            );
        }
        self.current_line_width = clamped;
    }

    /// Removes the most recently committed annotation.
    ///
    /// No-op (returns `None`) on an empty list or in a read-only session.
    pub fn undo(&mut self) -> Option<Annotation> {
        if self.read_only {
            return None;
        }

        let removed = self.annotations.undo();
        match &removed {
            Some(annotation) => {
                debug!("Undo removed {} annotation {}", annotation.kind(), annotation.id);
                self.needs_redraw = true;
            }
            None => debug!("Undo ignored: no annotations"),
        }
        removed
    }

    /// Removes every committed annotation. Irreversible.
    pub fn clear(&mut self) {
        if self.read_only {
            return;
        }

        if !self.annotations.is_empty() {
            info!("Cleared {} annotation(s)", self.annotations.len());
        }
        self.annotations.clear();
        self.needs_redraw = true;
    }
}
