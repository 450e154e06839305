//! Text-entry overlay: a transient input anchored where the text tool clicked.

use crate::draw::{Annotation, AnnotationId, Shape};
use crate::geometry::Point;
use crate::input::events::Key;
use log::debug;

use super::{DrawingState, InputState};

/// A pending text label: where it will be drawn and what has been typed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    /// Baseline-left position captured at pointer-down
    pub anchor: Point,
    /// Text typed so far
    pub buffer: String,
}

impl TextEntry {
    pub fn new(anchor: Point) -> Self {
        Self {
            anchor,
            buffer: String::new(),
        }
    }
}

impl InputState {
    /// Replaces the overlay's text. Ignored when no overlay is open.
    pub fn set_text(&mut self, text: &str) {
        if let DrawingState::AwaitingText(entry) = &mut self.state {
            entry.buffer.clear();
            entry.buffer.push_str(text);
            self.needs_redraw = true;
        }
    }

    /// Processes a key press while the overlay is open.
    ///
    /// `Char` appends, `Backspace` deletes the last character, `Return`
    /// confirms and `Escape` cancels. Keys are ignored with no overlay open.
    pub fn on_key_press(&mut self, key: Key) {
        let DrawingState::AwaitingText(entry) = &mut self.state else {
            return;
        };

        match key {
            Key::Char(c) => {
                entry.buffer.push(c);
                self.needs_redraw = true;
            }
            Key::Backspace => {
                entry.buffer.pop();
                self.needs_redraw = true;
            }
            Key::Return => {
                self.confirm_text();
            }
            Key::Escape => {
                self.cancel_text();
            }
            Key::Unknown => {}
        }
    }

    /// Closes the overlay, committing a text annotation when the text is not blank.
    ///
    /// Returns the id of the committed annotation. Blank text (empty or only
    /// whitespace) closes the overlay without touching the annotation list.
    pub fn confirm_text(&mut self) -> Option<AnnotationId> {
        if !matches!(self.state, DrawingState::AwaitingText(_)) {
            return None;
        }
        let DrawingState::AwaitingText(entry) = std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return None;
        };
        self.needs_redraw = true;

        if entry.buffer.trim().is_empty() {
            debug!("Discarding blank text entry");
            return None;
        }

        let id = self.next_id();
        let annotation = Annotation::new(
            id,
            Shape::Text {
                anchor: entry.anchor,
                text: entry.buffer,
            },
            self.current_color,
            self.current_line_width,
        );
        self.commit(annotation).then_some(id)
    }

    /// Closes the overlay without committing anything.
    pub fn cancel_text(&mut self) {
        if matches!(self.state, DrawingState::AwaitingText(_)) {
            debug!("Text entry cancelled");
            self.state = DrawingState::Idle;
            self.needs_redraw = true;
        }
    }
}
