//! Drawing state machine and tool session state.

use super::text::TextEntry;
use crate::draw::{Annotation, AnnotationId, AnnotationList, Color};
use crate::input::tool::Tool;
use chrono::Utc;
use log::{debug, warn};

/// Current gesture state machine.
///
/// Tracks whether the user is idle, dragging out an annotation, or typing the
/// text for a label anchored at an earlier click.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// No gesture in progress - waiting for a pointer press
    Idle,
    /// Pointer held down; the annotation being dragged out (not yet committed)
    Drawing { annotation: Annotation },
    /// Text overlay open at an anchor, awaiting confirm or cancel
    AwaitingText(TextEntry),
}

/// Tool session: everything that changes while the user edits one image.
///
/// Holds the committed annotation list, the drawing parameters, and the
/// gesture state machine. It processes pointer and key events in canvas-local
/// coordinates and flags when a repaint is needed.
#[derive(Debug)]
pub struct InputState {
    /// Committed annotations in paint/undo order
    pub annotations: AnnotationList,
    /// Tool used by the next gesture
    pub current_tool: Tool,
    /// Color for new annotations
    pub current_color: Color,
    /// Stroke width for new annotations (always >= 1)
    pub current_line_width: u32,
    /// Upper bound applied by `set_line_width`
    pub max_line_width: u32,
    /// Current gesture state
    pub state: DrawingState,
    /// Whether the canvas needs to be repainted
    pub needs_redraw: bool,
    /// Display-only session: no gesture or edit changes anything
    pub read_only: bool,
    /// Maximum number of annotations (0 = unlimited)
    pub max_annotations: usize,
    /// Last id handed out, kept so ids stay strictly increasing
    last_id: AnnotationId,
}

impl InputState {
    /// Creates a tool session seeded with `initial` annotations.
    ///
    /// # Arguments
    /// * `color` - Initial drawing color
    /// * `line_width` - Initial stroke width (clamped to `1..=max_line_width`)
    /// * `max_line_width` - Largest accepted stroke width
    /// * `max_annotations` - Annotation cap, 0 for unlimited
    /// * `read_only` - Disable every mutation
    /// * `initial` - Annotations to start with, in paint order
    pub fn with_defaults(
        color: Color,
        line_width: u32,
        max_line_width: u32,
        max_annotations: usize,
        read_only: bool,
        initial: Vec<Annotation>,
    ) -> Self {
        let annotations = AnnotationList::from(initial);
        let last_id = annotations.max_id().unwrap_or(0);
        let max_line_width = max_line_width.max(1);

        Self {
            annotations,
            current_tool: Tool::default(),
            current_color: color,
            current_line_width: line_width.clamp(1, max_line_width),
            max_line_width,
            state: DrawingState::Idle,
            needs_redraw: true,
            read_only,
            max_annotations,
            last_id,
        }
    }

    /// The annotation currently being dragged out, if any.
    pub fn in_progress(&self) -> Option<&Annotation> {
        match &self.state {
            DrawingState::Drawing { annotation } => Some(annotation),
            _ => None,
        }
    }

    /// The open text overlay, if any.
    pub fn text_entry(&self) -> Option<&TextEntry> {
        match &self.state {
            DrawingState::AwaitingText(entry) => Some(entry),
            _ => None,
        }
    }

    /// Issues a fresh id: the current time in milliseconds, bumped past any id
    /// already seen so two annotations created in the same millisecond differ.
    ///
    /// Saturates at `u64::MAX`; once a seeded id sits there, new
    /// annotations reuse it.
    pub(crate) fn next_id(&mut self) -> AnnotationId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let next = match self.last_id.checked_add(1) {
            Some(next) => next,
            None => {
                warn!("Annotation id space exhausted; reusing id {}", self.last_id);
                self.last_id
            }
        };
        let id = now.max(next);
        self.last_id = id;
        id
    }

    /// Moves a finished annotation into the list, honoring the annotation cap.
    pub(crate) fn commit(&mut self, annotation: Annotation) -> bool {
        let kind = annotation.kind();
        if self
            .annotations
            .try_append(annotation, self.max_annotations)
        {
            debug!(
                "Committed {kind} annotation ({} total)",
                self.annotations.len()
            );
            self.needs_redraw = true;
            true
        } else {
            warn!(
                "Annotation limit ({}) reached; discarding new {kind}",
                self.max_annotations
            );
            false
        }
    }
}
