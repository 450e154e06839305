mod actions;
mod core;
mod mouse;
mod text;

pub use core::{DrawingState, InputState};
pub use text::TextEntry;
